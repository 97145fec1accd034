//! Employee domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{Result, ValidationError};

/// Access role of an employee. Enforcement happens in the HTTP layer; the
/// core only stores and reports the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeRole {
    Admin,
    Manager,
    #[default]
    Employee,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Admin => "ADMIN",
            EmployeeRole::Manager => "MANAGER",
            EmployeeRole::Employee => "EMPLOYEE",
        }
    }
}

impl fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(EmployeeRole::Admin),
            "MANAGER" => Ok(EmployeeRole::Manager),
            "EMPLOYEE" => Ok(EmployeeRole::Employee),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown employee role '{}'",
                other
            ))),
        }
    }
}

/// Domain model representing an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub role: EmployeeRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input model for creating a new employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub role: Option<EmployeeRole>,
}

impl NewEmployee {
    /// Validates the input and turns it into an employee with a fresh id.
    pub fn into_employee(self) -> Result<Employee> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingField("first_name".to_string()).into());
        }
        if self.last_name.trim().is_empty() {
            return Err(ValidationError::MissingField("last_name".to_string()).into());
        }

        let now = Utc::now();
        Ok(Employee {
            id: Uuid::now_v7().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.filter(|e| !e.trim().is_empty()),
            role: self.role.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}
