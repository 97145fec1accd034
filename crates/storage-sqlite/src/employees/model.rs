//! Database models for employees.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use praxis_core::employees::{Employee, EmployeeRole};
use praxis_core::errors::{Error, ValidationError};

/// Database model for employees
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize,
    Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeDB {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Employee> for EmployeeDB {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            role: employee.role.as_str().to_string(),
            is_active: employee.is_active,
            created_at: employee.created_at.to_rfc3339(),
            updated_at: employee.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<EmployeeDB> for Employee {
    type Error = Error;

    fn try_from(db: EmployeeDB) -> Result<Self, Self::Error> {
        Ok(Self {
            role: EmployeeRole::from_str(&db.role)?,
            created_at: parse_timestamp(&db.created_at)?,
            updated_at: parse_timestamp(&db.updated_at)?,
            id: db.id,
            first_name: db.first_name,
            last_name: db.last_name,
            email: db.email,
            is_active: db.is_active,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ValidationError::DateTimeParse(e).into())
}
