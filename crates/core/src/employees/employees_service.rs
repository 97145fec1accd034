use log::info;
use std::sync::Arc;

use super::employees_model::{Employee, NewEmployee};
use super::employees_traits::{EmployeeRepositoryTrait, EmployeeServiceTrait};
use crate::Result;
use async_trait::async_trait;

/// Service for managing the employee directory.
pub struct EmployeeService {
    employee_repository: Arc<dyn EmployeeRepositoryTrait>,
}

impl EmployeeService {
    pub fn new(employee_repository: Arc<dyn EmployeeRepositoryTrait>) -> Self {
        Self {
            employee_repository,
        }
    }
}

#[async_trait]
impl EmployeeServiceTrait for EmployeeService {
    fn get_employee(&self, employee_id: &str) -> Result<Employee> {
        self.employee_repository.get_employee(employee_id)
    }

    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>> {
        self.employee_repository.list_employees(active_only)
    }

    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee> {
        let employee = new_employee.into_employee()?;
        let created = self.employee_repository.create_employee(employee).await?;
        info!("Created employee {}", created.id);
        Ok(created)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<()> {
        self.employee_repository.delete_employee(employee_id).await?;
        info!("Deleted employee {} and their ledger history", employee_id);
        Ok(())
    }
}
