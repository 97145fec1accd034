use super::employees_model::{Employee, NewEmployee};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for Employee repository operations.
#[async_trait]
pub trait EmployeeRepositoryTrait: Send + Sync {
    fn get_employee(&self, employee_id: &str) -> Result<Employee>;
    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>>;
    async fn create_employee(&self, employee: Employee) -> Result<Employee>;
    /// Deletes the employee together with all of their hour transactions
    /// and yearly summaries, in one storage transaction.
    async fn delete_employee(&self, employee_id: &str) -> Result<()>;
}

/// Trait defining the contract for Employee service operations.
#[async_trait]
pub trait EmployeeServiceTrait: Send + Sync {
    fn get_employee(&self, employee_id: &str) -> Result<Employee>;
    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>>;
    async fn create_employee(&self, new_employee: NewEmployee) -> Result<Employee>;
    async fn delete_employee(&self, employee_id: &str) -> Result<()>;
}
