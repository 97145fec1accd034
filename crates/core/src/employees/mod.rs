//! Employees module - the directory the ledgers' foreign keys point at.

mod employees_model;
mod employees_service;
mod employees_traits;


pub use employees_model::{Employee, EmployeeRole, NewEmployee};
pub use employees_service::EmployeeService;
pub use employees_traits::{EmployeeRepositoryTrait, EmployeeServiceTrait};
