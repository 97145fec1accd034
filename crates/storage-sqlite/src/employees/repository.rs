use diesel::prelude::*;
use std::sync::Arc;

use praxis_core::employees::{Employee, EmployeeRepositoryTrait};
use praxis_core::errors::{DatabaseError, Error, Result};

use super::model::EmployeeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{employees, hour_transactions, yearly_summaries};
use async_trait::async_trait;

/// Repository for managing employee data in the database.
pub struct EmployeeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EmployeeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl EmployeeRepositoryTrait for EmployeeRepository {
    fn get_employee(&self, employee_id: &str) -> Result<Employee> {
        let mut conn = get_connection(&self.pool)?;
        let employee_db = employees::table
            .select(EmployeeDB::as_select())
            .find(employee_id)
            .first::<EmployeeDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::Database(DatabaseError::NotFound(employee_id.to_string())))?;
        Employee::try_from(employee_db)
    }

    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = employees::table
            .select(EmployeeDB::as_select())
            .order((employees::last_name.asc(), employees::first_name.asc()))
            .into_boxed();
        if active_only {
            query = query.filter(employees::is_active.eq(true));
        }

        let employees_db = query
            .load::<EmployeeDB>(&mut conn)
            .into_core()?;

        employees_db.into_iter().map(Employee::try_from).collect()
    }

    async fn create_employee(&self, employee: Employee) -> Result<Employee> {
        let row = EmployeeDB::from(employee.clone());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(employees::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;
        Ok(employee)
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<()> {
        let employee_id = employee_id.to_string();
        self.writer
            .exec(move |conn| {
                // The schema cascades via foreign keys; the explicit deletes
                // keep the behavior independent of the foreign_keys pragma.
                diesel::delete(
                    hour_transactions::table
                        .filter(hour_transactions::employee_id.eq(&employee_id)),
                )
                .execute(conn)
                .into_core()?;

                diesel::delete(
                    yearly_summaries::table
                        .filter(yearly_summaries::employee_id.eq(&employee_id)),
                )
                .execute(conn)
                .into_core()?;

                let deleted = diesel::delete(employees::table.find(&employee_id))
                    .execute(conn)
                    .into_core()?;
                if deleted == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(employee_id.clone())));
                }
                Ok(())
            })
            .await
    }
}
