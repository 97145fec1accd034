use dashmap::DashMap;
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::ledger_model::*;
use super::ledger_traits::{HourTransactionRepositoryTrait, LedgerServiceTrait};
use super::recalculation::{replay, Replay};
use crate::employees::EmployeeServiceTrait;
use crate::Result;
use async_trait::async_trait;

/// Service managing one hour-balance ledger.
///
/// Constructed twice - once for the vacation ledger, once for the overtime
/// ledger - over the same repository. Every mutation runs the full
/// fetch -> replay -> commit pass under an exclusive per-employee lock, so
/// recalculation passes for the same employee never interleave. Operations
/// for different employees proceed independently.
pub struct LedgerService {
    ledger: LedgerType,
    transaction_repository: Arc<dyn HourTransactionRepositoryTrait>,
    employee_service: Arc<dyn EmployeeServiceTrait>,
    recalculation_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LedgerService {
    pub fn new(
        ledger: LedgerType,
        transaction_repository: Arc<dyn HourTransactionRepositoryTrait>,
        employee_service: Arc<dyn EmployeeServiceTrait>,
    ) -> Self {
        Self {
            ledger,
            transaction_repository,
            employee_service,
            recalculation_locks: DashMap::new(),
        }
    }

    fn employee_lock(&self, employee_id: &str) -> Arc<Mutex<()>> {
        self.recalculation_locks
            .entry(employee_id.to_string())
            .or_default()
            .clone()
    }

    /// Fetch -> replay -> commit for one employee. Callers must hold the
    /// employee's recalculation lock.
    async fn recalculate_locked(&self, employee_id: &str) -> Result<Replay> {
        let transactions = self
            .transaction_repository
            .get_transactions_by_employee(self.ledger, employee_id, None)?;

        let result = replay(&transactions);
        debug!(
            "Recalculated {} ledger for employee {}: {} transactions, {} year(s)",
            self.ledger,
            employee_id,
            result.balances.len(),
            result.year_totals.len()
        );

        self.transaction_repository
            .apply_replay(self.ledger, employee_id, result.clone())
            .await?;

        Ok(result)
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    fn ledger_type(&self) -> LedgerType {
        self.ledger
    }

    async fn add_transaction(
        &self,
        new_transaction: NewHourTransaction,
    ) -> Result<TransactionMutationResult> {
        let transaction = new_transaction.into_transaction(self.ledger)?;

        // Reject unknown employees before any write.
        self.employee_service.get_employee(&transaction.employee_id)?;

        let lock = self.employee_lock(&transaction.employee_id);
        let _guard = lock.lock().await;

        let created = self
            .transaction_repository
            .create_transaction(transaction)
            .await?;

        let result = self.recalculate_locked(&created.employee_id).await?;

        let balance_after = result.balance_for(&created.id).unwrap_or(created.balance_after);
        let summary = result
            .year_totals
            .get(&created.year)
            .cloned()
            .map(|totals| totals.into_summary(&created.employee_id, self.ledger, created.year))
            .unwrap_or_else(|| YearlySummary::zero(&created.employee_id, self.ledger, created.year));

        Ok(TransactionMutationResult {
            transaction: HourTransaction {
                balance_after,
                ..created
            },
            summary,
        })
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<String> {
        // Look the row up first to learn which employee to lock; the delete
        // below reports NotFound if it disappears in between.
        let existing = self
            .transaction_repository
            .get_transaction(self.ledger, transaction_id)?;

        let lock = self.employee_lock(&existing.employee_id);
        let _guard = lock.lock().await;

        let deleted = self
            .transaction_repository
            .delete_transaction(self.ledger, transaction_id)
            .await?;

        self.recalculate_locked(&deleted.employee_id).await?;

        Ok(deleted.employee_id)
    }

    fn get_transactions(
        &self,
        employee_id: &str,
        year: Option<i32>,
    ) -> Result<Vec<HourTransaction>> {
        self.transaction_repository
            .get_transactions_by_employee(self.ledger, employee_id, year)
    }

    fn get_summary(&self, employee_id: &str, year: i32) -> Result<YearlySummary> {
        Ok(self
            .transaction_repository
            .get_summary(self.ledger, employee_id, year)?
            .unwrap_or_else(|| YearlySummary::zero(employee_id, self.ledger, year)))
    }

    fn get_yearly_summaries(&self, employee_id: &str) -> Result<Vec<YearlySummary>> {
        self.transaction_repository
            .get_summaries_by_employee(self.ledger, employee_id)
    }

    async fn recalculate(&self, employee_id: &str) -> Result<()> {
        let lock = self.employee_lock(employee_id);
        let _guard = lock.lock().await;
        self.recalculate_locked(employee_id).await?;
        Ok(())
    }
}
