use super::ledger_model::*;
use super::recalculation::Replay;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for the hour-transaction store and the
/// summary projection. Implemented by the storage crate.
#[async_trait]
pub trait HourTransactionRepositoryTrait: Send + Sync {
    fn get_transaction(&self, ledger: LedgerType, transaction_id: &str)
        -> Result<HourTransaction>;

    /// All transactions of one employee on one ledger, ordered by
    /// `(transaction_date asc, id asc)` - the canonical replay order.
    /// Optionally restricted to a single year.
    fn get_transactions_by_employee(
        &self,
        ledger: LedgerType,
        employee_id: &str,
        year: Option<i32>,
    ) -> Result<Vec<HourTransaction>>;

    /// Inserts the transaction as handed in. `balance_after` is stored as
    /// provided (zero for fresh inserts); the service runs a recalculation
    /// immediately afterwards to fill it in.
    async fn create_transaction(&self, transaction: HourTransaction) -> Result<HourTransaction>;

    /// Deletes a transaction and returns the deleted row, so the caller
    /// knows which employee's history to recalculate.
    async fn delete_transaction(
        &self,
        ledger: LedgerType,
        transaction_id: &str,
    ) -> Result<HourTransaction>;

    /// Commits a replay result in ONE storage transaction: overwrites every
    /// transaction's `balance_after`, upserts (full replacement) the summary
    /// row of every year present in the replay, and deletes summary rows of
    /// years that no longer have transactions. Either all of it becomes
    /// visible or none of it.
    async fn apply_replay(
        &self,
        ledger: LedgerType,
        employee_id: &str,
        replay: Replay,
    ) -> Result<()>;

    /// The cached summary row, or `None` when the employee-year has never
    /// been summarized.
    fn get_summary(
        &self,
        ledger: LedgerType,
        employee_id: &str,
        year: i32,
    ) -> Result<Option<YearlySummary>>;

    /// All summary rows of one employee on one ledger, newest year first.
    fn get_summaries_by_employee(
        &self,
        ledger: LedgerType,
        employee_id: &str,
    ) -> Result<Vec<YearlySummary>>;
}

/// Trait defining the contract for ledger operations as exposed to the
/// HTTP layer. One instance exists per [`LedgerType`].
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Which of the two ledgers this service instance manages.
    fn ledger_type(&self) -> LedgerType;

    /// Validates and appends a transaction, then recalculates the
    /// employee's full history. Returns the stored transaction with its
    /// final running balance together with the recomputed summary of the
    /// affected year.
    async fn add_transaction(
        &self,
        new_transaction: NewHourTransaction,
    ) -> Result<TransactionMutationResult>;

    /// Deletes a transaction and recalculates the owning employee's
    /// history. Returns the employee id.
    async fn delete_transaction(&self, transaction_id: &str) -> Result<String>;

    /// Ordered transaction listing, optionally restricted to one year.
    fn get_transactions(
        &self,
        employee_id: &str,
        year: Option<i32>,
    ) -> Result<Vec<HourTransaction>>;

    /// The cached summary for an employee-year; all-zero totals when no
    /// transactions exist (never an error).
    fn get_summary(&self, employee_id: &str, year: i32) -> Result<YearlySummary>;

    /// Every year's summary for an employee, newest first.
    fn get_yearly_summaries(&self, employee_id: &str) -> Result<Vec<YearlySummary>>;

    /// Replays the employee's full history and commits the result.
    /// Self-heals any stale `balance_after`/summary state left behind by an
    /// earlier storage failure.
    async fn recalculate(&self, employee_id: &str) -> Result<()>;
}
