use diesel::prelude::*;
use std::sync::Arc;

use praxis_core::errors::{DatabaseError, Error, Result};
use praxis_core::ledger::{
    HourTransaction, HourTransactionRepositoryTrait, LedgerType, Replay, YearlySummary,
};

use super::model::{HourTransactionDB, YearlySummaryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{hour_transactions, yearly_summaries};
use async_trait::async_trait;

/// Repository for hour transactions and their yearly summary projection.
/// Reads go straight to the pool; every mutation runs through the writer
/// actor so it commits as a single transaction.
pub struct HourTransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HourTransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_transaction(
    conn: &mut SqliteConnection,
    ledger: LedgerType,
    transaction_id: &str,
) -> Result<HourTransaction> {
    let transaction_db = hour_transactions::table
        .select(HourTransactionDB::as_select())
        .find(transaction_id)
        .filter(hour_transactions::ledger.eq(ledger.as_str()))
        .first::<HourTransactionDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::Database(DatabaseError::NotFound(transaction_id.to_string())))?;
    HourTransaction::try_from(transaction_db)
}

#[async_trait]
impl HourTransactionRepositoryTrait for HourTransactionRepository {
    fn get_transaction(
        &self,
        ledger: LedgerType,
        transaction_id: &str,
    ) -> Result<HourTransaction> {
        let mut conn = get_connection(&self.pool)?;
        load_transaction(&mut conn, ledger, transaction_id)
    }

    fn get_transactions_by_employee(
        &self,
        ledger: LedgerType,
        employee_id: &str,
        year: Option<i32>,
    ) -> Result<Vec<HourTransaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = hour_transactions::table
            .select(HourTransactionDB::as_select())
            .filter(hour_transactions::employee_id.eq(employee_id))
            .filter(hour_transactions::ledger.eq(ledger.as_str()))
            .order((
                hour_transactions::transaction_date.asc(),
                hour_transactions::id.asc(),
            ))
            .into_boxed();
        if let Some(year) = year {
            query = query.filter(hour_transactions::year.eq(year));
        }

        let transactions_db = query
            .load::<HourTransactionDB>(&mut conn)
            .into_core()?;

        transactions_db
            .into_iter()
            .map(HourTransaction::try_from)
            .collect()
    }

    async fn create_transaction(&self, transaction: HourTransaction) -> Result<HourTransaction> {
        let row = HourTransactionDB::from(transaction.clone());
        self.writer
            .exec(move |conn| {
                diesel::insert_into(hour_transactions::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await?;
        Ok(transaction)
    }

    async fn delete_transaction(
        &self,
        ledger: LedgerType,
        transaction_id: &str,
    ) -> Result<HourTransaction> {
        let transaction_id = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                // Load first so the caller learns which employee's history
                // to recalculate.
                let transaction = load_transaction(conn, ledger, &transaction_id)?;
                diesel::delete(hour_transactions::table.find(&transaction_id))
                    .execute(conn)
                    .into_core()?;
                Ok(transaction)
            })
            .await
    }

    async fn apply_replay(
        &self,
        ledger: LedgerType,
        employee_id: &str,
        replay: Replay,
    ) -> Result<()> {
        let employee_id = employee_id.to_string();
        self.writer
            .exec(move |conn| {
                for (transaction_id, balance) in &replay.balances {
                    diesel::update(hour_transactions::table.find(transaction_id))
                        .set(hour_transactions::balance_after.eq(balance.to_string()))
                        .execute(conn)
                        .into_core()?;
                }

                // Years whose last transaction was deleted lose their
                // summary row instead of lingering as stale totals.
                let live_years: Vec<i32> = replay.year_totals.keys().copied().collect();
                diesel::delete(
                    yearly_summaries::table
                        .filter(yearly_summaries::employee_id.eq(&employee_id))
                        .filter(yearly_summaries::ledger.eq(ledger.as_str()))
                        .filter(yearly_summaries::year.ne_all(&live_years)),
                )
                .execute(conn)
                .into_core()?;

                let rows: Vec<YearlySummaryDB> = replay
                    .year_totals
                    .into_iter()
                    .map(|(year, totals)| {
                        YearlySummaryDB::from(totals.into_summary(&employee_id, ledger, year))
                    })
                    .collect();
                if !rows.is_empty() {
                    diesel::replace_into(yearly_summaries::table)
                        .values(&rows)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(())
            })
            .await
    }

    fn get_summary(
        &self,
        ledger: LedgerType,
        employee_id: &str,
        year: i32,
    ) -> Result<Option<YearlySummary>> {
        let mut conn = get_connection(&self.pool)?;
        let summary_db = yearly_summaries::table
            .select(YearlySummaryDB::as_select())
            .find((employee_id, ledger.as_str(), year))
            .first::<YearlySummaryDB>(&mut conn)
            .optional()
            .into_core()?;
        summary_db.map(YearlySummary::try_from).transpose()
    }

    fn get_summaries_by_employee(
        &self,
        ledger: LedgerType,
        employee_id: &str,
    ) -> Result<Vec<YearlySummary>> {
        let mut conn = get_connection(&self.pool)?;
        let summaries_db = yearly_summaries::table
            .select(YearlySummaryDB::as_select())
            .filter(yearly_summaries::employee_id.eq(employee_id))
            .filter(yearly_summaries::ledger.eq(ledger.as_str()))
            .order(yearly_summaries::year.desc())
            .load::<YearlySummaryDB>(&mut conn)
            .into_core()?;

        summaries_db
            .into_iter()
            .map(YearlySummary::try_from)
            .collect()
    }
}
