//! Database models for ledger transactions and yearly summaries.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use praxis_core::errors::{Error, ValidationError};
use praxis_core::ledger::{
    HourTransaction, LedgerType, TransactionKind, YearlySummary, TRANSACTION_DATE_FORMAT,
};

/// Helper function to parse a stored decimal string. Corrupt values fall
/// back to zero rather than failing the whole read, matching how the rest
/// of the stored row stays usable.
fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as Decimal (err: {}). Falling back to ZERO.",
                field_name,
                value_str,
                e
            );
            Decimal::ZERO
        }
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ValidationError::DateTimeParse(e).into())
}

/// Database model for hour transactions
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize,
    Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::hour_transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HourTransactionDB {
    pub id: String,
    pub employee_id: String,
    pub ledger: String,
    pub year: i32,
    pub transaction_date: String,
    pub kind: String,
    pub hours: String,
    pub description: Option<String>,
    pub balance_after: String,
    pub created_at: String,
}

impl From<HourTransaction> for HourTransactionDB {
    fn from(transaction: HourTransaction) -> Self {
        Self {
            id: transaction.id,
            employee_id: transaction.employee_id,
            ledger: transaction.ledger.as_str().to_string(),
            year: transaction.year,
            transaction_date: transaction
                .transaction_date
                .format(TRANSACTION_DATE_FORMAT)
                .to_string(),
            kind: transaction.kind.as_str().to_string(),
            hours: transaction.hours.to_string(),
            description: transaction.description,
            balance_after: transaction.balance_after.to_string(),
            created_at: transaction.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<HourTransactionDB> for HourTransaction {
    type Error = Error;

    fn try_from(db: HourTransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            ledger: LedgerType::from_str(&db.ledger)?,
            kind: TransactionKind::from_str(&db.kind)?,
            transaction_date: NaiveDate::parse_from_str(
                &db.transaction_date,
                TRANSACTION_DATE_FORMAT,
            )
            .map_err(ValidationError::DateTimeParse)?,
            hours: parse_decimal_string_tolerant(&db.hours, "hours"),
            balance_after: parse_decimal_string_tolerant(&db.balance_after, "balance_after"),
            created_at: parse_timestamp(&db.created_at)?,
            id: db.id,
            employee_id: db.employee_id,
            year: db.year,
            description: db.description,
        })
    }
}

/// Database model for yearly summaries
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize,
    Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::yearly_summaries)]
#[diesel(primary_key(employee_id, ledger, year))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct YearlySummaryDB {
    pub employee_id: String,
    pub ledger: String,
    pub year: i32,
    pub added_hours: String,
    pub used_hours: String,
    pub converted_hours: String,
    pub paid_hours: String,
    pub updated_at: String,
}

impl From<YearlySummary> for YearlySummaryDB {
    fn from(summary: YearlySummary) -> Self {
        Self {
            employee_id: summary.employee_id,
            ledger: summary.ledger.as_str().to_string(),
            year: summary.year,
            added_hours: summary.added_hours.to_string(),
            used_hours: summary.used_hours.to_string(),
            converted_hours: summary.converted_hours.to_string(),
            paid_hours: summary.paid_hours.to_string(),
            updated_at: summary.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<YearlySummaryDB> for YearlySummary {
    type Error = Error;

    fn try_from(db: YearlySummaryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            ledger: LedgerType::from_str(&db.ledger)?,
            added_hours: parse_decimal_string_tolerant(&db.added_hours, "added_hours"),
            used_hours: parse_decimal_string_tolerant(&db.used_hours, "used_hours"),
            converted_hours: parse_decimal_string_tolerant(&db.converted_hours, "converted_hours"),
            paid_hours: parse_decimal_string_tolerant(&db.paid_hours, "paid_hours"),
            updated_at: parse_timestamp(&db.updated_at)?,
            employee_id: db.employee_id,
            year: db.year,
        })
    }
}
