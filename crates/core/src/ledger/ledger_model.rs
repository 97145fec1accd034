//! Ledger domain models.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ledger_constants::*;
use super::ledger_errors::LedgerError;
use crate::errors::{Result, ValidationError};

/// Generates a transaction id. `now_v7` runs a process-wide counter
/// context, so ids assigned within the same millisecond still sort in
/// insertion order. The (transaction_date, id) replay order relies on this.
fn next_transaction_id() -> String {
    Uuid::now_v7().to_string()
}

/// The two hour-denominated ledgers kept per employee.
///
/// Both ledgers share the same mechanics (append-only transactions, full
/// replay, yearly summaries); they differ only in their kind vocabulary and
/// in how their summary totals are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerType {
    Vacation,
    Overtime,
}

impl LedgerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerType::Vacation => LEDGER_VACATION,
            LedgerType::Overtime => LEDGER_OVERTIME,
        }
    }

    /// The kinds a transaction on this ledger may carry.
    pub fn kinds(&self) -> &'static [&'static str] {
        match self {
            LedgerType::Vacation => &VACATION_KINDS,
            LedgerType::Overtime => &OVERTIME_KINDS,
        }
    }
}

impl fmt::Display for LedgerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerType {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            LEDGER_VACATION => Ok(LedgerType::Vacation),
            LEDGER_OVERTIME => Ok(LedgerType::Overtime),
            other => Err(LedgerError::InvalidData(format!(
                "Unknown ledger type '{}'",
                other
            ))),
        }
    }
}

/// Whether a transaction kind raises or lowers the running balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// Category of an hour movement.
///
/// The sign of a movement is implied by its kind: `Added` increases the
/// balance, every other kind decreases it. `Used` belongs to the vacation
/// ledger; `Converted` and `Paid` belong to the overtime ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Added,
    Used,
    Converted,
    Paid,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Added => KIND_ADDED,
            TransactionKind::Used => KIND_USED,
            TransactionKind::Converted => KIND_CONVERTED,
            TransactionKind::Paid => KIND_PAID,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            TransactionKind::Added => Direction::Increase,
            _ => Direction::Decrease,
        }
    }

    /// Checks whether this kind belongs to the given ledger's vocabulary.
    pub fn is_valid_for(&self, ledger: LedgerType) -> bool {
        ledger.kinds().contains(&self.as_str())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            KIND_ADDED => Ok(TransactionKind::Added),
            KIND_USED => Ok(TransactionKind::Used),
            KIND_CONVERTED => Ok(TransactionKind::Converted),
            KIND_PAID => Ok(TransactionKind::Paid),
            other => Err(LedgerError::InvalidKind(other.to_string())),
        }
    }
}

/// One hour movement on a ledger.
///
/// Transactions are append-only; corrections are expressed as additional
/// transactions (or by deleting the offending one, which triggers a full
/// recalculation). `balance_after` is a derived cache maintained by the
/// recalculation engine, never a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourTransaction {
    /// UUID v7, monotonically assigned at insertion. Together with
    /// `transaction_date` it forms the canonical replay order
    /// (date ascending, id ascending).
    pub id: String,
    pub employee_id: String,
    pub ledger: LedgerType,
    /// Calendar year the movement is attributed to.
    pub year: i32,
    pub transaction_date: NaiveDate,
    pub kind: TransactionKind,
    /// Positive magnitude; the sign is implied by `kind`. A negative value
    /// is allowed as an explicit correction entry.
    pub hours: Decimal,
    pub description: Option<String>,
    /// Running balance immediately after this transaction, in replay order.
    pub balance_after: Decimal,
    /// Insertion timestamp, audit only.
    pub created_at: DateTime<Utc>,
}

impl HourTransaction {
    /// The movement with its sign applied: positive for increase kinds,
    /// negative for decrease kinds.
    pub fn signed_hours(&self) -> Decimal {
        match self.kind.direction() {
            Direction::Increase => self.hours,
            Direction::Decrease => -self.hours,
        }
    }
}

/// Input model for appending a transaction to a ledger.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewHourTransaction {
    pub employee_id: String,
    /// Defaults to the year of `transaction_date` when omitted.
    pub year: Option<i32>,
    /// Calendar date in `%Y-%m-%d` format.
    pub transaction_date: String,
    pub kind: String,
    /// Decimal hour quantity as entered by the caller.
    pub hours: String,
    pub description: Option<String>,
}

impl NewHourTransaction {
    /// Validates the input against the given ledger's rules and turns it
    /// into a transaction ready for insertion.
    ///
    /// Rejects, before any write: a blank employee id, an unparseable date,
    /// a kind outside the ledger's vocabulary, and hours that are not a
    /// parseable non-zero decimal. The returned transaction carries a fresh
    /// UUID v7 and a zero `balance_after`; the recalculation engine fills
    /// the balance in before the insert is considered complete.
    pub fn into_transaction(self, ledger: LedgerType) -> Result<HourTransaction> {
        if self.employee_id.trim().is_empty() {
            return Err(ValidationError::MissingField("employee_id".to_string()).into());
        }

        let date_str = self.transaction_date.trim();
        if date_str.is_empty() {
            return Err(ValidationError::MissingField("transaction_date".to_string()).into());
        }
        let transaction_date = NaiveDate::parse_from_str(date_str, TRANSACTION_DATE_FORMAT)
            .map_err(ValidationError::DateTimeParse)?;

        let kind = TransactionKind::from_str(self.kind.trim())?;
        if !kind.is_valid_for(ledger) {
            return Err(LedgerError::InvalidKind(format!(
                "'{}' is not a valid kind for the {} ledger",
                kind, ledger
            ))
            .into());
        }

        let hours =
            Decimal::from_str(self.hours.trim()).map_err(ValidationError::DecimalParse)?;
        if hours.is_zero() {
            return Err(LedgerError::InvalidHours("hours must be non-zero".to_string()).into());
        }

        Ok(HourTransaction {
            id: next_transaction_id(),
            employee_id: self.employee_id,
            ledger,
            year: self.year.unwrap_or_else(|| transaction_date.year()),
            transaction_date,
            kind,
            hours,
            description: self
                .description
                .filter(|d| !d.trim().is_empty()),
            balance_after: Decimal::ZERO,
            created_at: Utc::now(),
        })
    }
}

/// Cached per-year aggregate for one employee on one ledger.
///
/// Derived from the transaction history by the recalculation engine and
/// overwritten as a whole after every mutation; never patched incrementally
/// and never authoritative on its own. Buckets outside the ledger's kind
/// vocabulary stay zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub employee_id: String,
    pub ledger: LedgerType,
    pub year: i32,
    pub added_hours: Decimal,
    pub used_hours: Decimal,
    pub converted_hours: Decimal,
    pub paid_hours: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl YearlySummary {
    /// The all-zero summary returned for an employee-year with no
    /// transactions. Not an error.
    pub fn zero(employee_id: &str, ledger: LedgerType, year: i32) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            ledger,
            year,
            added_hours: Decimal::ZERO,
            used_hours: Decimal::ZERO,
            converted_hours: Decimal::ZERO,
            paid_hours: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// The ledger-specific view of the totals.
    pub fn totals(&self) -> SummaryTotals {
        match self.ledger {
            LedgerType::Vacation => SummaryTotals::Vacation {
                available_hours: self.added_hours,
                used_hours: self.used_hours,
            },
            LedgerType::Overtime => SummaryTotals::Overtime {
                total_hours: self.added_hours,
                converted_hours: self.converted_hours,
                paid_hours: self.paid_hours,
            },
        }
    }
}

/// Summary totals labeled per ledger, as serialized towards the HTTP layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "ledger")]
pub enum SummaryTotals {
    #[serde(rename = "VACATION")]
    Vacation {
        available_hours: Decimal,
        used_hours: Decimal,
    },
    #[serde(rename = "OVERTIME")]
    Overtime {
        total_hours: Decimal,
        converted_hours: Decimal,
        paid_hours: Decimal,
    },
}

/// Result of appending a transaction: the stored transaction with its final
/// running balance, plus the freshly recomputed summary of its year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMutationResult {
    pub transaction: HourTransaction,
    pub summary: YearlySummary,
}
