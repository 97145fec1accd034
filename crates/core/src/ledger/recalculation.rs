//! Full-replay recalculation engine.
//!
//! After any mutation the entire per-employee history is replayed from
//! scratch rather than patched forward from the change point. Deletions and
//! corrections at arbitrary points in history therefore need no special
//! casing, at the cost of O(n) work per mutation - acceptable because
//! per-employee transaction counts are small (tens to low hundreds).
//!
//! The engine is a pure function: it takes the ordered history and returns
//! the new balances and year totals. Committing the result to storage is the
//! repository's job ([`super::HourTransactionRepositoryTrait::apply_replay`]),
//! which does so in a single transaction.

use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::ledger_model::{HourTransaction, LedgerType, TransactionKind, YearlySummary};

/// Per-kind hour totals accumulated for one calendar year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearTotals {
    pub added: Decimal,
    pub used: Decimal,
    pub converted: Decimal,
    pub paid: Decimal,
}

impl YearTotals {
    fn absorb(&mut self, kind: TransactionKind, hours: Decimal) {
        match kind {
            TransactionKind::Added => self.added += hours,
            TransactionKind::Used => self.used += hours,
            TransactionKind::Converted => self.converted += hours,
            TransactionKind::Paid => self.paid += hours,
        }
    }

    pub fn into_summary(self, employee_id: &str, ledger: LedgerType, year: i32) -> YearlySummary {
        YearlySummary {
            added_hours: self.added,
            used_hours: self.used,
            converted_hours: self.converted,
            paid_hours: self.paid,
            ..YearlySummary::zero(employee_id, ledger, year)
        }
    }
}

/// Outcome of replaying one employee's full history.
#[derive(Debug, Clone, Default)]
pub struct Replay {
    /// `(transaction_id, balance_after)` in replay order.
    pub balances: Vec<(String, Decimal)>,
    /// Totals for every year that has at least one transaction.
    pub year_totals: BTreeMap<i32, YearTotals>,
}

impl Replay {
    pub fn balance_for(&self, transaction_id: &str) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|(id, _)| id == transaction_id)
            .map(|(_, balance)| *balance)
    }
}

/// Replays a history already ordered by `(transaction_date asc, id asc)`.
///
/// Runs the balance accumulator from zero across the whole history (earlier
/// years feed later years' starting balances) and collects per-year kind
/// totals independently. The balance invariant
/// `balance_after[i] = balance_after[i-1] + signed(hours[i])` holds on the
/// output by construction.
pub fn replay(transactions: &[HourTransaction]) -> Replay {
    let mut running_balance = Decimal::zero();
    let mut result = Replay::default();

    for transaction in transactions {
        running_balance += transaction.signed_hours();
        result
            .balances
            .push((transaction.id.clone(), running_balance));
        result
            .year_totals
            .entry(transaction.year)
            .or_default()
            .absorb(transaction.kind, transaction.hours);
    }

    result
}
