//! Ledger module - the hour-balance ledgers (vacation and overtime).
//!
//! One generic ledger, instantiated once per [`LedgerType`]: an append-only
//! transaction store, a pure full-replay recalculation engine, and a
//! per-year summary projection.

mod ledger_constants;
mod ledger_errors;
mod ledger_model;
mod ledger_service;
mod ledger_traits;
mod recalculation;


#[cfg(test)]
mod ledger_service_tests;

pub use ledger_constants::*;
pub use ledger_errors::LedgerError;
pub use ledger_model::{
    Direction, HourTransaction, LedgerType, NewHourTransaction, SummaryTotals,
    TransactionKind, TransactionMutationResult, YearlySummary,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{HourTransactionRepositoryTrait, LedgerServiceTrait};
pub use recalculation::{replay, Replay, YearTotals};
