//! SQLite storage implementation for the hour-balance ledgers.

mod model;
mod repository;

pub use model::{HourTransactionDB, YearlySummaryDB};
pub use repository::HourTransactionRepository;
