/// Transaction kinds
///
/// Each constant is the database/wire representation of one transaction
/// category. Whether a kind increases or decreases the running balance is
/// defined by `TransactionKind::direction`.

/// Hours granted to the employee (vacation allowance, overtime worked).
/// Increases the balance.
pub const KIND_ADDED: &str = "ADDED";

/// Vacation hours taken. Decreases the balance.
pub const KIND_USED: &str = "USED";

/// Overtime hours converted into vacation days. Decreases the balance.
pub const KIND_CONVERTED: &str = "CONVERTED";

/// Overtime hours paid out with the salary. Decreases the balance.
pub const KIND_PAID: &str = "PAID";

/// Ledger identifiers
pub const LEDGER_VACATION: &str = "VACATION";
pub const LEDGER_OVERTIME: &str = "OVERTIME";

/// Kind vocabulary of the vacation ledger
pub const VACATION_KINDS: [&str; 2] = [KIND_ADDED, KIND_USED];

/// Kind vocabulary of the overtime ledger
pub const OVERTIME_KINDS: [&str; 3] = [KIND_ADDED, KIND_CONVERTED, KIND_PAID];

/// Date format used for transaction dates on the wire and in storage.
pub const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%d";
