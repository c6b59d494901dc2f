//! Balance store port - where the account balance lives between runs

use rust_decimal::Decimal;

use crate::domain::result::Result;

/// Persistence for a single balance value.
///
/// Writes are whole-value overwrites; there is no history.
pub trait BalanceStore {
    /// Read the stored balance. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Decimal>>;

    /// Replace the stored balance
    fn save(&self, balance: Decimal) -> Result<()>;

    /// Where the balance is kept, for messages
    fn location(&self) -> String;
}
