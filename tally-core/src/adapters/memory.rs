//! In-memory balance store for tests and dry runs

use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::ports::BalanceStore;

/// Balance held in memory. Can be told to fail writes.
#[derive(Debug, Default)]
pub struct MemoryBalanceStore {
    balance: Mutex<Option<Decimal>>,
    fail_writes: bool,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `balance`
    pub fn with_balance(balance: Decimal) -> Self {
        Self {
            balance: Mutex::new(Some(balance)),
            fail_writes: false,
        }
    }

    /// Store whose `save` always fails
    pub fn failing(balance: Option<Decimal>) -> Self {
        Self {
            balance: Mutex::new(balance),
            fail_writes: true,
        }
    }

    /// Current stored value
    pub fn stored(&self) -> Option<Decimal> {
        self.balance.lock().ok().and_then(|guard| *guard)
    }
}

impl BalanceStore for MemoryBalanceStore {
    fn load(&self) -> Result<Option<Decimal>> {
        let guard = self
            .balance
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        Ok(*guard)
    }

    fn save(&self, balance: Decimal) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Other("write refused by memory store".to_string()));
        }
        let mut guard = self
            .balance
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        *guard = Some(balance);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryBalanceStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(Decimal::TEN).unwrap();
        assert_eq!(store.load().unwrap(), Some(Decimal::TEN));
        assert_eq!(store.stored(), Some(Decimal::TEN));
    }

    #[test]
    fn test_failing_store_keeps_value() {
        let store = MemoryBalanceStore::failing(Some(Decimal::ONE));
        assert!(store.save(Decimal::TEN).is_err());
        assert_eq!(store.stored(), Some(Decimal::ONE));
    }
}
