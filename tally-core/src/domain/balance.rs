//! Account balance domain model

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Balance used when no balance file exists yet
pub const DEFAULT_OPENING_BALANCE: Decimal = Decimal::ONE_THOUSAND;

/// A single cash account.
///
/// The balance can only change through [`Account::deposit`] and
/// [`Account::withdraw`], both of which reject invalid amounts without
/// touching the balance. An accepted operation never leaves it negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    balance: Decimal,
}

impl Account {
    pub fn new(balance: Decimal) -> Self {
        Self { balance }
    }

    /// Account holding [`DEFAULT_OPENING_BALANCE`]
    pub fn opening() -> Self {
        Self::new(DEFAULT_OPENING_BALANCE)
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Add `amount` and return the new balance
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal> {
        ensure_positive(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| Error::invalid_amount("The new balance would be too large."))?;
        Ok(self.balance)
    }

    /// Subtract `amount` and return the new balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal> {
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(Error::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::opening()
    }
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_amount("Must be greater than 0."));
    }
    Ok(())
}

/// Parse the contents of a balance file.
///
/// Surrounding whitespace is ignored. Scientific notation (`1e+06`) is
/// accepted since older files were written from a float formatter.
pub fn parse_balance(text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::parse("balance file is empty"));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| Error::parse(format!("'{}' is not a decimal number: {}", trimmed, e)))
}

/// Render a balance the way it is stored on disk (`1250.5`, `1000`)
pub fn format_balance(balance: Decimal) -> String {
    balance.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_opening_balance() {
        assert_eq!(Account::opening().balance(), dec("1000"));
        assert_eq!(Account::default(), Account::opening());
    }

    #[test]
    fn test_deposit_adds_to_balance() {
        let mut account = Account::new(dec("100"));
        let balance = account.deposit(dec("50.25")).unwrap();
        assert_eq!(balance, dec("150.25"));
        assert_eq!(account.balance(), dec("150.25"));
    }

    #[test]
    fn test_deposit_rejects_zero_and_negative() {
        let mut account = Account::new(dec("100"));

        let err = account.deposit(Decimal::ZERO).unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));
        let err = account.deposit(dec("-5")).unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));

        assert_eq!(account.balance(), dec("100"));
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut account = Account::new(Decimal::MAX);
        let err = account.deposit(Decimal::ONE).unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));
        assert_eq!(account.balance(), Decimal::MAX);
    }

    #[test]
    fn test_withdraw_subtracts_from_balance() {
        let mut account = Account::new(dec("100"));
        assert_eq!(account.withdraw(dec("40")).unwrap(), dec("60"));
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut account = Account::new(dec("100"));
        assert_eq!(account.withdraw(dec("100")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_withdraw_more_than_balance_is_rejected() {
        let mut account = Account::new(dec("100"));
        let err = account.withdraw(dec("100.01")).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds));
        assert_eq!(account.balance(), dec("100"));
    }

    #[test]
    fn test_withdraw_rejects_non_positive() {
        let mut account = Account::new(dec("100"));
        assert!(matches!(
            account.withdraw(dec("-1")).unwrap_err(),
            Error::InvalidAmount(_)
        ));
        assert_eq!(account.balance(), dec("100"));
    }

    #[test]
    fn test_balance_never_negative_over_sequence() {
        let mut account = Account::new(dec("10"));
        let amounts = ["3", "4", "5", "2.5", "0.5", "1"];
        for amount in amounts {
            let _ = account.withdraw(dec(amount));
            assert!(account.balance() >= Decimal::ZERO);
        }
        assert_eq!(account.balance(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_balance() {
        assert_eq!(parse_balance("1250.5").unwrap(), dec("1250.5"));
        assert_eq!(parse_balance("  42\n").unwrap(), dec("42"));
        assert_eq!(parse_balance("1e+06").unwrap(), dec("1000000"));
    }

    #[test]
    fn test_parse_balance_rejects_garbage() {
        assert!(matches!(parse_balance("abc").unwrap_err(), Error::Parse(_)));
        assert!(matches!(parse_balance("").unwrap_err(), Error::Parse(_)));
    }

    #[test]
    fn test_format_balance_is_normalized() {
        assert_eq!(format_balance(dec("1250.50")), "1250.5");
        assert_eq!(format_balance(dec("1000.00")), "1000");
        assert_eq!(format_balance(Decimal::ZERO), "0");
    }

    #[test]
    fn test_format_then_parse_is_identity() {
        let value = dec("0.1") + dec("0.2");
        assert_eq!(parse_balance(&format_balance(value)).unwrap(), dec("0.3"));
    }
}
