//! Bank service - the balance file flow
//!
//! Loads the balance once, then applies deposits and withdrawals. Every
//! accepted change is written back to the store before it becomes visible;
//! rejected changes touch neither memory nor disk.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::Account;
use crate::ports::BalanceStore;

/// What a bank operation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Check,
    Deposit,
    Withdraw,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Check => "check",
            Operation::Deposit => "deposit",
            Operation::Withdraw => "withdraw",
        }
    }
}

/// Result of a bank operation (for CLI / JSON output)
#[derive(Debug, Clone, Serialize)]
pub struct BalanceResult {
    pub operation: Operation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub balance: Decimal,
    /// Set when the operation wrote the balance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

/// Bank service over a single account
pub struct BankService {
    store: Box<dyn BalanceStore>,
    account: Account,
    warning: Option<String>,
}

impl BankService {
    /// Load the balance from `store`.
    ///
    /// A missing or unreadable balance falls back to `default_balance`; the
    /// reason is kept in [`BankService::warning`] instead of failing.
    /// A negative `default_balance` is raised to zero.
    pub fn open(store: Box<dyn BalanceStore>, default_balance: Decimal) -> Self {
        let default_balance = default_balance.max(Decimal::ZERO);
        let (balance, warning) = match store.load() {
            Ok(Some(balance)) if balance >= Decimal::ZERO => (balance, None),
            Ok(Some(_)) | Err(Error::Parse(_)) => (
                default_balance,
                Some("Failed to parse stored balance value.".to_string()),
            ),
            Ok(None) => (
                default_balance,
                Some("Failed to find balance file.".to_string()),
            ),
            Err(e) => (
                default_balance,
                Some(format!("Failed to read balance file: {}", e)),
            ),
        };

        Self {
            store,
            account: Account::new(balance),
            warning,
        }
    }

    /// Why the default balance is in use, if it is
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    pub fn check(&self) -> BalanceResult {
        BalanceResult {
            operation: Operation::Check,
            amount: None,
            balance: self.balance(),
            saved_to: None,
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<BalanceResult> {
        self.apply(Operation::Deposit, amount, |account| account.deposit(amount))
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<BalanceResult> {
        self.apply(Operation::Withdraw, amount, |account| account.withdraw(amount))
    }

    fn apply<F>(&mut self, operation: Operation, amount: Decimal, change: F) -> Result<BalanceResult>
    where
        F: FnOnce(&mut Account) -> Result<Decimal>,
    {
        let mut next = self.account;
        let balance = change(&mut next)?;

        self.store.save(balance)?;
        self.account = next;
        self.warning = None;

        Ok(BalanceResult {
            operation,
            amount: Some(amount),
            balance,
            saved_to: Some(self.store.location()),
        })
    }
}
