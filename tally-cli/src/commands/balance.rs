//! Balance commands - one-shot check, deposit and withdraw

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use tally_core::domain::result::Result as CoreResult;
use tally_core::services::{BalanceResult, BankService, Operation};
use tally_core::{EntryPoint, LoggingService};

use super::{get_context, get_logger, log_failure, log_success, parse_amount};
use crate::output;

pub fn run_check(data_dir: &Path, json: bool) -> Result<()> {
    let ctx = get_context(data_dir)?;

    if let Some(warning) = ctx.bank_service.warning() {
        if !json {
            output::warning(warning);
        }
    }

    print_result(&ctx.bank_service.check(), json)?;
    if !json {
        println!("  Stored in {}", ctx.bank_service.location().dimmed());
    }
    Ok(())
}

pub fn run_change(data_dir: &Path, operation: Operation, amount: &str, json: bool) -> Result<()> {
    let mut ctx = get_context(data_dir)?;
    let logger = get_logger(data_dir, EntryPoint::Command);

    let result = apply(&mut ctx.bank_service, &logger, operation, amount)?;
    print_result(&result, json)
}

/// Parse `amount` and apply `operation` with it. The outcome is logged
/// under the operation's name.
pub(crate) fn apply(
    bank: &mut BankService,
    logger: &Option<LoggingService>,
    operation: Operation,
    amount: &str,
) -> CoreResult<BalanceResult> {
    let command = operation.as_str();
    let result = parse_amount(amount).and_then(|amount| match operation {
        Operation::Deposit => bank.deposit(amount),
        Operation::Withdraw => bank.withdraw(amount),
        Operation::Check => Ok(bank.check()),
    });

    match &result {
        Ok(_) => log_success(logger, command),
        Err(e) => log_failure(logger, command, e),
    }
    result
}

fn print_result(result: &BalanceResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match result.operation {
        Operation::Check => {
            println!("Your balance is {}", output::money(result.balance).bold());
        }
        Operation::Deposit | Operation::Withdraw => {
            output::success(&format!(
                "Balance updated! New amount: {}",
                output::money(result.balance)
            ));
            if let Some(path) = &result.saved_to {
                println!("  Saved to {}", path.dimmed());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::fs;
    use tally_core::adapters::MemoryBalanceStore;
    use tally_core::{Error, Outcome};
    use tempfile::tempdir;

    fn logger(dir: &Path) -> Option<LoggingService> {
        get_logger(dir, EntryPoint::Command)
    }

    #[test]
    fn test_rejected_withdraw_leaves_balance_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("balance.txt"), "100").unwrap();

        let err = run_change(dir.path(), Operation::Withdraw, "150", false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid amount. You can't withdraw more than you have."
        );
        assert_eq!(fs::read_to_string(dir.path().join("balance.txt")).unwrap(), "100");
    }

    #[test]
    fn test_unparsable_amount_leaves_balance_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("balance.txt"), "100").unwrap();

        assert!(run_change(dir.path(), Operation::Deposit, "ten", false).is_err());
        assert_eq!(fs::read_to_string(dir.path().join("balance.txt")).unwrap(), "100");
    }

    #[test]
    fn test_accepted_deposit_is_written() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("balance.txt"), "100").unwrap();

        run_change(dir.path(), Operation::Deposit, "5.5", true).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("balance.txt")).unwrap(), "105.5");
    }

    #[test]
    fn test_apply_logs_outcomes() {
        let dir = tempdir().unwrap();
        let logger = logger(dir.path());
        let mut bank = BankService::open(Box::new(MemoryBalanceStore::new()), Decimal::TEN);

        apply(&mut bank, &logger, Operation::Deposit, "5").unwrap();
        let err = apply(&mut bank, &logger, Operation::Withdraw, "100").unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds));
        assert!(apply(&mut bank, &logger, Operation::Withdraw, "-1").is_err());
        assert_eq!(bank.balance(), Decimal::from(15));

        let entries = logger.as_ref().unwrap().recent(10).unwrap();
        let outcomes: Vec<_> = entries.iter().map(|e| (e.command.as_str(), e.outcome)).collect();
        assert_eq!(
            outcomes,
            vec![
                ("withdraw", Outcome::Rejected),
                ("withdraw", Outcome::Rejected),
                ("deposit", Outcome::Ok),
            ]
        );
    }
}
