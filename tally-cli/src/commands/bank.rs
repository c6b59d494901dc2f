//! Bank command - interactive numbered menu over the balance file

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use tally_core::services::{BankService, LoggingService, Operation};
use tally_core::EntryPoint;

use super::balance::apply;
use super::{get_context, get_logger, log_success};
use crate::output;

/// A line of the bank menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Check,
    Deposit,
    Withdraw,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 4] = [
        MenuChoice::Check,
        MenuChoice::Deposit,
        MenuChoice::Withdraw,
        MenuChoice::Exit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::Check => "Check balance",
            MenuChoice::Deposit => "Deposit money",
            MenuChoice::Withdraw => "Withdraw money",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse the number typed at the prompt (`1`..`4`)
    pub fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

fn present_options() {
    println!();
    println!("{}", "What do you want to do?".bold());
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, choice.label());
    }
}

fn prompt(text: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(text)
        .allow_empty(true)
        .interact_text()?)
}

pub fn run(data_dir: &Path) -> Result<()> {
    let mut ctx = get_context(data_dir)?;
    let logger = get_logger(data_dir, EntryPoint::Menu);

    if let Some(warning) = ctx.bank_service.warning() {
        output::error("ERROR");
        output::error(warning);
        println!("---------");
    }

    println!("{}", "Welcome to Tally Bank!".bold());

    loop {
        present_options();

        let choice = match MenuChoice::parse(&prompt("Your choice")?) {
            Some(choice) => choice,
            None => {
                output::warning("Please pick one of the numbers above.");
                continue;
            }
        };

        match choice {
            MenuChoice::Check => {
                println!("Your balance is {}", output::money(ctx.bank_service.balance()));
            }
            MenuChoice::Deposit => {
                let text = prompt("Your deposit")?;
                change(&mut ctx.bank_service, &logger, Operation::Deposit, &text);
            }
            MenuChoice::Withdraw => {
                let text = prompt("Withdrawal amount")?;
                change(&mut ctx.bank_service, &logger, Operation::Withdraw, &text);
            }
            MenuChoice::Exit => {
                log_success(&logger, "bank");
                println!("Goodbye!");
                println!("Thanks for choosing our bank");
                return Ok(());
            }
        }
    }
}

/// Apply one deposit or withdrawal and report it. Bad input is printed
/// and the loop carries on. Returns whether the change was accepted.
fn change(
    bank: &mut BankService,
    logger: &Option<LoggingService>,
    operation: Operation,
    text: &str,
) -> bool {
    match apply(bank, logger, operation, text) {
        Ok(result) => {
            output::success(&format!(
                "Balance updated! New amount: {}",
                output::money(result.balance)
            ));
            true
        }
        Err(e) => {
            output::error(&e.to_string());
            false
        }
    }
}
