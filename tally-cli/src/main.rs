//! Tally CLI - a pocket bank and note keeper in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tally_core::services::Operation;

mod commands;
mod output;

use commands::{balance, bank, config, logs, note, profit, todo, user};

/// Tally - a pocket bank and note keeper in your terminal
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.tally)
    #[arg(long, global = true, env = "TALLY_DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive bank menu
    ///
    /// Choose 1-4 at the prompt. Anything else shows the menu again;
    /// only 4 exits.
    Bank,

    /// Show the current balance
    Balance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deposit money
    Deposit {
        /// Amount to deposit
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Withdraw money
    Withdraw {
        /// Amount to withdraw
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write and read notes
    Note {
        #[command(subcommand)]
        command: note::NoteCommands,
    },

    /// Write and read the todo
    Todo {
        #[command(subcommand)]
        command: todo::TodoCommands,
    },

    /// Create a user, and optionally an admin
    User {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Birthdate (MM/DD/YYYY)
        #[arg(long)]
        birth_date: Option<String>,
        /// Also create an admin with this email (password is prompted for)
        #[arg(long)]
        admin_email: Option<String>,
    },

    /// Calculate profit and write results.txt
    Profit {
        #[arg(long)]
        revenue: Option<String>,
        #[arg(long)]
        expenses: Option<String>,
        /// Tax rate in percent
        #[arg(long)]
        tax_rate: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = commands::resolve_data_dir(cli.dir)?;
    let dir = data_dir.as_path();

    match cli.command {
        Commands::Bank => bank::run(dir),
        Commands::Balance { json } => balance::run_check(dir, json),
        Commands::Deposit { amount, json } => {
            balance::run_change(dir, Operation::Deposit, &amount, json)
        }
        Commands::Withdraw { amount, json } => {
            balance::run_change(dir, Operation::Withdraw, &amount, json)
        }
        Commands::Note { command } => note::run(dir, command),
        Commands::Todo { command } => todo::run(dir, command),
        Commands::User {
            first_name,
            last_name,
            birth_date,
            admin_email,
        } => user::run(dir, first_name, last_name, birth_date, admin_email),
        Commands::Profit {
            revenue,
            expenses,
            tax_rate,
            json,
        } => profit::run(dir, revenue, expenses, tax_rate, json),
        Commands::Config { command } => config::run(dir, command),
        Commands::Logs { command } => logs::run(dir, command),
    }
}
