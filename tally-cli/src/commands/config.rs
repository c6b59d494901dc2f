//! Config command - show and change settings.json

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use tally_core::config::Config;

use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings (environment overrides included)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set {
        /// balanceFile, defaultBalance, notesDir, jsonKeys or prettyJson
        key: String,
        value: String,
    },
}

pub fn run(data_dir: &Path, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(data_dir)?;
            let json_keys = match config.json_keys {
                tally_core::JsonKeyStyle::Snake => "snake",
                tally_core::JsonKeyStyle::Pascal => "pascal",
            };

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "dataDir": data_dir.to_string_lossy(),
                        "balanceFile": config.balance_file,
                        "defaultBalance": config.default_balance,
                        "notesDir": config.notes_dir,
                        "jsonKeys": json_keys,
                        "prettyJson": config.pretty_json,
                    }))?
                );
                return Ok(());
            }

            println!("{}", "Settings".bold());
            println!("  Data directory:  {}", data_dir.display());
            println!("  Balance file:    {}", config.balance_file);
            println!("  Default balance: {}", output::money(config.default_balance));
            println!("  Notes directory: {}", config.notes_dir);
            println!("  JSON keys:       {}", json_keys);
            println!("  Pretty JSON:     {}", config.pretty_json);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_file(data_dir)?;
            config.set(&key, &value)?;
            config.save(data_dir)?;
            output::success(&format!("{} set to {}", key, value.trim()));
        }
    }

    Ok(())
}
