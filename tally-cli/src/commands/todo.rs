//! Todo command - the single `todo.json` entry

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use tally_core::{Document, EntryPoint};

use super::note::save_data;
use super::{get_context, get_logger, log_failure, value_or_prompt};

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Write the todo, replacing the previous one
    New {
        /// Todo text (prompted for when missing)
        #[arg(long)]
        text: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored todo
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(data_dir: &Path, command: TodoCommands) -> Result<()> {
    match command {
        TodoCommands::New { text, json } => {
            let ctx = get_context(data_dir)?;
            let logger = get_logger(data_dir, EntryPoint::Command);

            let text = value_or_prompt(text, "Todo text")?;
            let todo = match ctx.note_service.create_todo(&text) {
                Ok(todo) => todo,
                Err(e) => {
                    log_failure(&logger, "todo new", &e);
                    return Err(e.into());
                }
            };

            save_data(&ctx.note_service, &logger, &todo, json)
        }
        TodoCommands::Show { json } => {
            let ctx = get_context(data_dir)?;
            let todo = ctx.note_service.load_todo()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&todo)?);
            } else {
                println!("{}", todo.display());
            }
            Ok(())
        }
    }
}
