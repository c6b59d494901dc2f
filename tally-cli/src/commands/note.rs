//! Note command - write, show and list stored notes

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;
use tally_core::services::NoteService;
use tally_core::{Document, EntryPoint, LoggingService};

use super::{get_context, get_logger, log_failure, log_success, value_or_prompt};
use crate::output;

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Write a new note
    New {
        /// Note title (prompted for when missing)
        #[arg(long)]
        title: Option<String>,
        /// Note content (prompted for when missing)
        #[arg(long)]
        content: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a stored note by file name or title
    Show {
        /// `shopping_list.json` or `Shopping List`
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List stored notes and todos
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(data_dir: &Path, command: NoteCommands) -> Result<()> {
    match command {
        NoteCommands::New { title, content, json } => run_new(data_dir, title, content, json),
        NoteCommands::Show { name, json } => run_show(data_dir, &name, json),
        NoteCommands::List { json } => run_list(data_dir, json),
    }
}

fn run_new(data_dir: &Path, title: Option<String>, content: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context(data_dir)?;
    let logger = get_logger(data_dir, EntryPoint::Command);

    let title = value_or_prompt(title, "Note title")?;
    let content = value_or_prompt(content, "Note content")?;

    let note = match ctx.note_service.create_note(&title, &content) {
        Ok(note) => note,
        Err(e) => {
            log_failure(&logger, "note new", &e);
            return Err(e.into());
        }
    };

    save_data(&ctx.note_service, &logger, &note, json)
}

/// Display a document, then save it and report the outcome.
///
/// Shared by notes and todos.
pub fn save_data<D: Document>(
    service: &NoteService,
    logger: &Option<LoggingService>,
    document: &D,
    json: bool,
) -> Result<()> {
    let command = format!("{} new", D::KIND);

    if !json {
        println!("{}", document.display());
    }

    match service.save(document) {
        Ok(saved) => {
            log_success(logger, &command);
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                output::success(&format!("Saving the {} succeeded!", D::KIND));
            }
            Ok(())
        }
        Err(e) => {
            log_failure(logger, &command, &e);
            output::error(&format!("Saving the {} failed.", D::KIND));
            Err(e.into())
        }
    }
}

fn run_show(data_dir: &Path, name: &str, json: bool) -> Result<()> {
    let ctx = get_context(data_dir)?;
    let note = ctx.note_service.load_note(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print!("{}", note.display());
    }
    Ok(())
}

fn run_list(data_dir: &Path, json: bool) -> Result<()> {
    let ctx = get_context(data_dir)?;
    let documents = ctx.note_service.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    if documents.is_empty() {
        output::info("Nothing stored yet.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["File", "Kind", "Title / Text", "Created"]);
    for doc in documents {
        table.add_row(vec![
            doc.file_name,
            doc.kind.to_string(),
            doc.label,
            doc.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    println!("{}", table);

    Ok(())
}
