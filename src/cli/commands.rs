use std::collections::HashSet;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use super::console::{ConsoleConfirm, ConsoleNotifier};
use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::controller::{
    ConfirmDialog, Confirmation, DeleteOutcome, HistoryController, Preanswered,
};
use crate::models::{CREATED_AT_FORMAT, ROW_PREVIEW_CHARS, ViewItem};
use crate::store::JsonFileStore;
use crate::tui::run_interactive;
use crate::utils::format_path_with_tilde;
use crate::utils::terminal::single_line;

#[derive(Parser)]
#[command(name = "codebox-history")]
#[command(version = "0.1.0")]
#[command(about = "Browse, search and delete captured codebox history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List entries, newest first, one page at a time
    List {
        /// Only show entries whose value, date, link or remark contain this text
        #[arg(short, long)]
        query: Option<String>,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Show statistics about the history
    Stats,
    /// Delete one entry by id
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy an entry's value to the clipboard
    Copy { id: String },
    /// Open the interactive browser
    Browse,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = Config::load()?;
    let store = JsonFileStore::open(config.store_path()?)?;
    let mut controller = HistoryController::new(store, config.paginator());
    controller.load()?;

    match command {
        Commands::List { query, pages } => list(&mut controller, &config, query.as_deref(), pages),
        Commands::Stats => show_stats(&controller),
        Commands::Delete { id, yes } => delete(&mut controller, &id, yes),
        Commands::Clear { yes } => clear(&mut controller, yes),
        Commands::Copy { id } => copy(&controller, &id),
        Commands::Browse => run_interactive(controller),
    }
}

fn dialog_for(yes: bool) -> Box<dyn ConfirmDialog> {
    if yes {
        Box::new(Preanswered(Confirmation::Confirmed))
    } else {
        Box::new(ConsoleConfirm::new())
    }
}

fn list(
    controller: &mut HistoryController<JsonFileStore>,
    config: &Config,
    query: Option<&str>,
    pages: usize,
) -> Result<()> {
    for _ in 1..pages.max(1) {
        if controller.load_more().is_none() {
            break;
        }
    }
    if let Some(query) = query {
        controller.set_query(query);
    }

    for item in controller.view() {
        println!("{}", format_item(item, config));
    }

    println!();
    println!(
        "Showing {} of {} loaded ({} total)",
        controller.view().len(),
        controller.loaded_len(),
        controller.log().len()
    );
    if controller.can_load_more() {
        println!("More entries available: use --pages {}", controller.page_number() + 1);
    }

    Ok(())
}

fn format_item(item: &ViewItem, config: &Config) -> String {
    let initial = item.avatar_initial().map(String::from).unwrap_or_else(|| "?".to_string());
    let id = item.id.as_deref().unwrap_or("-");
    let created_at = if item.created_at.is_empty() {
        "-".to_string()
    } else {
        item.created_at.render(&config.highlight_open, &config.highlight_close)
    };
    let preview = item
        .value
        .truncate_chars(ROW_PREVIEW_CHARS)
        .render(&config.highlight_open, &config.highlight_close);

    format!("[{}] {}  {}\n    {}", single_line(&initial), single_line(id), created_at, single_line(&preview))
}

fn show_stats(controller: &HistoryController<JsonFileStore>) -> Result<()> {
    let log = controller.log();
    let sources: HashSet<&str> =
        log.iter().map(|e| e.from.as_str()).filter(|s| !s.is_empty()).collect();
    let with_link = log.iter().filter(|e| e.link.is_some()).count();

    println!("Codebox History Statistics");
    println!("==========================");
    println!("Total entries: {}", log.len());
    println!("  Sources: {}", sources.len());
    println!("  With link: {}", with_link);
    println!();
    println!("Store: {}", format_path_with_tilde(controller.store().path()));

    let mut timestamps: Vec<_> = log.iter().filter_map(|e| e.created_at).collect();
    timestamps.sort();
    if let Some(oldest) = timestamps.first() {
        println!("Oldest entry: {}", oldest.format(CREATED_AT_FORMAT));
    }
    if let Some(newest) = timestamps.last() {
        println!("Newest entry: {}", newest.format(CREATED_AT_FORMAT));
    }

    Ok(())
}

fn delete(controller: &mut HistoryController<JsonFileStore>, id: &str, yes: bool) -> Result<()> {
    let mut dialog = dialog_for(yes);
    match controller.delete_entry(id, dialog.as_mut())? {
        DeleteOutcome::Deleted(_) => println!("Deleted entry {}", single_line(id)),
        DeleteOutcome::Cancelled => println!("Cancelled"),
        DeleteOutcome::NotFound => println!("No entry with id {}", single_line(id)),
    }
    Ok(())
}

fn clear(controller: &mut HistoryController<JsonFileStore>, yes: bool) -> Result<()> {
    let mut dialog = dialog_for(yes);
    match controller.delete_all(dialog.as_mut())? {
        DeleteOutcome::Deleted(count) => println!("Deleted {} entries", count),
        DeleteOutcome::Cancelled | DeleteOutcome::NotFound => println!("Cancelled"),
    }
    Ok(())
}

fn copy(controller: &HistoryController<JsonFileStore>, id: &str) -> Result<()> {
    // Unknown ids fail without touching the system clipboard
    if !controller.log().iter().any(|entry| entry.id == id) {
        bail!("No entry with id {}", single_line(id));
    }

    let mut clipboard = SystemClipboard::new()?;
    if !controller.copy_entry(id, &mut clipboard, &mut ConsoleNotifier)? {
        bail!("No entry with id {}", single_line(id));
    }
    Ok(())
}
