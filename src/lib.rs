//! Codebox History - browse, search and prune captured code snippets
//!
//! Snippets captured from web pages ("codeboxes") are stored as a newest-first log under
//! the `codebox-history` key of a JSON store document. This library provides:
//!
//! - Tolerant decoding of the stored log
//! - A store abstraction with change notifications (file-backed and in-memory)
//! - Page-at-a-time loading with a "has more" signal
//! - Case-insensitive search over value, date, link and remark with match highlighting
//! - A controller tying these together, plus delete/copy/expand actions
//!
//! # Example
//!
//! ```
//! use codebox_history::{Entry, HistoryController, MemoryStore, Paginator};
//!
//! let store = MemoryStore::with_entries(vec![
//!     Entry::new("1", "hello world"),
//!     Entry::new("2", "goodbye"),
//! ]);
//! let mut controller = HistoryController::new(store, Paginator::new(20));
//! controller.load()?;
//!
//! controller.set_query("WORLD");
//! assert_eq!(controller.view().len(), 1);
//! assert_eq!(controller.view()[0].value.to_string(), "hello <mark>world</mark>");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod parsers;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use clipboard::{ClipboardProvider, copy_to_clipboard};
pub use config::Config;
pub use controller::{DeleteOutcome, HistoryController};
pub use filters::{SearchQuery, filter_items};
pub use models::{Entry, Highlighted, ViewItem};
pub use pagination::{HasMorePolicy, Paginator};
pub use parsers::parse_history_log;
pub use store::{EntryStore, JsonFileStore, MemoryStore};
pub use utils::format_path_with_tilde;
