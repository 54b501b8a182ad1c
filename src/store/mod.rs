//! Entry store adapters
//!
//! The history log lives in an external key-value store under [`HISTORY_KEY`] and is
//! always read and written in full. Every write (including ones made by this process)
//! is announced to subscribers as a [`StoreChange`] carrying the new log, delivered in
//! write order over a channel.
//!
//! - [`MemoryStore`] - In-process store, used by tests and embedders
//! - [`JsonFileStore`] - JSON document on disk with atomic writes and staleness detection

pub mod file;
pub mod memory;

use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::Result;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::Entry;

/// Logical key the history log is stored under
pub const HISTORY_KEY: &str = "codebox-history";

/// Notification that the stored log was replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub log: Vec<Entry>,
}

/// Read/write access to the persisted history log
pub trait EntryStore {
    /// Current full log; empty if nothing was ever stored
    fn read(&self) -> Result<Vec<Entry>>;

    /// Replace the full log and notify subscribers
    fn write(&mut self, log: Vec<Entry>) -> Result<()>;

    /// Receive one [`StoreChange`] per logical write, in write order
    fn subscribe(&mut self) -> Receiver<StoreChange>;

    /// Look for changes made outside this process and notify subscribers if found.
    /// Returns whether a change was detected.
    fn sync(&mut self) -> Result<bool> {
        Ok(false)
    }
}

/// Fan-out of store changes to every live subscriber
#[derive(Debug, Default)]
pub struct Subscribers {
    senders: Vec<Sender<StoreChange>>,
}

impl Subscribers {
    pub fn subscribe(&mut self) -> Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Send the new log to all subscribers, dropping those whose receiver is gone
    pub fn notify(&mut self, log: &[Entry]) {
        self.senders.retain(|tx| tx.send(StoreChange { log: log.to_vec() }).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
