use std::sync::mpsc::Receiver;

use anyhow::Result;
use tracing::debug;

use super::{EntryStore, StoreChange, Subscribers};
use crate::models::Entry;

/// History log kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    log: Vec<Entry>,
    subscribers: Subscribers,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(log: Vec<Entry>) -> Self {
        Self { log, ..Self::default() }
    }

    /// Number of writes performed since creation
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl EntryStore for MemoryStore {
    fn read(&self) -> Result<Vec<Entry>> {
        Ok(self.log.clone())
    }

    fn write(&mut self, log: Vec<Entry>) -> Result<()> {
        debug!(entries = log.len(), "Writing history log to memory store");
        self.subscribers.notify(&log);
        self.log = log;
        self.write_count += 1;
        Ok(())
    }

    fn subscribe(&mut self) -> Receiver<StoreChange> {
        self.subscribers.subscribe()
    }
}
