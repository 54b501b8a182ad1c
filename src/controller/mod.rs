//! History list controller.
//!
//! Owns the snapshot of the history log, the pagination cursor and the search query,
//! and derives the list the rendering surface shows:
//!
//! ```text
//! store change ──► page 1 of the log ──► loaded items ──► filter + highlight ──► view
//! user action  ──► store write / cursor move / query change ──► (cycle repeats)
//! ```
//!
//! # States
//!
//! - `Initializing`: before the first store read
//! - `Ready`: page(s) loaded and displayed
//! - `LoadingMore`: placeholder rows appended while the next page is fetched
//!
//! Every store change, including ones caused by this controller's own writes, resets
//! pagination to page 1 and re-derives the view. Query changes only re-derive the view.
//! [`HistoryController::revision`] increments whenever the view changes so a renderer
//! knows to recompute layout.

pub mod collaborators;

use std::sync::mpsc::Receiver;

use anyhow::Result;
use tracing::{debug, error, info};

pub use collaborators::{
    COPY_SUCCESS_MESSAGE, ConfirmDialog, ConfirmPrompt, Confirmation, ENTRY_NOT_FOUND_MESSAGE,
    NoticeKind, Notifier, Preanswered, PromptIcon,
};

use crate::clipboard::{ClipboardProvider, copy_with_provider};
use crate::filters::{SearchQuery, filter_items};
use crate::models::{Entry, ViewItem};
use crate::pagination::Paginator;
use crate::store::{EntryStore, StoreChange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Initializing,
    Ready,
    LoadingMore,
}

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The log was rewritten without this many entries
    Deleted(usize),
    /// The user dismissed the confirmation; nothing changed
    Cancelled,
    /// No entry had the requested id; nothing changed
    NotFound,
}

pub struct HistoryController<S: EntryStore> {
    store: S,
    changes: Receiver<StoreChange>,
    log: Vec<Entry>,
    paginator: Paginator,
    loaded: Vec<ViewItem>,
    view: Vec<ViewItem>,
    query: SearchQuery,
    state: ControllerState,
    revision: u64,
}

impl<S: EntryStore> HistoryController<S> {
    pub fn new(mut store: S, paginator: Paginator) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            changes,
            log: Vec::new(),
            paginator,
            loaded: Vec::new(),
            view: Vec::new(),
            query: SearchQuery::default(),
            state: ControllerState::Initializing,
            revision: 0,
        }
    }

    /// Initial read of the store; afterwards changes arrive through notifications
    pub fn load(&mut self) -> Result<()> {
        // Anything queued before this read is already reflected in it
        while self.changes.try_recv().is_ok() {}

        let log = self.store.read()?;
        self.apply_log(log);
        Ok(())
    }

    /// Apply pending store notifications. Returns how many were drained.
    pub fn process_store_events(&mut self) -> usize {
        let mut latest = None;
        let mut count = 0;
        while let Ok(change) = self.changes.try_recv() {
            latest = Some(change);
            count += 1;
        }

        // Each change resets to page 1, so only the last one is observable
        if let Some(change) = latest {
            self.apply_log(change.log);
        }
        count
    }

    /// Ask the store to look for out-of-process changes, then apply notifications
    pub fn sync_store(&mut self) -> Result<usize> {
        self.store.sync()?;
        Ok(self.process_store_events())
    }

    fn apply_log(&mut self, log: Vec<Entry>) {
        self.log = log;
        self.paginator.reset();
        self.loaded = self.paginator.current_page(&self.log).iter().map(ViewItem::from_entry).collect();
        self.state = ControllerState::Ready;
        self.refresh_view();
        debug!(
            total = self.log.len(),
            loaded = self.loaded.len(),
            has_more = self.paginator.has_more(),
            "History log applied"
        );
    }

    fn refresh_view(&mut self) {
        self.view = filter_items(&self.loaded, &self.query);
        self.revision += 1;
    }

    /// Replace the search query and re-derive the view. Loaded entries are unaffected.
    pub fn set_query(&mut self, raw: &str) {
        let query = SearchQuery::new(raw);
        if query == self.query {
            return;
        }
        self.query = query;
        self.refresh_view();
        debug!(query = self.query.text(), shown = self.view.len(), "Search query changed");
    }

    /// Whether the "load more" affordance should be offered
    pub fn can_load_more(&self) -> bool {
        self.state == ControllerState::Ready && self.paginator.has_more()
    }

    /// Enter `LoadingMore`, appending one page of placeholder rows to the view.
    /// Returns false (and does nothing) when loading more is not available.
    pub fn begin_load_more(&mut self) -> bool {
        if !self.can_load_more() {
            return false;
        }

        self.state = ControllerState::LoadingMore;
        let placeholders = self.paginator.page_size();
        self.view.extend(std::iter::repeat_with(ViewItem::placeholder).take(placeholders));
        self.revision += 1;
        true
    }

    /// Fetch the next page, replace the placeholders with it and return to `Ready`.
    /// Returns the number of entries appended.
    pub fn finish_load_more(&mut self) -> usize {
        if self.state != ControllerState::LoadingMore {
            return 0;
        }

        let page = self.paginator.load_more(&self.log);
        let added = page.len();
        self.loaded.extend(page.iter().map(ViewItem::from_entry));
        self.state = ControllerState::Ready;
        self.refresh_view();

        debug!(
            page = self.paginator.page_number(),
            added,
            loaded = self.loaded.len(),
            has_more = self.paginator.has_more(),
            "Loaded more entries"
        );
        added
    }

    /// `begin_load_more` followed by `finish_load_more`; `None` if unavailable
    pub fn load_more(&mut self) -> Option<usize> {
        if !self.begin_load_more() {
            return None;
        }
        Some(self.finish_load_more())
    }

    /// Delete one entry after confirmation. An unknown id changes nothing and does not prompt.
    pub fn delete_entry(&mut self, id: &str, dialog: &mut dyn ConfirmDialog) -> Result<DeleteOutcome> {
        let current = self.store.read()?;
        if !current.iter().any(|entry| entry.id == id) {
            debug!(id, "Delete requested for unknown entry");
            return Ok(DeleteOutcome::NotFound);
        }

        if !dialog.confirm(&ConfirmPrompt::delete_entry())?.is_confirmed() {
            debug!(id, "Delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let before = current.len();
        let remaining: Vec<Entry> = current.into_iter().filter(|entry| entry.id != id).collect();
        let removed = before - remaining.len();

        self.store.write(remaining)?;
        info!(id, removed, "Deleted history entry");
        self.process_store_events();
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Clear the whole log after a destructive-action confirmation
    pub fn delete_all(&mut self, dialog: &mut dyn ConfirmDialog) -> Result<DeleteOutcome> {
        if !dialog.confirm(&ConfirmPrompt::delete_all())?.is_confirmed() {
            debug!("Delete all cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = self.store.read()?.len();
        self.store.write(Vec::new())?;
        info!(removed, "Deleted all history entries");
        self.process_store_events();
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Copy an entry's stored value (never the highlighted text) to the clipboard.
    /// Returns false when the id is unknown.
    pub fn copy_entry(
        &self,
        id: &str,
        clipboard: &mut dyn ClipboardProvider,
        notifier: &mut dyn Notifier,
    ) -> Result<bool> {
        let Some(entry) = self.log.iter().find(|entry| entry.id == id) else {
            notifier.error(ENTRY_NOT_FOUND_MESSAGE);
            return Ok(false);
        };

        if let Err(e) = copy_with_provider(&entry.value, clipboard) {
            error!(id, error = %e, "Clipboard write failed");
            return Err(e);
        }

        notifier.success(COPY_SUCCESS_MESSAGE);
        Ok(true)
    }

    /// Flip the `expand` flag of a loaded item. Returns false when no loaded item has `id`.
    pub fn toggle_expand(&mut self, id: &str) -> bool {
        let Some(pos) = self.loaded.iter().position(|item| item.id.as_deref() == Some(id)) else {
            return false;
        };

        let toggled = self.loaded[pos].with_expand(!self.loaded[pos].expand);
        self.loaded[pos] = toggled;
        self.refresh_view();
        true
    }

    /// Items to render, in order
    pub fn view(&self) -> &[ViewItem] {
        &self.view
    }

    /// Items loaded so far, before filtering
    pub fn loaded(&self) -> &[ViewItem] {
        &self.loaded
    }

    /// `min(page_number * page_size, total)`, the size of the loaded prefix
    pub fn loaded_len(&self) -> usize {
        self.paginator.loaded_len(self.log.len())
    }

    /// Snapshot of the full log as of the last store change
    pub fn log(&self) -> &[Entry] {
        &self.log
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// True until the first store read completes (initial skeleton)
    pub fn is_initializing(&self) -> bool {
        self.state == ControllerState::Initializing
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more()
    }

    pub fn page_number(&self) -> usize {
        self.paginator.page_number()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// Increments every time the view changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
