//! TUI application state and event handling.
//!
//! The `App` wraps a [`HistoryController`] and translates key presses into controller
//! operations:
//!
//! - **Search**: every keystroke re-derives the highlighted view
//! - **Pagination**: `Ctrl+L` (or moving past the last row) appends the next page; the
//!   placeholder rows are drawn for one frame before the page replaces them
//! - **Delete**: opens a confirmation modal, the controller runs once it is answered
//! - **Copy**: writes the stored value of the selected entry to the system clipboard
//! - **Store sync**: the store file is polled so edits from other processes show up
//!
//! Rendering is skipped unless something changed; the controller's revision counter
//! tells the app when the view was re-derived.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::warn;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, SystemClipboard};
use crate::controller::{
    ConfirmPrompt, Confirmation, ControllerState, DeleteOutcome, ENTRY_NOT_FOUND_MESSAGE,
    HistoryController, NoticeKind, Notifier, Preanswered,
};
use crate::store::EntryStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// How often the store is checked for outside changes
const STORE_SYNC_INTERVAL_MS: u64 = 1000;
/// Longest search query accepted from the keyboard
const MAX_QUERY_CHARS: usize = 256;
/// Rows moved by PageUp / PageDown
const PAGE_JUMP: isize = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Status bar toast; the TUI's [`Notifier`]
#[derive(Debug, Default)]
pub struct StatusLine {
    message: Option<StatusMessage>,
}

impl StatusLine {
    pub fn current(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Drop the message once it has expired. Returns true if one was dropped.
    fn clear_expired(&mut self, now: Instant) -> bool {
        if self.message.as_ref().is_some_and(|msg| now >= msg.expires_at) {
            self.message = None;
            return true;
        }
        false
    }
}

impl Notifier for StatusLine {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        let (icon, message_type, duration_ms) = match kind {
            NoticeKind::Success => ("✓", MessageType::Success, STATUS_SUCCESS_DURATION_MS),
            NoticeKind::Error => ("✗", MessageType::Error, STATUS_ERROR_DURATION_MS),
        };
        self.message = Some(StatusMessage {
            text: format!("{} {}", icon, message),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
    }
}

/// Destructive action waiting on the confirmation modal
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingAction {
    DeleteEntry(String),
    DeleteAll,
}

#[derive(Debug)]
struct PendingConfirm {
    action: PendingAction,
    prompt: ConfirmPrompt,
}

pub struct App<S: EntryStore> {
    controller: HistoryController<S>,
    selected_idx: usize,
    search_query: String,
    should_quit: bool,
    status: StatusLine,
    pending: Option<PendingConfirm>,
    // Created on first copy so a headless session can still browse
    clipboard: Option<Box<dyn ClipboardProvider>>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
    last_revision: u64,
    last_sync: Instant,
}

impl<S: EntryStore> App<S> {
    pub fn new(controller: HistoryController<S>) -> Self {
        let last_revision = controller.revision();
        Self {
            controller,
            selected_idx: 0,
            search_query: String::new(),
            should_quit: false,
            status: StatusLine::default(),
            pending: None,
            clipboard: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
            last_revision,
            last_sync: Instant::now(),
        }
    }

    /// Use `clipboard` instead of the system clipboard
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn controller(&self) -> &HistoryController<S> {
        &self.controller
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            if self.status.clear_expired(Instant::now()) {
                self.needs_redraw = true;
            }
            self.sync_if_due();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            // Placeholders have been on screen for a frame; swap in the real page
            if self.controller.state() == ControllerState::LoadingMore {
                self.finish_loading();
                continue;
            }

            let action = poll_event(Duration::from_millis(100), self.pending.is_some())?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            items: self.controller.view(),
            selected_idx: self.selected_idx,
            search_query: &self.search_query,
            loaded_count: self.controller.loaded_len(),
            total_count: self.controller.log().len(),
            initializing: self.controller.is_initializing(),
            loading_more: self.controller.state() == ControllerState::LoadingMore,
            can_load_more: self.controller.can_load_more(),
            status_message: self.status.current(),
            modal: self.pending.as_ref().map(|pending| &pending.prompt),
        }
    }

    /// Pick up a re-derived view: keep the selection in range and schedule a redraw
    fn observe_revision(&mut self) {
        let revision = self.controller.revision();
        if revision == self.last_revision {
            return;
        }
        self.last_revision = revision;

        let len = self.controller.view().len();
        self.selected_idx = self.selected_idx.min(len.saturating_sub(1));
        self.needs_redraw = true;
    }

    fn sync_if_due(&mut self) {
        if self.last_sync.elapsed() < Duration::from_millis(STORE_SYNC_INTERVAL_MS) {
            return;
        }
        self.last_sync = Instant::now();

        if let Err(e) = self.controller.sync_store() {
            warn!(error = %e, "Failed to sync history store");
            self.status.error(&format!("Store error: {}", e));
            self.needs_redraw = true;
        }
        self.observe_revision();
    }

    fn finish_loading(&mut self) {
        self.controller.finish_load_more();
        self.observe_revision();
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.apply_query();
                }
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => {
                // Moving past the last row pulls in the next page
                let len = self.controller.view().len();
                if len > 0 && self.selected_idx + 1 >= len {
                    self.controller.begin_load_more();
                } else {
                    self.move_selection(1);
                }
            }
            Action::PageUp => self.move_selection(-PAGE_JUMP),
            Action::PageDown => self.move_selection(PAGE_JUMP),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::CopyEntry => self.copy_selected(),
            Action::DeleteEntry => match self.selected_id() {
                Some(id) => self.open_modal(PendingAction::DeleteEntry(id)),
                None => self.status.error("No entry selected"),
            },
            Action::DeleteAll => {
                if self.controller.log().is_empty() {
                    self.status.error("Nothing to delete");
                } else {
                    self.open_modal(PendingAction::DeleteAll);
                }
            }
            Action::LoadMore => {
                if !self.controller.begin_load_more() {
                    self.status.error("No more entries");
                }
            }
            Action::ToggleExpand => {
                if let Some(id) = self.selected_id() {
                    self.controller.toggle_expand(&id);
                }
            }
            Action::Refresh => match self.controller.load() {
                Ok(()) => self.status.success("Reloaded"),
                Err(e) => self.status.error(&format!("Reload failed: {}", e)),
            },
            Action::Confirm => {
                if let Some(pending) = self.pending.take() {
                    self.run_confirmed(pending.action);
                }
            }
            Action::Cancel => self.pending = None,
            Action::None => {}
        }

        self.observe_revision();
        self.needs_redraw = true;
    }

    fn selected_id(&self) -> Option<String> {
        self.controller.view().get(self.selected_idx).and_then(|item| item.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.controller.view().len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);
    }

    fn update_search(&mut self, c: char) {
        if self.search_query.chars().count() < MAX_QUERY_CHARS {
            self.search_query.push(c);
            self.apply_query();
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.apply_query();
        }
    }

    fn apply_query(&mut self) {
        self.controller.set_query(&self.search_query);
        self.selected_idx = 0;
    }

    fn open_modal(&mut self, action: PendingAction) {
        let prompt = match action {
            PendingAction::DeleteEntry(_) => ConfirmPrompt::delete_entry(),
            PendingAction::DeleteAll => ConfirmPrompt::delete_all(),
        };
        self.pending = Some(PendingConfirm { action, prompt });
    }

    /// The modal was answered with yes; hand the controller that answer
    fn run_confirmed(&mut self, action: PendingAction) {
        let mut answered = Preanswered(Confirmation::Confirmed);
        let result = match &action {
            PendingAction::DeleteEntry(id) => self.controller.delete_entry(id, &mut answered),
            PendingAction::DeleteAll => self.controller.delete_all(&mut answered),
        };

        match (result, action) {
            (Ok(DeleteOutcome::Deleted(_)), PendingAction::DeleteEntry(_)) => {
                self.status.success("Deleted")
            }
            (Ok(DeleteOutcome::Deleted(count)), PendingAction::DeleteAll) => {
                self.status.success(&format!("Deleted {} entries", count))
            }
            (Ok(DeleteOutcome::NotFound), _) => self.status.error(ENTRY_NOT_FOUND_MESSAGE),
            (Ok(DeleteOutcome::Cancelled), _) => {}
            (Err(e), _) => self.status.error(&format!("Delete failed: {}", e)),
        }
    }

    fn copy_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status.error("No entry to copy");
            return;
        };

        if self.clipboard.is_none() {
            match SystemClipboard::new() {
                Ok(clipboard) => self.clipboard = Some(Box::new(clipboard)),
                Err(e) => {
                    self.status.error(&format!("Clipboard error: {}", e));
                    return;
                }
            }
        }

        let Some(clipboard) = self.clipboard.as_mut() else {
            return;
        };
        if let Err(e) = self.controller.copy_entry(&id, clipboard.as_mut(), &mut self.status) {
            self.status.error(&format!("Clipboard error: {}", e));
        }
    }
}
