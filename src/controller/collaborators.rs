//! Interfaces to the dialog and notification surfaces the controller drives.
//!
//! The clipboard collaborator lives in [`crate::clipboard`].

use anyhow::Result;

/// Toast shown after a successful copy
pub const COPY_SUCCESS_MESSAGE: &str = "Copied!";
/// Toast shown when a copy targets an id that is no longer in the log
pub const ENTRY_NOT_FOUND_MESSAGE: &str = "Entry not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptIcon {
    Warning,
}

/// Contents of a modal confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub icon: PromptIcon,
    pub body: String,
    pub confirm_label: String,
    pub cancel_label: String,
    /// Render the confirm action as destructive
    pub danger: bool,
}

impl ConfirmPrompt {
    pub fn delete_entry() -> Self {
        Self {
            title: "Notice".to_string(),
            icon: PromptIcon::Warning,
            body: "Delete this record?".to_string(),
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
            danger: false,
        }
    }

    pub fn delete_all() -> Self {
        Self { body: "Delete all records?".to_string(), danger: true, ..Self::delete_entry() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        self == Confirmation::Confirmed
    }
}

/// Blocking confirmation prompt. Returning `Cancelled` aborts the pending action.
pub trait ConfirmDialog {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<Confirmation>;
}

/// A dialog whose answer is already known, e.g. `--yes` on the command line or a
/// modal the user has answered before the action runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preanswered(pub Confirmation);

impl ConfirmDialog for Preanswered {
    fn confirm(&mut self, _prompt: &ConfirmPrompt) -> Result<Confirmation> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Fire-and-forget toast notifications
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(NoticeKind::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(NoticeKind::Error, message);
    }
}
