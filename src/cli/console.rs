//! Terminal implementations of the controller's dialog and notification collaborators

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use anyhow::{Context, Result};

use crate::controller::{ConfirmDialog, ConfirmPrompt, Confirmation, NoticeKind, Notifier};

/// Asks for confirmation on a line-based console; only `y`/`yes` confirms
pub struct ConsoleConfirm<R, W> {
    input: R,
    output: W,
}

impl ConsoleConfirm<StdinLock<'static>, Stderr> {
    pub fn new() -> Self {
        Self { input: io::stdin().lock(), output: io::stderr() }
    }
}

impl Default for ConsoleConfirm<StdinLock<'static>, Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> ConsoleConfirm<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmDialog for ConsoleConfirm<R, W> {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> Result<Confirmation> {
        let marker = if prompt.danger { "!!" } else { "?" };
        write!(
            self.output,
            "[{}] {}: {} ({} = y / {} = N) ",
            marker, prompt.title, prompt.body, prompt.confirm_label, prompt.cancel_label
        )
        .context("Failed to write confirmation prompt")?;
        self.output.flush().context("Failed to flush confirmation prompt")?;

        let mut answer = String::new();
        self.input.read_line(&mut answer).context("Failed to read confirmation answer")?;

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Ok(Confirmation::Confirmed),
            _ => Ok(Confirmation::Cancelled),
        }
    }
}

/// Success notices on stdout, errors on stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => println!("✓ {}", message),
            NoticeKind::Error => eprintln!("✗ {}", message),
        }
    }
}
