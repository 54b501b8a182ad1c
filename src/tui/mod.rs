// TUI module for the interactive history browser
mod app;
mod events;
mod layout;
mod rendering;

use std::io::{self, Stdout};

use anyhow::Result;
pub use app::App;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::controller::HistoryController;
use crate::store::EntryStore;

/// Raw-mode alternate screen, restored when dropped (including on panic or early return)
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn start() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        // Already tearing down; nothing useful to do with errors here
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the interactive browser until the user quits
pub fn run_interactive<S: EntryStore>(controller: HistoryController<S>) -> Result<()> {
    let mut session = TerminalSession::start()?;
    let mut app = App::new(controller);
    app.run(&mut session.terminal)
}
