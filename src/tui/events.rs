use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    ClearSearch,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    CopyEntry,
    DeleteEntry,
    DeleteAll,
    LoadMore,
    ToggleExpand,
    Refresh,
    UpdateSearch(char),
    DeleteChar,
    // Answers to an open confirmation modal
    Confirm,
    Cancel,
    None,
}

/// Poll for keyboard events and convert to actions.
///
/// While a confirmation modal is open only the modal's keys (and Ctrl+C) are live.
pub fn poll_event(timeout: Duration, modal_open: bool) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(if modal_open { modal_key_to_action(key) } else { key_to_action(key) });
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::ClearSearch,

        // Navigation (Vim/Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        // Entry actions
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyEntry,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::DeleteEntry,
        (KeyCode::Delete, _) => Action::DeleteEntry,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => Action::DeleteAll,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Action::LoadMore,
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::ToggleExpand,
        (KeyCode::Enter, _) => Action::ToggleExpand,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,

        // Search input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::UpdateSearch(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}

fn modal_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('y') | KeyCode::Char('Y'), _) | (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Char('n') | KeyCode::Char('N'), _) | (KeyCode::Esc, _) => Action::Cancel,
        _ => Action::None,
    }
}
