//! Terminal output sanitization
//!
//! Captured snippets are arbitrary user text and may contain escape sequences. Anything
//! printed by the CLI or drawn by the TUI goes through [`strip_ansi_codes`] first so a
//! stored entry cannot move the cursor, clear the screen or retitle the terminal.

/// Removes ANSI CSI sequences (`ESC [ ... letter`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`) and control characters other than tab, newline and carriage return.
///
/// # Examples
///
/// ```
/// use codebox_history::utils::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[31mred\x1b[0m"), "red");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitized text collapsed onto one line (newlines and tabs become spaces)
pub fn single_line(text: &str) -> String {
    strip_ansi_codes(text)
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect()
}
