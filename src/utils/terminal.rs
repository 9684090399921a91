//! Terminal output sanitization
//!
//! # Security: Terminal Injection Prevention
//!
//! Repository descriptions, list names, and paper abstracts come straight
//! from scraped snapshots, which means anyone who can star a repository (or
//! publish a paper) controls text this tool renders. ANSI escape sequences
//! embedded in that text could clear the screen, move the cursor, or restyle
//! the terminal, so every snapshot-sourced string is passed through
//! [`strip_ansi_codes`] before it reaches a widget, and list rows flatten it
//! further with [`single_line`].

/// Strips ANSI escape codes from a string
///
/// Removes ANSI CSI (Control Sequence Introducer) sequences and stray
/// control characters (bell, backspace). Tabs, newlines, and carriage
/// returns survive so multi-line abstracts keep their shape.
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // CSI sequence: ESC [ ... (letter)
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next_ch) = chars.peek() {
                    chars.next();
                    if next_ch.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitize text for a one-line list row: strip escapes, then collapse
/// whitespace runs (including newlines) into single spaces.
pub fn single_line(text: &str) -> String {
    let stripped = strip_ansi_codes(text);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
