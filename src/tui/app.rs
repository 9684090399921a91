//! TUI application state and event handling.
//!
//! The `App` struct owns all browse-session state and runs the main event
//! loop via `run()`. It manages:
//!
//! - **Live text search**: every keystroke re-filters the catalog by the
//!   free-text portion of the input
//! - **Condition integration**: the condition portion (left of `|`) is parsed
//!   and applied when Enter is pressed
//! - **Sort state**: field cycling and direction flipping over the visible set
//! - **Status messages**: transient feedback for clipboard and parse errors
//! - **Dirty state tracking**: rendering only when state changes
//!
//! Input syntax: `conditions | text` where the condition portion uses the
//! `field[:operator]:value` syntax and the text portion matches key and
//! description as a case-insensitive substring. An input without `|` is all
//! text.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::copy_to_clipboard;
use crate::filters::{Query, filter_entries, parse_conditions};
use crate::filters::ast::Condition;
use crate::loader::Catalog;
use crate::sort::{SortState, sort_entries};

/// Duration for informational status messages (milliseconds)
const STATUS_INFO_DURATION_MS: u64 = 2000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

/// Search input length cap
const MAX_INPUT_LEN: usize = 256;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App {
    catalog: Catalog,
    /// Filtered and sorted indices into `catalog.entries`
    visible: Vec<usize>,
    selected_idx: usize,
    input: String,
    /// Conditions applied on the last Enter
    conditions: Vec<Condition>,
    sort: SortState,
    should_quit: bool,
    last_enter_time: Option<Instant>,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        let mut app = Self {
            catalog,
            visible: Vec::new(),
            selected_idx: 0,
            input: String::new(),
            conditions: Vec::new(),
            sort: SortState::default(),
            should_quit: false,
            last_enter_time: None,
            status_message: None,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        };
        app.refresh_visible();
        app
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Clear expired status messages (marks dirty if cleared)
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| {
                    let state = RenderState {
                        input: &self.input,
                        selected_idx: self.selected_idx,
                        sort: self.sort,
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &self.catalog, &self.visible, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-10),
            Action::PageDown => self.move_selection(10),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::ClearInput => self.clear_input(),
            Action::ApplyConditions => {
                // Debounce: only apply if 150ms has elapsed since last Enter
                let should_apply = if let Some(last_time) = self.last_enter_time {
                    last_time.elapsed() >= Duration::from_millis(150)
                } else {
                    true // First Enter press
                };

                if should_apply {
                    self.apply_conditions();
                    self.last_enter_time = Some(Instant::now());
                }
            }
            Action::CycleSortField => {
                let next = self.sort.field.next();
                self.sort.select(next);
                self.refresh_visible();
                self.needs_redraw = true;
            }
            Action::FlipSortDirection => {
                self.sort.flip();
                self.refresh_visible();
                self.needs_redraw = true;
            }
            Action::CopySelection => self.copy_selection(),
            Action::None => {}
        }
    }

    fn copy_selection(&mut self) {
        let Some(&entry_idx) = self.visible.get(self.selected_idx) else {
            self.set_status(
                "✗ No repository selected",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
            return;
        };

        let url = self.catalog.entries[entry_idx].url();
        match copy_to_clipboard(&url) {
            Ok(()) => {
                self.set_status(
                    format!("✓ Copied {}", url),
                    MessageType::Info,
                    STATUS_INFO_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Clipboard error: {}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.visible.len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn update_search(&mut self, c: char) {
        if self.input.len() < MAX_INPUT_LEN {
            self.input.push(c);
            self.refresh_visible();
            self.selected_idx = 0; // Reset selection on search change
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.input.pop().is_some() {
            self.refresh_visible();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    /// Reset the whole query: input line, applied conditions, selection
    fn clear_input(&mut self) {
        self.input.clear();
        self.conditions.clear();
        self.refresh_visible();
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    /// Extract condition and text portions from the input line.
    /// Returns (condition_portion, text_portion).
    fn parse_input(&self) -> (Option<&str>, &str) {
        if let Some(pipe_pos) = self.input.find('|') {
            let condition_part = self.input[..pipe_pos].trim();
            let text_part = self.input[pipe_pos + 1..].trim();

            let conditions = if condition_part.is_empty() { None } else { Some(condition_part) };

            (conditions, text_part)
        } else {
            // No pipe: treat entire input as free text
            (None, self.input.trim())
        }
    }

    /// Parse and apply the condition portion of the input
    fn apply_conditions(&mut self) {
        let condition_str = match self.parse_input().0 {
            Some(s) => s.to_string(),
            None => {
                // No condition portion: drop any previously applied conditions
                self.conditions.clear();
                self.refresh_visible();
                self.needs_redraw = true;
                return;
            }
        };

        match parse_conditions(&condition_str) {
            Ok(conditions) => {
                let count = conditions.len();
                self.conditions = conditions;
                self.refresh_visible();
                self.selected_idx = 0;
                self.set_status(
                    format!("✓ Applied {} condition{}", count, if count == 1 { "" } else { "s" }),
                    MessageType::Info,
                    STATUS_INFO_DURATION_MS,
                );
            }
            Err(e) => {
                self.set_status(
                    format!("✗ Condition error: {:#}", e),
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    /// Recompute the visible index list: filter by the live text portion plus
    /// the applied conditions, then sort, then clamp the selection.
    fn refresh_visible(&mut self) {
        let query = Query {
            text: self.parse_input().1.to_string(),
            conditions: self.conditions.clone(),
        };

        self.visible = filter_entries(&self.catalog.entries, &self.catalog.papers, &query);
        sort_entries(&mut self.visible, &self.catalog.entries, &self.catalog.papers, self.sort);

        if self.selected_idx >= self.visible.len() {
            self.selected_idx = self.visible.len().saturating_sub(1);
        }
    }
}
