//! # InputBox Component
//!
//! The comment composer docked under the feed.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace, delete, cursor movement)
//! - Emit `Submit` on Enter, whatever the buffer holds
//! - Show a placeholder while empty, a disabled/enabled publish control, and
//!   the required-field message after a rejected submit
//!
//! ## State Management
//!
//! The buffer is internal state mirrored into the focused post's draft on
//! every edit. Validation is *not* decided here: the comment controller owns
//! that rule and the parent feeds the outcome back in as the `validation` prop.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_wrap::{
    next_char_boundary, prev_char_boundary, wrap_line_count, wrap_options,
};
use crate::tui::event::TuiEvent;

use cursor::CursorState;

/// Blank column between each side border and the text
const CONTENT_PAD: u16 = 1;
/// Borders + padding consumed horizontally
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD * 2;
/// Top + bottom borders
const VERTICAL_OVERHEAD: u16 = 2;
/// Content lines shown before the composer scrolls internally
const MAX_VISIBLE_LINES: u16 = 4;
/// Offset from area edge to content
const BORDER_OFFSET: u16 = 1;

pub const PLACEHOLDER: &str = "Leave a comment";
pub const PUBLISH_LABEL: &str = "[ Publish ]";

fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The buffer text changed
    Edited,
    /// Enter pressed; the owner decides whether the draft is acceptable
    Submit,
}

/// Comment composer.
///
/// # Props
///
/// - `title`: which post the comment goes to
/// - `can_submit`: false while the draft is empty (publish control dimmed)
/// - `validation`: message from the last rejected submit
/// - `dimmed`: composer is not receiving keystrokes (Cursor mode)
pub struct InputBox {
    pub buffer: String,
    pub title: String,
    pub can_submit: bool,
    pub validation: Option<String>,
    pub dimmed: bool,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            title: String::from("Leave your feedback"),
            can_submit: false,
            validation: None,
            dimmed: false,
            cursor: CursorState::new(),
        }
    }

    /// Load text (e.g. another post's draft) with the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor.reset();
        self.cursor.pos = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Height for the current buffer, clamped to
    /// `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(area_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Pre-wrapped lines inside the scroll window, so drawing matches the cursor math.
    fn visible_text(&self, area_width: u16) -> String {
        let width = inner_width(area_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());
        lines[start..end].join("\n")
    }

    fn footer(&self) -> Line<'static> {
        let publish_style = if self.can_submit {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let mut spans = Vec::new();
        if let Some(message) = &self.validation {
            spans.push(Span::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Red),
            ));
        }
        spans.push(Span::styled(PUBLISH_LABEL, publish_style));
        Line::from(spans).right_aligned()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let border_style = if self.validation.is_some() {
            Style::default().fg(Color::Red)
        } else if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD))
            .title(self.title.as_str())
            .title_bottom(self.footer());

        let body = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(self.visible_text(area.width)).style(Style::default().fg(Color::Green))
        };

        frame.render_widget(body.block(block), area);

        if !self.dimmed {
            let (x, y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::Edited)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                Some(InputEvent::Edited)
            }
            TuiEvent::Backspace if self.cursor.pos > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::Edited)
            }
            TuiEvent::Delete if self.cursor.pos < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::Edited)
            }
            TuiEvent::CursorLeft => {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}
