//! Cursor position tracking for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and the internal scroll offset.
//! Methods take `buffer: &str` explicitly since the text is owned by `InputBox`.

use super::{BORDER_OFFSET, CONTENT_PAD, MAX_VISIBLE_LINES, inner_width};
use crate::tui::components::text_wrap::{wrap_line_count, wrap_options};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line (0 when content fits)
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line (0-based) the cursor sits on.
    pub fn line(&self, buffer: &str, area_width: u16) -> u16 {
        let width = inner_width(area_width);
        if width == 0 {
            return 0;
        }

        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let mut line = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);

        // Right after a newline textwrap didn't materialize
        if before.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
            line = line.saturating_add(1);
        }
        line
    }

    /// Keep the cursor's line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let total = wrap_line_count(buffer, inner_width(area_width));
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let line = self.line(buffer, area_width);
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset.saturating_add(MAX_VISIBLE_LINES) {
            self.scroll_offset = line.saturating_add(1) - MAX_VISIBLE_LINES;
        }
    }

    /// Screen (column, row) of the cursor inside the bordered `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let origin = (area.x + BORDER_OFFSET + CONTENT_PAD, area.y + BORDER_OFFSET);
        if width == 0 {
            return origin;
        }

        let before = &buffer[..self.pos];
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let logical = &before[line_start..];

        // Column within the last wrapped segment of the current logical line.
        // Counted from the raw text because textwrap trims trailing spaces.
        let segments = textwrap::wrap(logical, wrap_options(width));
        let consumed: usize = segments
            .iter()
            .take(segments.len().saturating_sub(1))
            .map(|seg| seg.chars().count())
            .sum();
        let column = logical.chars().count().saturating_sub(consumed) as u16;

        let row = self
            .line(buffer, area.width)
            .saturating_sub(self.scroll_offset);
        (origin.0 + column, origin.1 + row)
    }
}
