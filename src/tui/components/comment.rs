//! # Comment Component
//!
//! One comment card: commenter header with a time label and a delete
//! control, the comment text, and an applause footer showing the item's
//! local counter. Comments carry no timestamp of their own, so the label is
//! the parent post's relative time.
//!
//! ```text
//! ╭ Guilherme Vieira · 1h ago ─── ✕ Delete ╮
//! │ post muito bacana                     │
//! │ 👍 Applaud 3                          │
//! ╰───────────────────────────────────────╯
//! ```
//!
//! `CommentView` is transient and stateless. The counter lives in the
//! `CommentItem` it borrows; clicks are resolved by the parent through
//! [`CommentView::hit`] and turned into actions.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::comments::CommentItem;
use crate::core::state::Commenter;
use crate::tui::components::text_wrap::wrap;

const CONTENT_PAD_H: u16 = 1;
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Top and bottom borders plus the applause footer line.
const VERTICAL_OVERHEAD: u16 = 3;

pub const DELETE_LABEL: &str = "✕ Delete";
pub const APPLAUD_LABEL: &str = "👍 Applaud";

/// Clickable regions of a comment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentControl {
    Delete,
    Applaud,
    Body,
}

#[derive(Clone, Copy)]
pub struct CommentView<'a> {
    pub item: &'a CommentItem,
    /// Commenter shown in the card header
    pub author: &'a Commenter,
    /// Relative time shown after the commenter, e.g. "about 1 hour ago"
    pub time_label: &'a str,
    pub is_selected: bool,
}

impl<'a> CommentView<'a> {
    pub fn new(item: &'a CommentItem, author: &'a Commenter, is_selected: bool) -> Self {
        Self {
            item,
            author,
            time_label: "",
            is_selected,
        }
    }

    pub fn time_label(mut self, label: &'a str) -> Self {
        self.time_label = label;
        self
    }

    /// Rendered height of a card holding `content` at `width` columns.
    /// Saturates at `u16::MAX` for pathologically long comments.
    pub fn calculate_height(content: &str, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return VERTICAL_OVERHEAD;
        }
        let lines = u16::try_from(wrap(content, content_width).len()).unwrap_or(u16::MAX);
        lines.saturating_add(VERTICAL_OVERHEAD)
    }

    /// Resolve a click at (`x`, `y`) relative to a card of the given size.
    pub fn hit(width: u16, height: u16, x: u16, y: u16) -> Option<CommentControl> {
        if x >= width || y >= height {
            return None;
        }
        // Delete label is right-aligned in the top border, just before the corner.
        let delete_width = DELETE_LABEL.width() as u16;
        let delete_start = width.saturating_sub(1 + delete_width);
        if y == 0 && x >= delete_start && x < width.saturating_sub(1) {
            return Some(CommentControl::Delete);
        }
        if height >= VERTICAL_OVERHEAD && y == height - 2 {
            return Some(CommentControl::Applaud);
        }
        Some(CommentControl::Body)
    }

    fn header(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            self.author.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if !self.author.role.is_empty() {
            spans.push(Span::styled(
                format!(" · {}", self.author.role),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if !self.time_label.is_empty() {
            spans.push(Span::styled(
                format!(" · {}", self.time_label),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    fn footer(&self, style: Style) -> Line<'static> {
        Line::from(vec![
            Span::styled(APPLAUD_LABEL, style),
            Span::raw(" "),
            Span::styled(
                self.item.applause().to_string(),
                style.add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

impl Widget for CommentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .title(self.header())
            .title(Line::styled(DELETE_LABEL, Style::default().fg(Color::Red)).right_aligned())
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = wrap(self.item.content(), inner.width)
            .into_iter()
            .map(|l| Line::raw(l.into_owned()))
            .collect();
        lines.push(self.footer(Style::default().fg(Color::Green)));

        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
    }
}
