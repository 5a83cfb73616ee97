//! # TitleBar Component
//!
//! Top status bar: post count, the latest status message, and a key hint for
//! the current input mode.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.posts.len(), app.status_message.clone(), hint);
//! title_bar.render(frame, area);
//! ```
//!
//! ## Formatting
//!
//! 1. **Status message**: `"Mural (2 posts) | Comment deleted | Esc: navigate"`
//! 2. **No status**: `"Mural (2 posts) | Esc: navigate"`
//!
//! The hint is dropped when empty.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub post_count: usize,
    /// Outcome of the last action (e.g. "Comment deleted")
    pub status_message: String,
    /// Key hint for the active input mode
    pub hint: &'static str,
}

impl TitleBar {
    pub fn new(post_count: usize, status_message: String, hint: &'static str) -> Self {
        Self {
            post_count,
            status_message,
            hint,
        }
    }

    fn heading(&self) -> String {
        let noun = if self.post_count == 1 { "post" } else { "posts" };
        format!("Mural ({} {})", self.post_count, noun)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![Span::raw(self.heading())];

        if !self.status_message.is_empty() {
            spans.push(separator.clone());
            spans.push(Span::raw(self.status_message.clone()));
        }
        if !self.hint.is_empty() {
            spans.push(separator);
            spans.push(Span::styled(self.hint, Style::default().fg(Color::DarkGray)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
