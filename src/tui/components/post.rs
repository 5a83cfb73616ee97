//! # Post Component
//!
//! Renders one post: author header, content lines, and its comment thread as
//! a stack of [`CommentView`] cards.
//!
//! ## Layout
//!
//! Heights are predicted by [`PostLayout`] before anything is drawn. The
//! same layout drives rendering, so the parent `FeedView` can size its
//! scroll canvas and hit-test clicks without rendering first.
//!
//! ```text
//! ╭ Author · Role ─────────────── about 1 hour ago ╮
//! │ paragraph ...                                  │
//! │ link (underlined)                              │
//! │                                                │
//! │ Comments (n)                                   │
//! │ ╭ comment card ─────────────────────────────╮  │
//! │ ╰───────────────────────────────────────────╯  │
//! ╰───────────────────────────── 11 May at 08:13h ─╯
//! ```

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::feed::{ContentKind, absolute_time, relative_time};
use crate::core::state::{Commenter, Post};
use crate::tui::components::comment::{CommentControl, CommentView};
use crate::tui::components::text_wrap::wrap;

const CONTENT_PAD_H: u16 = 1;
/// Offset from the post's left edge to its content (border + padding).
const CONTENT_INSET: u16 = 1 + CONTENT_PAD_H;
const HORIZONTAL_OVERHEAD: u16 = CONTENT_INSET * 2;
/// Blank spacer plus the "Comments (n)" heading
const COMMENTS_HEADING_HEIGHT: u16 = 2;

/// Where things sit inside a post, relative to its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLayout {
    pub height: u16,
    pub content_height: u16,
    /// `(y, height)` of each comment card, in thread order
    pub comments: Vec<(u16, u16)>,
}

impl PostLayout {
    /// Heights saturate at `u16::MAX`, which clips oversized posts instead
    /// of wrapping the canvas.
    pub fn compute(post: &Post, width: u16) -> Self {
        let inner_width = width.saturating_sub(HORIZONTAL_OVERHEAD);

        let content_height = post.data.content.iter().fold(0u16, |acc, line| {
            let lines = u16::try_from(wrap(&line.content, inner_width).len()).unwrap_or(u16::MAX);
            acc.saturating_add(lines)
        });

        let mut y = content_height.saturating_add(1 + COMMENTS_HEADING_HEIGHT);
        let comments = post
            .thread
            .items()
            .iter()
            .map(|item| {
                let h = CommentView::calculate_height(item.content(), inner_width);
                let slot = (y, h);
                y = y.saturating_add(h);
                slot
            })
            .collect();

        Self {
            height: y.saturating_add(1),
            content_height,
            comments,
        }
    }
}

/// Where a click inside a post landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostHit {
    Comment {
        index: usize,
        control: CommentControl,
    },
    Body,
}

#[derive(Clone, Copy)]
pub struct PostView<'a> {
    pub post: &'a Post,
    /// Identity shown on every comment card
    pub commenter: &'a Commenter,
    pub now: DateTime<Utc>,
    pub is_focused: bool,
    pub selected_comment: Option<usize>,
}

impl<'a> PostView<'a> {
    pub fn new(post: &'a Post, commenter: &'a Commenter, now: DateTime<Utc>) -> Self {
        Self {
            post,
            commenter,
            now,
            is_focused: false,
            selected_comment: None,
        }
    }

    pub fn focused(mut self, is_focused: bool, selected_comment: Option<usize>) -> Self {
        self.is_focused = is_focused;
        self.selected_comment = selected_comment;
        self
    }

    /// Resolve a click at (`x`, `y`) relative to the post's top-left corner,
    /// against the layout measured for this frame.
    pub fn hit_layout(layout: &PostLayout, width: u16, x: u16, y: u16) -> Option<PostHit> {
        if x >= width || y >= layout.height {
            return None;
        }

        let card_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        for (index, &(top, h)) in layout.comments.iter().enumerate() {
            if y >= top && y < top.saturating_add(h) && x >= CONTENT_INSET {
                if let Some(control) = CommentView::hit(card_width, h, x - CONTENT_INSET, y - top) {
                    return Some(PostHit::Comment { index, control });
                }
            }
        }
        Some(PostHit::Body)
    }

    fn content_lines(&self, width: u16) -> Vec<Line<'static>> {
        let link_style = Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED);

        self.post
            .data
            .content
            .iter()
            .flat_map(|line| {
                let style = match line.kind {
                    ContentKind::Paragraph => Style::default(),
                    ContentKind::Link => link_style,
                };
                wrap(&line.content, width)
                    .into_iter()
                    .map(move |l| Line::styled(l.into_owned(), style))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn header(&self) -> Line<'static> {
        let author = &self.post.data.author;
        let mut spans = vec![Span::styled(
            author.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if !author.role.is_empty() {
            spans.push(Span::styled(
                format!(" · {}", author.role),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for PostView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PostLayout::compute(self.post, area.width);

        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let published = self.post.data.published_at;
        let published_label = relative_time(published, self.now);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.header())
            .title(
                Line::styled(published_label.clone(), Style::default().fg(Color::DarkGray))
                .right_aligned(),
            )
            .title_bottom(
                Line::styled(absolute_time(published), Style::default().fg(Color::DarkGray))
                    .right_aligned(),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let content_area = Rect::new(inner.x, inner.y, inner.width, layout.content_height)
            .intersection(area);
        Paragraph::new(self.content_lines(inner.width)).render(content_area, buf);

        let heading_y = area
            .y
            .saturating_add(layout.content_height)
            .saturating_add(2);
        let heading = Line::styled(
            format!("Comments ({})", self.post.thread.items().len()),
            Style::default().fg(Color::Yellow),
        );
        let heading_area = Rect::new(inner.x, heading_y, inner.width, 1).intersection(area);
        heading.render(heading_area, buf);

        for (index, (item, &(top, h))) in self
            .post
            .thread
            .items()
            .iter()
            .zip(&layout.comments)
            .enumerate()
        {
            let card = Rect::new(inner.x, area.y.saturating_add(top), inner.width, h)
                .intersection(area);
            let is_selected = self.is_focused && self.selected_comment == Some(index);
            CommentView::new(item, self.commenter, is_selected)
                .time_label(&published_label)
                .render(card, buf);
        }
    }
}
