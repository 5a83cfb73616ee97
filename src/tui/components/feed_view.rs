//! # FeedView Component
//!
//! Scrollable column of posts.
//!
//! ## Responsibilities
//!
//! - Measure every post and lay them out on a virtual canvas
//! - Render only the posts near the viewport into a `ScrollView`
//! - Keep the focused post (or selected comment) on screen
//! - Translate viewport clicks into a post index plus a [`PostHit`]
//!
//! ## Architecture
//!
//! `FeedView` is a transient component (created each frame) that wraps
//! `&'a mut FeedViewState` (persistent state) and the `App` (props).
//! Heights are recomputed during render, so the layout always reflects
//! comments added or deleted since the previous frame.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::post::{PostHit, PostLayout, PostView};
use crate::tui::event::TuiEvent;

/// Blank rows between consecutive posts
const POST_GAP: u16 = 1;

/// Layout and scroll state for the feed.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct FeedViewState {
    pub scroll_state: ScrollViewState,
    pub layout: FeedLayout,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl FeedViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.layout.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the minimum distance that makes canvas rows `top..bottom` visible.
    /// Ranges taller than the viewport are aligned to their top edge.
    pub fn reveal(&mut self, top: u16, bottom: u16) {
        let offset_y = self.scroll_state.offset().y;
        if top < offset_y || bottom.saturating_sub(top) > self.viewport_height {
            self.scroll_state.set_offset(Position { x: 0, y: top });
        } else if bottom > offset_y.saturating_add(self.viewport_height) {
            let new_y = bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Bring a post, or one of its comments, into view.
    pub fn scroll_to(&mut self, post: usize, comment: Option<usize>) {
        let Some(top) = self.layout.post_top(post) else {
            return;
        };
        let slot = comment.and_then(|c| self.layout.posts.get(post)?.comments.get(c).copied());
        let (y, h) = slot.unwrap_or((0, self.layout.posts[post].height));
        let start = top.saturating_add(y);
        self.reveal(start, start.saturating_add(h));
    }

    /// Resolve a click at viewport-relative (`x`, `y`) into a post index and
    /// the region of that post under the pointer.
    pub fn hit(&self, x: u16, y: u16) -> Option<(usize, PostHit)> {
        let canvas_y = y.saturating_add(self.scroll_state.offset().y);
        let (index, local_y) = self.layout.post_at(canvas_y)?;
        let hit = self.layout.hit_post(index, x, local_y)?;
        Some((index, hit))
    }
}

/// Measured layout of the whole feed at one content width.
#[derive(Debug, Default)]
pub struct FeedLayout {
    pub posts: Vec<PostLayout>,
    /// Running sum of slot heights (post + gap); `prefix_heights[i]` is the
    /// canvas row just past post `i`'s slot.
    pub prefix_heights: Vec<u16>,
    pub content_width: u16,
}

impl FeedLayout {
    pub fn measure(app: &App, content_width: u16) -> Self {
        let posts: Vec<PostLayout> = app
            .posts
            .iter()
            .map(|post| PostLayout::compute(post, content_width))
            .collect();

        let prefix_heights = posts
            .iter()
            .scan(0u16, |acc, layout| {
                *acc = acc.saturating_add(layout.height).saturating_add(POST_GAP);
                Some(*acc)
            })
            .collect();

        Self {
            posts,
            prefix_heights,
            content_width,
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn post_top(&self, index: usize) -> Option<u16> {
        match index {
            0 if !self.posts.is_empty() => Some(0),
            i if i < self.posts.len() => Some(self.prefix_heights[i - 1]),
            _ => None,
        }
    }

    /// Post under canvas row `y`, with the row relative to the post's top.
    /// Rows in the gap between posts belong to no post.
    pub fn post_at(&self, y: u16) -> Option<(usize, u16)> {
        let index = self.prefix_heights.partition_point(|&end| end <= y);
        let top = self.post_top(index)?;
        let local_y = y - top;
        (local_y < self.posts[index].height).then_some((index, local_y))
    }

    fn hit_post(&self, index: usize, x: u16, local_y: u16) -> Option<PostHit> {
        let layout = self.posts.get(index)?;
        PostView::hit_layout(layout, self.content_width, x, local_y)
    }

    /// Posts overlapping the viewport, padded by half a screen on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

/// Scrollable feed component.
/// Created fresh each frame with references to state and data.
pub struct FeedView<'a> {
    pub state: &'a mut FeedViewState,
    pub app: &'a App,
    pub now: DateTime<Utc>,
    pub focused_post: usize,
    /// Highlighted comment of the focused post (Cursor mode only)
    pub selected_comment: Option<usize>,
}

impl<'a> FeedView<'a> {
    pub fn new(state: &'a mut FeedViewState, app: &'a App, now: DateTime<Utc>) -> Self {
        Self {
            state,
            app,
            now,
            focused_post: 0,
            selected_comment: None,
        }
    }

    pub fn focus(mut self, post: usize, comment: Option<usize>) -> Self {
        self.focused_post = post;
        self.selected_comment = comment;
        self
    }
}

impl Component for FeedView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.app.posts.is_empty() {
            self.state.layout = FeedLayout::default();
            let empty = Paragraph::new("No posts to show")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, area);
            return;
        }

        // -1 for the scrollbar column
        let content_width = area.width.saturating_sub(1);
        self.state.layout = FeedLayout::measure(self.app, content_width);
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let total_height = self.state.layout.total_height();
        let scroll_offset = self.state.scroll_state.offset().y;
        let visible = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible {
            let (Some(post), Some(top)) = (self.app.posts.get(i), self.state.layout.post_top(i))
            else {
                continue;
            };
            let height = self.state.layout.posts[i].height;
            let is_focused = i == self.focused_post;
            let selected = if is_focused { self.selected_comment } else { None };

            let view = PostView::new(post, &self.app.commenter, self.now)
                .focused(is_focused, selected);
            scroll_view.render_widget(view, Rect::new(0, top, content_width, height));
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Scrolling only touches persistent state, so the handler lives on
/// `FeedViewState` rather than the per-frame `FeedView`.
impl EventHandler for FeedViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}
