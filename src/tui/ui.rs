use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{FeedView, PostHit, TitleBar};
use crate::tui::{InputMode, TuiState};

/// Screen regions, top to bottom.
pub struct Areas {
    pub title: Rect,
    pub feed: Rect,
    pub composer: Rect,
}

pub fn areas(frame_area: Rect, composer_height: u16) -> Areas {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(composer_height)]);
    let [title, feed, composer] = layout.areas(frame_area);
    Areas {
        title,
        feed,
        composer,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: DateTime<Utc>) {
    tui.sync_props(app);

    let frame_area = frame.area();
    let composer_height = tui.input_box.calculate_height(frame_area.width);
    let Areas {
        title,
        feed,
        composer,
    } = areas(frame_area, composer_height);

    let hint = match tui.input_mode {
        InputMode::Input => "Esc: navigate  Tab: next post",
        InputMode::Cursor => "↑↓: select  a: applaud  d: delete  Enter: write",
    };
    TitleBar::new(app.posts.len(), app.status_message.clone(), hint).render(frame, title);

    FeedView::new(&mut tui.feed, app, now)
        .focus(tui.focused_post, tui.selected_comment)
        .render(frame, feed);

    tui.input_box.render(frame, composer);
}

/// What a left click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Post { post: usize, hit: PostHit },
    Composer,
}

/// Map a screen position to a click target using the layout measured by the
/// last draw.
pub fn hit_test(col: u16, row: u16, frame_area: Rect, tui: &TuiState) -> Option<ClickTarget> {
    let composer_height = tui.input_box.calculate_height(frame_area.width);
    let Areas { feed, composer, .. } = areas(frame_area, composer_height);

    if composer.contains((col, row).into()) {
        return Some(ClickTarget::Composer);
    }
    if !feed.contains((col, row).into()) {
        return None;
    }

    tui.feed
        .hit(col - feed.x, row - feed.y)
        .map(|(post, hit)| ClickTarget::Post { post, hit })
}
