//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the feed,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! One post is focused at a time. The composer docked under the feed edits
//! that post's draft; switching posts swaps the composer text for the other
//! post's draft, so each thread keeps its own in-progress comment.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after an event arrived. Relative timestamps are refreshed on
//! those redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::time::Duration;

use chrono::Utc;
use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::feed::PostData;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{CommentControl, FeedViewState, InputBox, InputEvent, PostHit};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::ClickTarget;

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Select comments with arrow keys. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the composer. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub feed: FeedViewState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
    pub focused_post: usize,
    /// Selected comment of the focused post, only meaningful in Cursor mode
    pub selected_comment: Option<usize>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        let mut tui = Self {
            feed: FeedViewState::new(),
            input_box: InputBox::new(),
            input_mode: InputMode::Input, // User expects to type immediately
            focused_post: 0,
            selected_comment: None,
        };
        tui.load_draft(app);
        tui.sync_props(app);
        tui
    }

    /// Copy the focused post's controller state into the composer props.
    pub fn sync_props(&mut self, app: &App) {
        self.input_box.dimmed = matches!(self.input_mode, InputMode::Cursor);
        let Some(post) = app.post(self.focused_post) else {
            self.input_box.can_submit = false;
            self.input_box.validation = None;
            return;
        };

        let controller = post.thread.controller();
        self.input_box.can_submit = !controller.is_draft_empty();
        self.input_box.validation = controller.validation_error().map(|e| e.to_string());
        self.input_box.title = format!("Leave your feedback · {}", post.data.author.name);
    }

    fn load_draft(&mut self, app: &App) {
        let draft = app
            .post(self.focused_post)
            .map(|p| p.thread.controller().draft())
            .unwrap_or_default();
        self.input_box.set_text(draft);
    }

    fn comment_count(&self, app: &App) -> usize {
        app.post(self.focused_post)
            .map(|p| p.thread.items().len())
            .unwrap_or(0)
    }

    fn focus_post(&mut self, app: &App, index: usize) {
        if index == self.focused_post || index >= app.posts.len() {
            return;
        }
        debug!("Focus moved to post {}", index);
        self.focused_post = index;
        self.selected_comment = None;
        self.load_draft(app);
    }

    /// Move focus to the next or previous post, wrapping around the feed.
    fn cycle_focus(&mut self, app: &App, forward: bool) {
        let len = app.posts.len();
        if len == 0 {
            return;
        }
        let next = if forward {
            (self.focused_post + 1) % len
        } else {
            (self.focused_post + len - 1) % len
        };
        self.focus_post(app, next);
        if self.input_mode == InputMode::Cursor && self.comment_count(app) > 0 {
            self.selected_comment = Some(0);
        }
        self.feed.scroll_to(self.focused_post, self.selected_comment);
    }

    /// Keep the selection on an existing comment after the thread shrank.
    fn clamp_selection(&mut self, app: &App) {
        let count = self.comment_count(app);
        self.selected_comment = match self.selected_comment {
            _ if count == 0 => None,
            Some(i) => Some(i.min(count - 1)),
            None => None,
        };
    }

    fn enter_input_mode(&mut self) {
        self.input_mode = InputMode::Input;
        self.selected_comment = None;
    }

    fn dispatch(&mut self, app: &mut App, action: Action) -> Effect {
        let effect = update(app, action);
        match effect {
            Effect::DraftSubmitted => {
                self.input_box.clear();
                let last = self.comment_count(app).checked_sub(1);
                self.feed.scroll_to(self.focused_post, last);
            }
            Effect::None | Effect::DraftRejected | Effect::Quit => {}
        }
        effect
    }

    /// Apply one terminal event. Returns true when the app should quit.
    pub fn handle(&mut self, app: &mut App, event: TuiEvent, frame_area: Rect) -> bool {
        match event {
            // Resize just needs a redraw
            TuiEvent::Resize => return false,
            // Ctrl+C always quits regardless of mode
            TuiEvent::ForceQuit => return self.dispatch(app, Action::Quit) == Effect::Quit,
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                self.feed.handle_event(&event);
                return false;
            }
            TuiEvent::MouseClick(col, row) => {
                self.handle_click(app, col, row, frame_area);
                return false;
            }
            TuiEvent::FocusNextPost | TuiEvent::FocusPrevPost => {
                self.cycle_focus(app, event == TuiEvent::FocusNextPost);
                return false;
            }
            _ => {}
        }

        match self.input_mode {
            InputMode::Input => self.handle_input_mode(app, event),
            InputMode::Cursor => self.handle_cursor_mode(app, event),
        }
        false
    }

    fn handle_click(&mut self, app: &mut App, col: u16, row: u16, frame_area: Rect) {
        match ui::hit_test(col, row, frame_area, self) {
            Some(ClickTarget::Composer) => self.enter_input_mode(),
            Some(ClickTarget::Post { post, hit }) => {
                self.focus_post(app, post);
                if let PostHit::Comment { index, control } = hit {
                    match control {
                        CommentControl::Applaud => {
                            self.dispatch(app, Action::Applaud { post, comment: index });
                        }
                        CommentControl::Delete => {
                            self.dispatch(app, Action::DeleteComment { post, comment: index });
                            self.clamp_selection(app);
                            return;
                        }
                        CommentControl::Body => {}
                    }
                    if self.input_mode == InputMode::Cursor {
                        self.selected_comment = Some(index);
                    }
                }
            }
            None => {}
        }
    }

    fn handle_input_mode(&mut self, app: &mut App, event: TuiEvent) {
        if event == TuiEvent::Escape {
            self.input_mode = InputMode::Cursor;
            self.selected_comment = self.comment_count(app).checked_sub(1);
            self.feed.scroll_to(self.focused_post, self.selected_comment);
            return;
        }

        let post = self.focused_post;
        match self.input_box.handle_event(&event) {
            Some(InputEvent::Edited) => {
                let text = self.input_box.buffer.clone();
                self.dispatch(app, Action::UpdateDraft { post, text });
            }
            Some(InputEvent::Submit) => {
                self.dispatch(app, Action::SubmitDraft { post });
            }
            None => {}
        }
    }

    fn handle_cursor_mode(&mut self, app: &mut App, event: TuiEvent) {
        let post = self.focused_post;
        let count = self.comment_count(app);

        match event {
            TuiEvent::CursorUp if count > 0 => {
                let idx = self
                    .selected_comment
                    .map(|i| i.saturating_sub(1))
                    .unwrap_or(count - 1);
                self.selected_comment = Some(idx);
                self.feed.scroll_to(post, self.selected_comment);
            }
            TuiEvent::CursorDown if count > 0 => {
                let idx = self
                    .selected_comment
                    .map(|i| (i + 1).min(count - 1))
                    .unwrap_or(0);
                self.selected_comment = Some(idx);
                self.feed.scroll_to(post, self.selected_comment);
            }
            TuiEvent::InputChar('a' | ' ') if self.selected_comment.is_some() => {
                if let Some(comment) = self.selected_comment {
                    self.dispatch(app, Action::Applaud { post, comment });
                }
            }
            TuiEvent::InputChar('d') if self.selected_comment.is_some() => {
                if let Some(comment) = self.selected_comment {
                    self.dispatch(app, Action::DeleteComment { post, comment });
                    self.clamp_selection(app);
                }
            }
            // Typing auto-switches to Input mode and forwards the event.
            // Without a selection the shortcut letters count as typing too.
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                self.enter_input_mode();
                self.handle_input_mode(app, event);
            }
            // Enter switches to Input mode
            TuiEvent::Submit => self.enter_input_mode(),
            _ => {}
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol allows Shift+Enter detection; terminals
        // without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig, posts: Vec<PostData>) -> std::io::Result<()> {
    let mut app = App::from_config(posts, &config);
    let mut tui = TuiState::new(&app);
    info!(
        "Starting feed with {} posts as {}",
        app.posts.len(),
        app.commenter.name
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e));
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            let now = Utc::now();
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, now))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let frame_area = terminal.get_frame().area();
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if tui.handle(&mut app, event, frame_area) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, test_now};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 40,
    };

    fn type_text(tui: &mut TuiState, app: &mut App, text: &str) {
        for c in text.chars() {
            tui.handle(app, TuiEvent::InputChar(c), AREA);
        }
    }

    fn draw(app: &App, tui: &mut TuiState) {
        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).unwrap();
        terminal
            .draw(|f| ui::draw_ui(f, app, tui, test_now()))
            .unwrap();
    }

    #[test]
    fn typing_updates_focused_draft_and_enter_publishes() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        type_text(&mut tui, &mut app, "great post");
        assert_eq!(app.posts[0].thread.controller().draft(), "great post");

        tui.handle(&mut app, TuiEvent::Submit, AREA);
        assert_eq!(
            app.posts[0].thread.controller().comments(),
            ["post muito bacana", "great post"]
        );
        assert!(tui.input_box.buffer.is_empty());
    }

    #[test]
    fn empty_submit_keeps_list_and_shows_marker() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        tui.handle(&mut app, TuiEvent::Submit, AREA);
        tui.sync_props(&app);

        assert_eq!(app.posts[0].thread.items().len(), 1);
        assert_eq!(
            tui.input_box.validation.as_deref(),
            Some("This field is required")
        );
        assert!(!tui.input_box.can_submit);

        // Typing clears the marker
        type_text(&mut tui, &mut app, "x");
        tui.sync_props(&app);
        assert!(tui.input_box.validation.is_none());
        assert!(tui.input_box.can_submit);
    }

    #[test]
    fn each_post_keeps_its_own_draft() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        type_text(&mut tui, &mut app, "first");
        tui.handle(&mut app, TuiEvent::FocusNextPost, AREA);
        assert_eq!(tui.focused_post, 1);
        assert!(tui.input_box.buffer.is_empty());

        type_text(&mut tui, &mut app, "second");
        tui.handle(&mut app, TuiEvent::FocusNextPost, AREA);
        assert_eq!(tui.focused_post, 0);
        assert_eq!(tui.input_box.buffer, "first");
        assert_eq!(app.posts[1].thread.controller().draft(), "second");
    }

    #[test]
    fn cursor_mode_applauds_and_deletes_selected_comment() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        type_text(&mut tui, &mut app, "great post");
        tui.handle(&mut app, TuiEvent::Submit, AREA);

        tui.handle(&mut app, TuiEvent::Escape, AREA);
        assert_eq!(tui.input_mode, InputMode::Cursor);
        assert_eq!(tui.selected_comment, Some(1));

        tui.handle(&mut app, TuiEvent::CursorUp, AREA);
        tui.handle(&mut app, TuiEvent::InputChar('a'), AREA);
        tui.handle(&mut app, TuiEvent::InputChar(' '), AREA);
        assert_eq!(app.posts[0].thread.items()[0].applause(), 2);
        assert_eq!(app.posts[0].thread.items()[1].applause(), 0);

        tui.handle(&mut app, TuiEvent::CursorDown, AREA);
        tui.handle(&mut app, TuiEvent::InputChar('d'), AREA);
        assert_eq!(
            app.posts[0].thread.controller().comments(),
            ["post muito bacana"]
        );
        // Surviving item keeps its counter; selection clamps onto it
        assert_eq!(app.posts[0].thread.items()[0].applause(), 2);
        assert_eq!(tui.selected_comment, Some(0));
    }

    #[test]
    fn typing_in_cursor_mode_returns_to_input() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        tui.handle(&mut app, TuiEvent::Escape, AREA);
        tui.handle(&mut app, TuiEvent::InputChar('h'), AREA);

        assert_eq!(tui.input_mode, InputMode::Input);
        assert_eq!(tui.selected_comment, None);
        assert_eq!(app.posts[0].thread.controller().draft(), "h");
    }

    #[test]
    fn shortcut_letters_type_when_nothing_is_selected() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);

        // Delete the only comment so Cursor mode has nothing to select
        tui.handle(&mut app, TuiEvent::Escape, AREA);
        tui.handle(&mut app, TuiEvent::InputChar('d'), AREA);
        assert!(app.posts[0].thread.items().is_empty());
        assert_eq!(tui.input_mode, InputMode::Cursor);
        assert_eq!(tui.selected_comment, None);

        type_text(&mut tui, &mut app, "add this");
        assert_eq!(tui.input_mode, InputMode::Input);
        assert_eq!(app.posts[0].thread.controller().draft(), "add this");
        assert!(app.posts[0].thread.items().is_empty());
    }

    #[test]
    fn click_on_applause_and_delete_controls() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        draw(&app, &mut tui);

        let feed = ui::areas(AREA, tui.input_box.calculate_height(AREA.width)).feed;
        let (top, h) = tui.feed.layout.posts[0].comments[0];

        let applause_row = feed.y + top + h - 2;
        tui.handle(&mut app, TuiEvent::MouseClick(6, applause_row), AREA);
        tui.handle(&mut app, TuiEvent::MouseClick(6, applause_row), AREA);
        assert_eq!(app.posts[0].thread.items()[0].applause(), 2);

        // Delete label sits just left of the card's top-right corner
        let card_right = feed.x + tui.feed.layout.content_width - 2;
        tui.handle(&mut app, TuiEvent::MouseClick(card_right - 3, feed.y + top), AREA);
        assert!(app.posts[0].thread.items().is_empty());
        assert_eq!(app.status_message, "Comment deleted");
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        assert!(!tui.handle(&mut app, TuiEvent::Resize, AREA));
        assert!(tui.handle(&mut app, TuiEvent::ForceQuit, AREA));
    }
}
