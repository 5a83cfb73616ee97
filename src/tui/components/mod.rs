//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: top status bar
//! - `PostView`: one post with its comment thread
//! - `CommentView`: one comment card with applause and delete controls
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: comment composer
//! - `FeedView` / `FeedViewState`: scrollable feed with layout and hit testing
//!
//! Components compose: `FeedView` renders `PostView`s, which render
//! `CommentView`s. Each file holds the component's state, events, rendering,
//! event handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── title_bar.rs   (top status bar)
//! ├── feed_view.rs   (scrollable post container)
//! ├── post.rs        (single post + thread)
//! ├── comment.rs     (single comment card)
//! ├── text_wrap.rs   (shared wrapping helpers)
//! └── input_box/     (comment composer)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod comment;
pub mod feed_view;
pub mod input_box;
pub mod post;
pub(crate) mod text_wrap;

pub use comment::{CommentControl, CommentView};
pub use feed_view::{FeedView, FeedViewState};
pub use input_box::{InputBox, InputEvent};
pub use post::{PostHit, PostView};
