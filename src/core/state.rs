//! # Application State
//!
//! Core business state for Mural. This module contains domain logic only -
//! no TUI-specific types. Presentation state (focus, scroll, input mode)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── posts: Vec<Post>           // feed, in display order
//! │   ├── data: PostData         // read-only props (author, content, date)
//! │   └── thread: CommentThread  // comment texts, draft, applause
//! ├── commenter: Commenter       // who new comments are attributed to
//! └── status_message: String     // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::comments::{CommentListController, CommentThread};
use crate::core::config::ResolvedConfig;
use crate::core::feed::PostData;

/// One post in the feed with its own comment thread.
#[derive(Debug, Clone)]
pub struct Post {
    pub data: PostData,
    pub thread: CommentThread,
}

impl Post {
    pub fn new(data: PostData, initial_comments: Vec<String>) -> Self {
        Self {
            data,
            thread: CommentThread::new(CommentListController::new(initial_comments)),
        }
    }
}

/// Identity shown in the header of every comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commenter {
    pub name: String,
    pub role: String,
}

pub struct App {
    pub posts: Vec<Post>,
    pub commenter: Commenter,
    pub status_message: String,
}

impl App {
    pub fn new(posts: Vec<PostData>, commenter: Commenter, initial_comments: &[String]) -> Self {
        Self {
            posts: posts
                .into_iter()
                .map(|data| Post::new(data, initial_comments.to_vec()))
                .collect(),
            commenter,
            status_message: String::from("Welcome to Mural!"),
        }
    }

    pub fn from_config(posts: Vec<PostData>, config: &ResolvedConfig) -> Self {
        let commenter = Commenter {
            name: config.commenter_name.clone(),
            role: config.commenter_role.clone(),
        };
        Self::new(posts, commenter, &config.initial_comments)
    }

    pub fn post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn post_mut(&mut self, index: usize) -> Option<&mut Post> {
        self.posts.get_mut(index)
    }
}
