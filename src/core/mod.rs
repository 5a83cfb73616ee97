//! # Core Application Logic
//!
//! This module contains Mural's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Comments (threads)   │
//!                    │  • State (app data)     │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No UI. Pure-ish.       │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`comments`]: `CommentListController`, `CommentItem` and their thread
//! - [`feed`]: post props and feed file loading
//! - [`state`]: the `App` struct holding all application state
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: config file, env and CLI resolution
//! - [`error`]: validation and feed errors

pub mod action;
pub mod comments;
pub mod config;
pub mod error;
pub mod feed;
pub mod state;
