//! # Actions
//!
//! Everything that can happen in Mural becomes an `Action`.
//! User types into the composer? That's `Action::UpdateDraft`.
//! User hits the applause button? That's `Action::Applaud`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` telling the adapter what (if anything)
//! it needs to do in response. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Post and comment indices refer to display order. An index that no longer
//! exists is ignored rather than treated as an error.

use log::{debug, info, warn};

use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the draft of a post's comment form.
    UpdateDraft { post: usize, text: String },
    /// Publish the draft of a post's comment form.
    SubmitDraft { post: usize },
    /// Applaud one comment.
    Applaud { post: usize, comment: usize },
    /// Ask the owning post to remove a comment (and any duplicates).
    DeleteComment { post: usize, comment: usize },
    Quit,
}

/// What the adapter should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The draft was published; clear the input surface.
    DraftSubmitted,
    /// The submit was rejected; keep the input and show the validation marker.
    DraftRejected,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);

    match action {
        Action::Quit => {
            info!("Quit requested");
            Effect::Quit
        }
        Action::UpdateDraft { post, text } => {
            if let Some(p) = app.post_mut(post) {
                p.thread.update_draft(text);
            } else {
                warn!("UpdateDraft for missing post {}", post);
            }
            Effect::None
        }
        Action::SubmitDraft { post } => {
            let Some(p) = app.post_mut(post) else {
                warn!("SubmitDraft for missing post {}", post);
                return Effect::None;
            };
            match p.thread.submit_draft() {
                Ok(()) => {
                    let author = p.data.author.name.clone();
                    app.status_message = format!("Comment published on {}'s post", author);
                    Effect::DraftSubmitted
                }
                Err(e) => {
                    app.status_message = e.to_string();
                    Effect::DraftRejected
                }
            }
        }
        Action::Applaud { post, comment } => {
            match app
                .post_mut(post)
                .and_then(|p| p.thread.applaud(comment))
            {
                Some(count) => debug!("Applause on {}/{} is now {}", post, comment, count),
                None => warn!("Applaud for missing comment {}/{}", post, comment),
            }
            Effect::None
        }
        Action::DeleteComment { post, comment } => {
            let removed = app
                .post_mut(post)
                .map(|p| p.thread.delete_at(comment))
                .unwrap_or(0);
            app.status_message = match removed {
                0 => String::new(),
                1 => "Comment deleted".to_string(),
                n => format!("{} identical comments deleted", n),
            };
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_submit_flow() {
        let mut app = test_app();
        update(
            &mut app,
            Action::UpdateDraft {
                post: 0,
                text: "great post".to_string(),
            },
        );
        let effect = update(&mut app, Action::SubmitDraft { post: 0 });

        assert_eq!(effect, Effect::DraftSubmitted);
        assert_eq!(
            app.posts[0].thread.controller().comments(),
            ["post muito bacana", "great post"]
        );
        assert_eq!(app.posts[0].thread.controller().draft(), "");
        assert!(app.status_message.contains("published"));
    }

    #[test]
    fn test_empty_submit_rejected() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SubmitDraft { post: 1 });

        assert_eq!(effect, Effect::DraftRejected);
        assert_eq!(app.status_message, "This field is required");
        assert_eq!(
            app.posts[1].thread.controller().comments(),
            ["post muito bacana"]
        );
        assert!(app.posts[1].thread.controller().validation_error().is_some());
    }

    #[test]
    fn test_applaud_and_delete() {
        let mut app = test_app();
        update(&mut app, Action::Applaud { post: 0, comment: 0 });
        update(&mut app, Action::Applaud { post: 0, comment: 0 });
        assert_eq!(app.posts[0].thread.items()[0].applause(), 2);

        update(&mut app, Action::DeleteComment { post: 0, comment: 0 });
        assert!(app.posts[0].thread.items().is_empty());
        assert_eq!(app.status_message, "Comment deleted");
    }

    #[test]
    fn test_delete_reports_duplicates() {
        let mut app = test_app();
        for _ in 0..2 {
            update(
                &mut app,
                Action::UpdateDraft {
                    post: 0,
                    text: "same".to_string(),
                },
            );
            update(&mut app, Action::SubmitDraft { post: 0 });
        }
        update(&mut app, Action::DeleteComment { post: 0, comment: 1 });
        assert_eq!(app.status_message, "2 identical comments deleted");
        assert_eq!(
            app.posts[0].thread.controller().comments(),
            ["post muito bacana"]
        );
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::SubmitDraft { post: 99 }),
            Effect::None
        );
        assert_eq!(
            update(&mut app, Action::Applaud { post: 0, comment: 99 }),
            Effect::None
        );
        update(&mut app, Action::DeleteComment { post: 99, comment: 0 });
        assert_eq!(app.posts[0].thread.items().len(), 1);
    }
}
