//! # Comment Threads
//!
//! The comment state machine behind every post.
//!
//! ```text
//! CommentThread
//! ├── controller: CommentListController   // authoritative texts + draft
//! └── items: Vec<CommentItem>             // one per text, owns applause
//! ```
//!
//! The controller owns the ordered comment texts and the pending draft. Each
//! `CommentItem` owns only its applause counter. Items never touch the list
//! directly: deletion goes back to the owner through the `DeleteComment`
//! capability, keyed by the comment's text rather than its position.
//!
//! ## Removal by value
//!
//! `remove_comment` drops *every* entry equal to the given text. Two comments
//! with identical text vanish together when either one is deleted. Comments
//! carry no identity beyond their text, so this is the observable behavior.

use log::{debug, info};

use crate::core::error::ValidationError;

/// Comments a freshly mounted post starts with.
pub const DEFAULT_INITIAL_COMMENTS: &[&str] = &["post muito bacana"];

/// Capability handed from an owner down to its comment items.
///
/// An item calls this with its exact text to ask for its own removal. The
/// owner decides what actually happens.
pub trait DeleteComment {
    fn delete_comment(&mut self, text: &str);
}

/// Upward request from an item, as a value for event-driven owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentEvent {
    /// Remove every comment with this exact text.
    Delete(String),
}

/// Owns the comment texts and the draft for one post.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentListController {
    comments: Vec<String>,
    draft: String,
    /// Set by a rejected submit, cleared by the next draft update.
    validation: Option<ValidationError>,
}

impl CommentListController {
    pub fn new(initial: Vec<String>) -> Self {
        Self {
            comments: initial,
            draft: String::new(),
            validation: None,
        }
    }

    pub fn with_default_comments() -> Self {
        Self::new(DEFAULT_INITIAL_COMMENTS.iter().map(|s| s.to_string()).collect())
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The submit control is disabled while this is true.
    pub fn is_draft_empty(&self) -> bool {
        self.draft.is_empty()
    }

    /// Marker left by the last rejected submit, if the draft hasn't changed since.
    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation
    }

    /// Replace the draft and clear any validation marker.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.validation = None;
    }

    /// Append the draft to the end of the list and reset it.
    ///
    /// Only the empty string is rejected; whitespace is a valid comment.
    pub fn submit_draft(&mut self) -> Result<(), ValidationError> {
        if self.draft.is_empty() {
            debug!("Rejected empty draft submission");
            self.validation = Some(ValidationError::EmptyDraft);
            return Err(ValidationError::EmptyDraft);
        }

        let text = std::mem::take(&mut self.draft);
        info!("Comment added ({} bytes)", text.len());
        self.comments.push(text);
        Ok(())
    }

    /// Drop every comment equal to `text`, keeping the order of the rest.
    ///
    /// Returns how many entries were removed. Zero means the list is unchanged.
    pub fn remove_comment(&mut self, text: &str) -> usize {
        let before = self.comments.len();
        self.comments.retain(|comment| comment != text);
        let removed = before - self.comments.len();
        if removed > 0 {
            info!("Removed {} comment(s)", removed);
        } else {
            debug!("Remove requested for absent comment");
        }
        removed
    }
}

impl CommentListController {
    /// Apply an item's request. Returns how many comments were removed.
    pub fn apply(&mut self, event: CommentEvent) -> usize {
        match event {
            CommentEvent::Delete(text) => self.remove_comment(&text),
        }
    }
}

impl DeleteComment for CommentListController {
    fn delete_comment(&mut self, text: &str) {
        self.remove_comment(text);
    }
}

/// One rendered comment and its local applause counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentItem {
    content: String,
    applause: u64,
}

impl CommentItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            applause: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn applause(&self) -> u64 {
        self.applause
    }

    pub fn increment_applause(&mut self) {
        self.applause = self.applause.saturating_add(1);
    }

    /// Ask `owner` to remove this comment by its exact text.
    ///
    /// Local state is untouched; whether the item disappears is the owner's call.
    pub fn request_delete<D: DeleteComment + ?Sized>(&self, owner: &mut D) {
        owner.delete_comment(&self.content);
    }

    /// The same request as [`CommentItem::request_delete`], returned as a value.
    pub fn delete_request(&self) -> CommentEvent {
        CommentEvent::Delete(self.content.clone())
    }
}

/// Re-key `previous` items against the controller's current texts.
///
/// Each text claims the first unclaimed item with equal content, which keeps
/// its applause count. Texts without a match get a fresh item. Leftover items
/// are dropped along with their counters.
pub fn reconcile(previous: Vec<CommentItem>, comments: &[String]) -> Vec<CommentItem> {
    let mut pool: Vec<Option<CommentItem>> = previous.into_iter().map(Some).collect();

    comments
        .iter()
        .map(|text| {
            pool.iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|item| item.content == *text))
                .and_then(Option::take)
                .unwrap_or_else(|| CommentItem::new(text.clone()))
        })
        .collect()
}

/// A post's controller together with the items it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
    controller: CommentListController,
    items: Vec<CommentItem>,
}

impl Default for CommentThread {
    fn default() -> Self {
        Self::new(CommentListController::with_default_comments())
    }
}

impl CommentThread {
    pub fn new(controller: CommentListController) -> Self {
        let items = reconcile(Vec::new(), controller.comments());
        Self { controller, items }
    }

    pub fn controller(&self) -> &CommentListController {
        &self.controller
    }

    pub fn items(&self) -> &[CommentItem] {
        &self.items
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.controller.update_draft(text);
    }

    pub fn submit_draft(&mut self) -> Result<(), ValidationError> {
        self.controller.submit_draft()?;
        self.sync_items();
        Ok(())
    }

    /// Applaud the comment at `index`. Returns the new count, or `None` if out of range.
    pub fn applaud(&mut self, index: usize) -> Option<u64> {
        let item = self.items.get_mut(index)?;
        item.increment_applause();
        Some(item.applause())
    }

    /// Let the item at `index` request its own deletion from the controller.
    ///
    /// Returns the number of comments removed (duplicates go together).
    pub fn delete_at(&mut self, index: usize) -> usize {
        let before = self.controller.comments().len();
        if let Some(item) = self.items.get(index) {
            item.request_delete(&mut self.controller);
            self.sync_items();
        }
        before - self.controller.comments().len()
    }

    fn sync_items(&mut self) {
        let previous = std::mem::take(&mut self.items);
        self.items = reconcile(previous, self.controller.comments());
    }
}

impl DeleteComment for CommentThread {
    fn delete_comment(&mut self, text: &str) {
        self.controller.remove_comment(text);
        self.sync_items();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(comments: &[&str]) -> CommentListController {
        CommentListController::new(comments.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_default_comments() {
        let c = CommentListController::with_default_comments();
        assert_eq!(c.comments(), ["post muito bacana"]);
        assert_eq!(c.draft(), "");
        assert!(c.is_draft_empty());
        assert!(c.validation_error().is_none());
    }

    #[test]
    fn test_submit_appends_and_resets_draft() {
        let mut c = CommentListController::with_default_comments();
        c.update_draft("great post");
        assert!(!c.is_draft_empty());

        assert_eq!(c.submit_draft(), Ok(()));
        assert_eq!(c.comments(), ["post muito bacana", "great post"]);
        assert_eq!(c.draft(), "");
    }

    #[test]
    fn test_submit_empty_draft_rejected_without_mutation() {
        let mut c = CommentListController::with_default_comments();
        assert_eq!(c.submit_draft(), Err(ValidationError::EmptyDraft));
        assert_eq!(c.comments(), ["post muito bacana"]);
        assert_eq!(c.draft(), "");
        assert_eq!(c.validation_error(), Some(ValidationError::EmptyDraft));
    }

    #[test]
    fn test_whitespace_draft_is_accepted() {
        let mut c = controller(&[]);
        c.update_draft("   ");
        assert!(c.submit_draft().is_ok());
        assert_eq!(c.comments(), ["   "]);
    }

    #[test]
    fn test_update_draft_clears_validation_marker() {
        let mut c = controller(&[]);
        let _ = c.submit_draft();
        assert!(c.validation_error().is_some());

        c.update_draft("x");
        assert!(c.validation_error().is_none());

        // Even updating back to empty clears it; only submit sets it.
        let _ = c.submit_draft();
        c.update_draft("");
        assert!(c.validation_error().is_none());
    }

    #[test]
    fn test_remove_drops_every_duplicate_and_keeps_order() {
        let mut c = controller(&["a", "dup", "b", "dup", "c"]);
        assert_eq!(c.remove_comment("dup"), 2);
        assert_eq!(c.comments(), ["a", "b", "c"]);
    }

    #[test]
    fn test_remove_absent_is_noop_and_idempotent() {
        let mut c = controller(&["a", "b"]);
        assert_eq!(c.remove_comment("a"), 1);
        assert_eq!(c.remove_comment("a"), 0);
        assert_eq!(c.comments(), ["b"]);
    }

    #[test]
    fn test_feed_scenario() {
        let mut c = CommentListController::with_default_comments();
        c.update_draft("great post");
        c.submit_draft().unwrap();
        assert_eq!(c.comments(), ["post muito bacana", "great post"]);
        assert_eq!(c.draft(), "");

        c.remove_comment("post muito bacana");
        assert_eq!(c.comments(), ["great post"]);
    }

    #[test]
    fn test_applause_counts_increments() {
        let mut item = CommentItem::new("hi");
        assert_eq!(item.applause(), 0);
        for _ in 0..5 {
            item.increment_applause();
        }
        assert_eq!(item.applause(), 5);
    }

    #[test]
    fn test_request_delete_passes_exact_text_to_owner() {
        struct Recorder(Vec<String>);
        impl DeleteComment for Recorder {
            fn delete_comment(&mut self, text: &str) {
                self.0.push(text.to_string());
            }
        }

        let mut item = CommentItem::new("exact text ");
        item.increment_applause();
        let mut owner = Recorder(Vec::new());
        item.request_delete(&mut owner);

        assert_eq!(owner.0, ["exact text "]);
        assert_eq!(item.applause(), 1, "requesting deletion leaves local state alone");
    }

    #[test]
    fn test_delete_request_round_trips_through_controller() {
        let mut c = CommentListController::new(vec!["a".to_string(), "b".to_string()]);
        let item = CommentItem::new("a");

        let event = item.delete_request();
        assert_eq!(event, CommentEvent::Delete("a".to_string()));
        assert_eq!(c.apply(event.clone()), 1);
        assert_eq!(c.comments(), ["b"]);
        assert_eq!(c.apply(event), 0);
    }

    #[test]
    fn test_reconcile_keeps_counters_of_surviving_items() {
        let mut first = CommentItem::new("a");
        first.increment_applause();
        let mut second = CommentItem::new("b");
        second.increment_applause();
        second.increment_applause();

        let items = reconcile(vec![first, second], &["b".to_string(), "new".to_string()]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content(), "b");
        assert_eq!(items[0].applause(), 2);
        assert_eq!(items[1].content(), "new");
        assert_eq!(items[1].applause(), 0);
    }

    #[test]
    fn test_reconcile_readded_text_starts_fresh() {
        let mut thread = CommentThread::new(controller(&["hello"]));
        thread.applaud(0);
        thread.delete_at(0);

        thread.update_draft("hello");
        thread.submit_draft().unwrap();
        assert_eq!(thread.items()[0].applause(), 0);
    }

    #[test]
    fn test_thread_applause_survives_other_mutations() {
        let mut thread = CommentThread::new(controller(&["a", "b"]));
        thread.applaud(1);
        thread.applaud(1);

        thread.update_draft("c");
        thread.submit_draft().unwrap();
        assert_eq!(thread.items()[1].applause(), 2);

        thread.delete_at(0);
        assert_eq!(thread.items().len(), 2);
        assert_eq!(thread.items()[0].content(), "b");
        assert_eq!(thread.items()[0].applause(), 2);
    }

    #[test]
    fn test_thread_delete_duplicates_removes_both_items() {
        let mut thread = CommentThread::new(controller(&["same", "other", "same"]));
        assert_eq!(thread.delete_at(2), 2);
        assert_eq!(thread.controller().comments(), ["other"]);
        assert_eq!(thread.items().len(), 1);
    }

    #[test]
    fn test_thread_out_of_range_is_noop() {
        let mut thread = CommentThread::default();
        assert_eq!(thread.applaud(7), None);
        assert_eq!(thread.delete_at(7), 0);
        assert_eq!(thread.controller().comments(), ["post muito bacana"]);
    }

    #[test]
    fn test_thread_as_delete_capability() {
        let mut thread = CommentThread::new(controller(&["x", "y"]));
        thread.delete_comment("x");
        assert_eq!(thread.items().len(), 1);
        assert_eq!(thread.items()[0].content(), "y");
    }
}
