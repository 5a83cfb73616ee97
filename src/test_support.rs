//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use chrono::{DateTime, TimeZone, Utc};

use crate::core::comments::DEFAULT_INITIAL_COMMENTS;
use crate::core::feed::sample_feed;
use crate::core::state::{App, Commenter};

/// Fixed clock so rendered relative times are stable.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 5, 11, 9, 13, 30).unwrap()
}

/// Creates a test App over the sample feed with the default initial comments.
pub fn test_app() -> App {
    let initial: Vec<String> = DEFAULT_INITIAL_COMMENTS.iter().map(|s| s.to_string()).collect();
    App::new(
        sample_feed(test_now()),
        Commenter {
            name: "Tester".to_string(),
            role: "QA".to_string(),
        },
        &initial,
    )
}
