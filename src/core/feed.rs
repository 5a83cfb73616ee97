//! # Feed Data
//!
//! Read-only post props supplied by the page shell: who wrote the post, its
//! content lines, and when it was published.
//!
//! Posts come from a feed file (`.json` or `.toml`, both shaped as
//! `{ posts = [...] }`) or, when none is configured, from a built-in sample.
//! Field names follow the camelCase form (`avatarUrl`, `publishedAt`) so the
//! same JSON a web front end would use loads unchanged.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::core::error::FeedError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub avatar_url: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Paragraph,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentLine {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub content: String,
}

impl ContentLine {
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Paragraph,
            content: content.into(),
        }
    }

    pub fn link(content: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Link,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub author: Author,
    pub content: Vec<ContentLine>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct FeedFile {
    #[serde(default)]
    posts: Vec<PostData>,
}

/// Load posts from a `.json` or `.toml` feed file.
pub fn load_feed(path: &Path) -> Result<Vec<PostData>, FeedError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = fs::read_to_string(path)?;
    let feed: FeedFile = match extension.as_str() {
        "json" => serde_json::from_str(&contents)?,
        "toml" => toml::from_str(&contents)?,
        other => return Err(FeedError::UnsupportedFormat(other.to_string())),
    };

    info!("Loaded {} post(s) from {}", feed.posts.len(), path.display());
    Ok(feed.posts)
}

/// A small built-in feed used when no feed file is configured.
///
/// Timestamps are relative to `now` so the header labels stay meaningful.
pub fn sample_feed(now: DateTime<Utc>) -> Vec<PostData> {
    vec![
        PostData {
            author: Author {
                avatar_url: "https://github.com/diego3g.png".to_string(),
                name: "Diego Fernandes".to_string(),
                role: "CTO @Rocketseat".to_string(),
            },
            content: vec![
                ContentLine::paragraph("Fala galeraa 👋"),
                ContentLine::paragraph(
                    "Acabei de subir mais um projeto no meu portifa. É um projeto que fiz no \
                     NLW Return, evento da Rocketseat. O nome do projeto é DoctorCare 🚀",
                ),
                ContentLine::link("jane.design/doctorcare"),
            ],
            published_at: now - Duration::hours(1),
        },
        PostData {
            author: Author {
                avatar_url: "https://github.com/maykbrito.png".to_string(),
                name: "Mayk Brito".to_string(),
                role: "Educator @Rocketseat".to_string(),
            },
            content: vec![
                ContentLine::paragraph("Fala pessoal 👋"),
                ContentLine::paragraph("Finalmente finalizei meu novo site/portfólio. Foi um baita desafio criar todo o design e codar na unha, mas consegui 💪🏻"),
                ContentLine::link("devonlane.design"),
            ],
            published_at: now - Duration::days(2),
        },
    ]
}

/// Relative "published" label, e.g. `about 3 hours ago`.
pub fn relative_time(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(published_at);
    if elapsed < Duration::zero() {
        return "in the future".to_string();
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    match (days, hours, minutes) {
        (_, _, 0) => "just now".to_string(),
        (_, 0, 1) => "about 1 minute ago".to_string(),
        (_, 0, m) => format!("about {m} minutes ago"),
        (0, 1, _) => "about 1 hour ago".to_string(),
        (0, h, _) => format!("about {h} hours ago"),
        (1, _, _) => "1 day ago".to_string(),
        (d, _, _) => format!("{d} days ago"),
    }
}

/// Absolute timestamp shown next to the relative label, e.g. `11 May at 08:13h`.
pub fn absolute_time(published_at: DateTime<Utc>) -> String {
    published_at.format("%-d %B at %H:%Mh").to_string()
}
