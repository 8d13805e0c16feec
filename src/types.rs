//! Core data types shared by all providers.
//!
//! This module defines the language-agnostic value objects every content
//! source produces:
//!
//! - [`ProviderInfo`] - Identity and capability advertisement for a source
//! - [`MangaSummary`] - A search-result projection
//! - [`MangaDetail`] - The full catalog record
//! - [`Chapter`] - A single chapter's metadata
//! - [`Page`] - One page within a chapter
//!
//! All of these are plain value objects: created fresh per call, owned
//! exclusively by the caller, never mutated after construction, and never
//! cached by the crate itself. They serialize with camelCase field names so
//! an HTTP layer can pass them through unchanged.
//!
//! A manga's `id` is scoped to its source; together with the owning
//! provider's [`ProviderInfo::id`] it forms the `(provider, source-id)` key a
//! library layer uses for deduplication. The crate does not enforce that
//! uniqueness itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity and capability advertisement for a content source.
///
/// Constructed once when the provider is created and returned by value from
/// [`Provider::info`](crate::provider::Provider::info); never mutated
/// afterwards.
///
/// # Examples
///
/// ```rust
/// use tana::types::ProviderInfo;
///
/// let info = ProviderInfo {
///     id: "mangadex".to_string(),
///     name: "MangaDex".to_string(),
///     base_url: "https://mangadex.org".to_string(),
///     languages: vec!["en".to_string(), "ja".to_string()],
///     is_nsfw: false,
/// };
/// assert_eq!(info.id, "mangadex");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    /// Unique, stable, lowercase token identifying the source
    pub id: String,

    /// Human-readable display name
    pub name: String,

    /// Root URL of the source website
    pub base_url: String,

    /// Supported locale codes, in the source's preference order
    pub languages: Vec<String>,

    /// Content-rating flag
    pub is_nsfw: bool,
}

/// A search-result projection of a manga.
///
/// Recreated per query; carries just enough to render a result list and to
/// fetch the full record later via its `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaSummary {
    /// Source-scoped, opaque, stable identifier
    pub id: String,

    /// Display title, already resolved to one language
    pub title: String,

    /// Cover image URL, when the source exposes one
    pub cover_url: Option<String>,

    /// Canonical URL of the manga on the source website
    pub url: String,
}

/// The full catalog record for a manga.
///
/// Extends the summary fields with description, status, credited people and
/// the source's tag taxonomy. `genres` and `tags` are disjoint partitions of
/// that taxonomy: tags the source groups as genres land in `genres`,
/// everything else in `tags`, each preserving source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaDetail {
    /// Source-scoped, opaque, stable identifier
    pub id: String,

    /// Display title, already resolved to one language
    pub title: String,

    /// Description, resolved to one language when available
    pub description: Option<String>,

    /// Cover image URL, when the source exposes one
    pub cover_url: Option<String>,

    /// Publication status as reported by the source
    pub status: String,

    /// First credited author, when available
    pub author: Option<String>,

    /// First credited artist, when available
    pub artist: Option<String>,

    /// Genre-grouped tags, in source order
    pub genres: Vec<String>,

    /// All remaining tags, in source order
    pub tags: Vec<String>,

    /// Canonical URL of the manga on the source website
    pub url: String,
}

/// A single chapter of a manga.
///
/// # Examples
///
/// ```rust
/// use tana::types::Chapter;
///
/// let chapter = Chapter {
///     id: "ch-1".to_string(),
///     title: "Romance Dawn".to_string(),
///     number: 1.0,
///     volume: Some("1".to_string()),
///     url: "https://mangadex.org/chapter/ch-1".to_string(),
///     published_at: None,
///     page_count: 45,
/// };
/// assert_eq!(chapter.number, 1.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Source-scoped identifier
    pub id: String,

    /// Chapter title; synthesized as `"Chapter N"` when the source has none
    pub title: String,

    /// Chapter number, decimal for .5-style specials.
    ///
    /// `0` when the source string is empty or unparseable, so a literal
    /// chapter 0 and a parse failure are indistinguishable here.
    pub number: f64,

    /// Volume label as reported by the source
    pub volume: Option<String>,

    /// Canonical URL of the chapter on the source website
    pub url: String,

    /// Publication time; `None` when the source has no parseable timestamp
    pub published_at: Option<DateTime<Utc>>,

    /// Number of pages in the chapter
    pub page_count: u32,
}

/// A single page within a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 0-based position within the chapter, contiguous
    pub index: u32,

    /// Direct image URL
    pub url: String,

    /// Image filename as reported by the source
    pub filename: String,
}
