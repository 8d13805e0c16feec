//! The capability contract every content source must implement.
//!
//! A provider is anything polymorphic over the capability set
//! {info, search, get_manga, get_chapters, get_pages}. There is no shared
//! base state: each concrete source is a standalone implementation of
//! [`Provider`], so adding a new source carries zero risk to existing ones.
//!
//! Every I/O method takes a [`CancellationToken`] as its execution context.
//! Implementations must observe cancellation promptly — within one HTTP
//! round trip — rather than only at operation boundaries, and must surface
//! it as [`Error::Cancelled`](crate::Error::Cancelled).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    error::Result,
    types::{Chapter, MangaDetail, MangaSummary, Page, ProviderInfo},
};

/// Trait that all manga sources must implement.
///
/// # Implementation guidelines
///
/// - Classify every transport or decode failure into exactly one
///   [`Error`](crate::Error) variant; never swallow or retry internally.
///   Retry policy belongs to the caller.
/// - Keep request-scoped state on the call stack. Implementations must be
///   safe for concurrent use by multiple callers, which falls out naturally
///   when no adapter-held state is written during a request.
/// - Select every network call against the cancellation token.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use tana::prelude::*;
/// use tana::{CancellationToken, Result};
///
/// struct MySource {
///     info: ProviderInfo,
/// }
///
/// #[async_trait]
/// impl Provider for MySource {
///     fn info(&self) -> ProviderInfo {
///         self.info.clone()
///     }
///
///     async fn search(&self, ctx: &CancellationToken, query: &str) -> Result<Vec<MangaSummary>> {
///         # let _ = (ctx, query);
///         Ok(vec![])
///     }
///
///     async fn get_manga(&self, ctx: &CancellationToken, id: &str) -> Result<MangaDetail> {
///         # let _ = ctx;
///         Err(tana::Error::MangaNotFound(id.to_string()))
///     }
///
///     async fn get_chapters(&self, ctx: &CancellationToken, manga_id: &str) -> Result<Vec<Chapter>> {
///         # let _ = (ctx, manga_id);
///         Ok(vec![])
///     }
///
///     async fn get_pages(&self, ctx: &CancellationToken, chapter_id: &str) -> Result<Vec<Page>> {
///         # let _ = (ctx, chapter_id);
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Returns metadata about this provider.
    ///
    /// Pure and infallible: the info is constructed once at provider
    /// creation and cloned out here, no I/O involved.
    fn info(&self) -> ProviderInfo;

    /// Searches the source's catalog for manga matching the query.
    ///
    /// The query must be non-empty; validating and trimming it is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// * [`Error::RateLimited`](crate::Error::RateLimited) - Upstream throttling
    /// * [`Error::SourceUnavailable`](crate::Error::SourceUnavailable) - Any other non-2xx or transport failure
    /// * [`Error::InvalidResponse`](crate::Error::InvalidResponse) - Payload could not be decoded
    async fn search(&self, ctx: &CancellationToken, query: &str) -> Result<Vec<MangaSummary>>;

    /// Fetches the full catalog record for a manga.
    ///
    /// # Errors
    ///
    /// * [`Error::MangaNotFound`](crate::Error::MangaNotFound) - The source reports no such id
    /// * Plus the same kinds as [`search`](Provider::search)
    async fn get_manga(&self, ctx: &CancellationToken, id: &str) -> Result<MangaDetail>;

    /// Fetches the **complete** chapter list for a manga, not one page of it.
    ///
    /// Ordering is ascending by the source's native chapter ordering.
    ///
    /// # Errors
    ///
    /// * [`Error::Cancelled`](crate::Error::Cancelled) - The token fired mid-pagination
    /// * Plus the same kinds as [`get_manga`](Provider::get_manga)
    async fn get_chapters(&self, ctx: &CancellationToken, manga_id: &str) -> Result<Vec<Chapter>>;

    /// Fetches all pages for a chapter, ordered by `index` ascending and
    /// contiguous from 0.
    ///
    /// # Errors
    ///
    /// * [`Error::ChapterNotFound`](crate::Error::ChapterNotFound) - The source reports no such chapter
    /// * Plus the same kinds as [`search`](Provider::search)
    async fn get_pages(&self, ctx: &CancellationToken, chapter_id: &str) -> Result<Vec<Page>>;
}
