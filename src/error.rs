//! Error types and result handling for Tana operations.
//!
//! All operations return a [`Result<T>`] which is a type alias for
//! `std::result::Result<T, Error>`. The error taxonomy is shared by every
//! provider: an adapter classifies each raw transport or decode failure into
//! exactly one variant and returns it unchanged through the [`Registry`].
//! No variant is handled or retried inside the crate itself — classification,
//! not recovery, is the core's job. Recovery policy belongs to the caller,
//! and [`Error::is_retryable`] tells it which variants are worth retrying
//! after backoff.
//!
//! [`Registry`]: crate::registry::Registry
//!
//! # Examples
//!
//! ```rust
//! use tana::error::{Error, Result};
//!
//! fn lookup(id: &str) -> Result<()> {
//!     Err(Error::ProviderNotFound(id.to_string()))
//! }
//!
//! match lookup("nope") {
//!     Err(Error::ProviderNotFound(id)) => println!("unknown provider: {}", id),
//!     Err(e) if e.is_retryable() => println!("try again later: {}", e),
//!     other => println!("{:?}", other),
//! }
//! ```

use thiserror::Error;

/// Type alias for Results with Tana errors.
pub type Result<T> = std::result::Result<T, Error>;

/// The uniform error vocabulary for all providers and the registry.
///
/// # Variants
///
/// * [`ProviderNotFound`](Error::ProviderNotFound) - Unknown registry key (caller error, not retryable)
/// * [`MangaNotFound`](Error::MangaNotFound) - Valid provider, absent manga
/// * [`ChapterNotFound`](Error::ChapterNotFound) - Valid provider, absent chapter
/// * [`RateLimited`](Error::RateLimited) - Upstream throttling (retryable after backoff)
/// * [`SourceUnavailable`](Error::SourceUnavailable) - Upstream down or unexpected status (retryable)
/// * [`InvalidResponse`](Error::InvalidResponse) - Payload did not match the expected shape
/// * [`Cancelled`](Error::Cancelled) - Caller-initiated cancellation, not an upstream fault
#[derive(Error, Debug)]
pub enum Error {
    /// No provider is registered under the given ID.
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// The source reports no manga with the given ID.
    #[error("manga not found: {0}")]
    MangaNotFound(String),

    /// The source reports no chapter with the given ID.
    #[error("chapter not found: {0}")]
    ChapterNotFound(String),

    /// The source signalled throttling (HTTP 429).
    ///
    /// `retry_after` carries the source's `Retry-After` header in seconds
    /// when it sent one.
    #[error("rate limited, retry after {retry_after:?} seconds")]
    RateLimited { retry_after: Option<u64> },

    /// The source is down, unreachable, or returned an unexpected status.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The payload could not be decoded into the expected shape.
    ///
    /// Not retryable without an upstream fix.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The caller cancelled the operation or its deadline elapsed.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Creates a source-unavailable error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::source_unavailable("unexpected status: 503");
    /// ```
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Error::SourceUnavailable(msg.into())
    }

    /// Creates an invalid-response error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::invalid_response("missing data field");
    /// ```
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Error::InvalidResponse(msg.into())
    }

    /// Creates a rate-limit error with an optional retry-after time.
    ///
    /// The retry-after parameter typically comes from the `Retry-After`
    /// HTTP header.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tana::Error;
    ///
    /// let error = Error::rate_limited(Some(60));
    /// let error = Error::rate_limited(None);
    /// ```
    pub fn rate_limited(retry_after: Option<u64>) -> Self {
        Error::RateLimited { retry_after }
    }

    /// Returns `true` for errors a caller may retry after backoff.
    ///
    /// Only [`RateLimited`](Error::RateLimited) and
    /// [`SourceUnavailable`](Error::SourceUnavailable) qualify; everything
    /// else is either a caller error, a decode mismatch that a retry cannot
    /// fix, or a cancellation the caller asked for.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::RateLimited { .. } | Error::SourceUnavailable(_)
        )
    }
}
