//! # Tana - Pluggable manga source-provider library
//!
//! Tana aggregates manga catalog data from external content sources through
//! a uniform provider abstraction. It ships the building blocks a manga
//! library server needs on its upstream side: shared domain types, the
//! [`Provider`] contract every source implements, a thread-safe [`Registry`]
//! that dispatches calls by provider ID, and a REST-based MangaDex provider
//! with pagination, multi-language metadata resolution and a typed error
//! taxonomy.
//!
//! Persistence, HTTP routing and configuration are deliberately out of
//! scope: they are the caller's job, and they talk to this crate only
//! through the registry.
//!
//! ## Features
//!
//! - **Uniform provider contract**: search, detail fetch, chapter listing
//!   and page listing behind one async trait
//! - **Typed errors**: every failure classifies into one error kind, with
//!   retryability the caller can query
//! - **Cancellation**: every operation takes a [`CancellationToken`] and
//!   observes it within one HTTP round trip
//! - **Locale fallback**: priority-ordered resolution of multi-language
//!   titles and descriptions
//! - **Feature-gated sources**: build with only the providers you need
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tana::prelude::*;
//! use tana::CancellationToken;
//! #[cfg(feature = "source-mangadex")]
//! use tana::providers::MangaDex;
//!
//! #[tokio::main]
//! async fn main() -> tana::Result<()> {
//!     let registry = Registry::new();
//!     #[cfg(feature = "source-mangadex")]
//!     registry.register(MangaDex::new("en"));
//!
//!     let ctx = CancellationToken::new();
//!     let results = registry.search(&ctx, "mangadex", "one piece").await?;
//!     println!("found {} results", results.len());
//!
//!     if let Some(manga) = results.first() {
//!         let detail = registry.get_manga(&ctx, "mangadex", &manga.id).await?;
//!         let chapters = registry.get_chapters(&ctx, "mangadex", &manga.id).await?;
//!         println!("{}: {} chapters", detail.title, chapters.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`]: Domain value objects shared by all providers
//! - [`provider`]: The capability contract every source implements
//! - [`registry`]: Concurrent directory of provider instances
//! - [`providers`]: Concrete source implementations
//! - [`lang`]: Locale-fallback resolution for multi-language metadata
//! - [`error`]: The shared error vocabulary
//!
//! ## Error handling
//!
//! Providers classify, never recover: a 429 surfaces as
//! [`Error::RateLimited`], any other upstream failure as
//! [`Error::SourceUnavailable`], a malformed payload as
//! [`Error::InvalidResponse`], and caller cancellation as
//! [`Error::Cancelled`]. Backoff and retry policy stay with the caller:
//!
//! ```rust
//! use tana::Error;
//!
//! let err = Error::rate_limited(Some(30));
//! assert!(err.is_retryable());
//! assert!(!Error::Cancelled.is_retryable());
//! ```

pub mod error;
pub mod lang;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod types;

/// Prelude module for convenient imports.
///
/// Re-exports the most commonly used types and traits so a single
/// `use tana::prelude::*;` covers the typical call site.
pub mod prelude {
    pub use crate::{
        provider::Provider,
        registry::Registry,
        types::{Chapter, MangaDetail, MangaSummary, Page, ProviderInfo},
    };
}

// Re-export main types at crate root for direct access
pub use error::{Error, Result};
pub use provider::Provider;
pub use registry::Registry;
pub use types::{Chapter, MangaDetail, MangaSummary, Page, ProviderInfo};

/// The execution context every provider operation takes; re-exported so
/// callers don't need a direct tokio-util dependency.
pub use tokio_util::sync::CancellationToken;
