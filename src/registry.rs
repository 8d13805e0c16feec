//! Thread-safe directory of provider instances, keyed by provider ID.
//!
//! The [`Registry`] is a process-wide shared resource: read by every
//! concurrent inbound request and written only at startup when providers are
//! registered. A single reader/writer lock protects the internal map —
//! providers are immutable after registration, so no per-entry locking is
//! needed. The registry performs no I/O of its own and never blocks beyond
//! brief lock acquisition.
//!
//! Model it as one explicitly constructed instance passed to whatever needs
//! it (API layer, library service), not a package-level singleton. Lifecycle
//! is "created once at process start, lives for process lifetime".
//!
//! # Examples
//!
//! ```rust,no_run
//! use tana::prelude::*;
//! use tana::{CancellationToken, Result};
//! # #[cfg(feature = "source-mangadex")]
//! use tana::providers::MangaDex;
//!
//! # #[cfg(feature = "source-mangadex")]
//! # async fn example() -> Result<()> {
//! let registry = Registry::new();
//! registry.register(MangaDex::new("en"));
//!
//! let ctx = CancellationToken::new();
//! let results = registry.search(&ctx, "mangadex", "one piece").await?;
//! println!("found {} results", results.len());
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    error::{Error, Result},
    provider::Provider,
    types::{Chapter, MangaDetail, MangaSummary, Page, ProviderInfo},
};

/// Concurrent directory mapping provider IDs to provider instances.
///
/// Reads (`get`, `list`, and all dispatch methods) take the read lock only;
/// [`register`](Registry::register) takes the write lock. The resolved
/// `Arc<dyn Provider>` is cloned out before any await, so no lock is ever
/// held across I/O.
pub struct Registry {
    providers: RwLock<HashMap<String, Arc<dyn Provider>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a provider under `provider.info().id`.
    ///
    /// Overwrites any prior registration for that ID — last registration
    /// wins, there is no duplicate-detection error. Registration is expected
    /// only at process startup, but the write lock makes concurrent
    /// registration safe regardless.
    pub fn register(&self, provider: impl Provider + 'static) {
        let info = provider.info();
        self.providers
            .write()
            .insert(info.id.clone(), Arc::new(provider));
        info!(provider = %info.id, name = %info.name, "registered provider");
    }

    /// Returns the provider registered under `id`.
    ///
    /// # Errors
    ///
    /// [`Error::ProviderNotFound`] when no provider is registered under `id`.
    pub fn get(&self, id: &str) -> Result<Arc<dyn Provider>> {
        self.providers
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ProviderNotFound(id.to_string()))
    }

    /// Returns an unordered snapshot of all registered providers' info.
    ///
    /// Safe to call concurrently with [`register`](Registry::register).
    pub fn list(&self) -> Vec<ProviderInfo> {
        self.providers.read().values().map(|p| p.info()).collect()
    }

    /// Searches using the specified provider.
    ///
    /// Propagates [`Error::ProviderNotFound`] unchanged when the ID is
    /// unknown; otherwise forwards to
    /// [`Provider::search`](crate::provider::Provider::search).
    pub async fn search(
        &self,
        ctx: &CancellationToken,
        provider_id: &str,
        query: &str,
    ) -> Result<Vec<MangaSummary>> {
        let provider = self.get(provider_id)?;
        provider.search(ctx, query).await
    }

    /// Fetches manga details from the specified provider.
    pub async fn get_manga(
        &self,
        ctx: &CancellationToken,
        provider_id: &str,
        manga_id: &str,
    ) -> Result<MangaDetail> {
        let provider = self.get(provider_id)?;
        provider.get_manga(ctx, manga_id).await
    }

    /// Fetches the complete chapter list from the specified provider.
    pub async fn get_chapters(
        &self,
        ctx: &CancellationToken,
        provider_id: &str,
        manga_id: &str,
    ) -> Result<Vec<Chapter>> {
        let provider = self.get(provider_id)?;
        provider.get_chapters(ctx, manga_id).await
    }

    /// Fetches a chapter's pages from the specified provider.
    pub async fn get_pages(
        &self,
        ctx: &CancellationToken,
        provider_id: &str,
        chapter_id: &str,
    ) -> Result<Vec<Page>> {
        let provider = self.get(provider_id)?;
        provider.get_pages(ctx, chapter_id).await
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
