//! Registry behavior: lookup failures, registration semantics, dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use tana::prelude::*;
use tana::{CancellationToken, Error, Result};

/// A provider that serves canned values, enough to observe dispatch.
struct StubProvider {
    info: ProviderInfo,
}

impl StubProvider {
    fn new(id: &str, name: &str) -> Self {
        Self {
            info: ProviderInfo {
                id: id.to_string(),
                name: name.to_string(),
                base_url: "https://example.com".to_string(),
                languages: vec!["en".to_string()],
                is_nsfw: false,
            },
        }
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn info(&self) -> ProviderInfo {
        self.info.clone()
    }

    async fn search(&self, _ctx: &CancellationToken, query: &str) -> Result<Vec<MangaSummary>> {
        Ok(vec![MangaSummary {
            id: "m1".to_string(),
            title: format!("{} for {}", self.info.name, query),
            cover_url: None,
            url: "https://example.com/title/m1".to_string(),
        }])
    }

    async fn get_manga(&self, _ctx: &CancellationToken, id: &str) -> Result<MangaDetail> {
        Err(Error::MangaNotFound(id.to_string()))
    }

    async fn get_chapters(&self, _ctx: &CancellationToken, _manga_id: &str) -> Result<Vec<Chapter>> {
        Ok(vec![])
    }

    async fn get_pages(&self, _ctx: &CancellationToken, _chapter_id: &str) -> Result<Vec<Page>> {
        Ok(vec![])
    }
}

#[test]
fn get_unknown_provider_fails() {
    let registry = Registry::new();

    match registry.get("nope") {
        Err(Error::ProviderNotFound(id)) => assert_eq!(id, "nope"),
        other => panic!("expected ProviderNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn dispatch_to_unknown_provider_fails() {
    let registry = Registry::new();
    let ctx = CancellationToken::new();

    assert!(matches!(
        registry.search(&ctx, "nope", "query").await,
        Err(Error::ProviderNotFound(_))
    ));
    assert!(matches!(
        registry.get_manga(&ctx, "nope", "m1").await,
        Err(Error::ProviderNotFound(_))
    ));
    assert!(matches!(
        registry.get_chapters(&ctx, "nope", "m1").await,
        Err(Error::ProviderNotFound(_))
    ));
    assert!(matches!(
        registry.get_pages(&ctx, "nope", "c1").await,
        Err(Error::ProviderNotFound(_))
    ));
}

#[test]
fn register_then_get_returns_same_instance() {
    let registry = Registry::new();
    registry.register(StubProvider::new("stub", "Stub"));

    let first = registry.get("stub").unwrap();
    let second = registry.get("stub").unwrap();

    assert_eq!(first.info().name, "Stub");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn reregistering_same_id_replaces_prior_instance() {
    let registry = Registry::new();
    registry.register(StubProvider::new("stub", "First"));
    registry.register(StubProvider::new("stub", "Second"));

    assert_eq!(registry.get("stub").unwrap().info().name, "Second");
    assert_eq!(registry.list().len(), 1);
}

#[test]
fn list_snapshots_all_registered_providers() {
    let registry = Registry::new();
    assert!(registry.list().is_empty());

    registry.register(StubProvider::new("a", "A"));
    registry.register(StubProvider::new("b", "B"));

    let mut ids: Vec<String> = registry.list().into_iter().map(|i| i.id).collect();
    ids.sort();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn dispatch_forwards_to_registered_provider() {
    let registry = Registry::new();
    registry.register(StubProvider::new("stub", "Stub"));
    let ctx = CancellationToken::new();

    let results = registry.search(&ctx, "stub", "naruto").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Stub for naruto");

    // Provider errors pass through the registry unchanged.
    assert!(matches!(
        registry.get_manga(&ctx, "stub", "missing").await,
        Err(Error::MangaNotFound(id)) if id == "missing"
    ));
}

#[test]
fn register_is_safe_alongside_concurrent_reads() {
    let registry = Arc::new(Registry::new());

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for j in 0..50 {
                    registry.register(StubProvider::new(
                        &format!("p{i}-{j}"),
                        &format!("Provider {i}-{j}"),
                    ));
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    let _ = registry.list();
                    let _ = registry.get("p0-0");
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(registry.list().len(), 200);
}
