//! MangaDex provider backed by the MangaDex v5 REST API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    error::{Error, Result},
    lang,
    provider::Provider,
    types::{Chapter, MangaDetail, MangaSummary, Page, ProviderInfo},
};

const API_BASE: &str = "https://api.mangadex.org";
const SITE_BASE: &str = "https://mangadex.org";
const COVERS_BASE: &str = "https://uploads.mangadex.org/covers";
const USER_AGENT: &str = concat!("tana/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SEARCH_LIMIT: u32 = 20;

/// Chapter-feed page size; the endpoint caps out well above this.
const FEED_PAGE_LIMIT: u32 = 100;
/// Pause between feed pages to stay under the API's implicit rate limit.
const FEED_PAGE_DELAY: Duration = Duration::from_millis(200);

/// MangaDex search response
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<MangaData>,
    #[serde(default)]
    limit: u32,
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    total: u32,
}

/// MangaDex single-manga response
#[derive(Debug, Deserialize)]
struct MangaResponse {
    data: MangaData,
}

/// MangaDex manga record
#[derive(Debug, Deserialize)]
struct MangaData {
    id: String,
    attributes: MangaAttributes,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

/// MangaDex manga attributes
#[derive(Debug, Deserialize)]
struct MangaAttributes {
    #[serde(default)]
    title: HashMap<String, String>,
    #[serde(default)]
    description: HashMap<String, String>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    tags: Vec<TagData>,
}

/// MangaDex tag record
#[derive(Debug, Deserialize)]
struct TagData {
    attributes: TagAttributes,
}

/// MangaDex tag attributes
#[derive(Debug, Deserialize)]
struct TagAttributes {
    #[serde(default)]
    name: HashMap<String, String>,
    #[serde(default)]
    group: String,
}

/// A loosely typed related entity (cover art, author, artist) attached to a
/// manga record. The attribute shape differs per type tag, so attributes are
/// an untyped bag accessed by known keys with explicit presence checks.
#[derive(Debug, Deserialize)]
struct Relationship {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: Option<serde_json::Map<String, Value>>,
}

/// MangaDex chapter-feed response
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct FeedResponse {
    #[serde(default)]
    data: Vec<ChapterData>,
    #[serde(default)]
    limit: u32,
    #[serde(default)]
    offset: u32,
    #[serde(default)]
    total: u32,
}

/// MangaDex chapter record
#[derive(Debug, Deserialize)]
struct ChapterData {
    id: String,
    attributes: ChapterAttributes,
}

/// MangaDex chapter attributes
#[derive(Debug, Deserialize)]
struct ChapterAttributes {
    title: Option<String>,
    chapter: Option<String>,
    volume: Option<String>,
    #[serde(rename = "publishAt")]
    publish_at: Option<String>,
    #[serde(default)]
    pages: u32,
}

/// MangaDex at-home server response, the second request needed for page URLs
#[derive(Debug, Deserialize)]
struct AtHomeResponse {
    #[serde(rename = "baseUrl", default)]
    base_url: String,
    chapter: AtHomeChapter,
}

/// MangaDex at-home chapter data
#[derive(Debug, Deserialize)]
struct AtHomeChapter {
    #[serde(default)]
    hash: String,
    #[serde(default)]
    data: Vec<String>,
}

/// Provider implementation for MangaDex.org.
///
/// Constructed with a single configuration parameter: the preferred
/// display-language code, used both to resolve multi-language metadata and
/// to filter the chapter feed. The adapter holds no request-scoped state —
/// a shared `reqwest::Client` with a bounded per-call timeout is all it
/// owns — so one instance is safe for concurrent use by multiple callers.
///
/// No request is retried internally. Upstream throttling and outages
/// surface as [`Error::RateLimited`] and [`Error::SourceUnavailable`] so the
/// caller keeps control over backoff strategy.
///
/// # Examples
///
/// ```rust,no_run
/// use tana::prelude::*;
/// use tana::providers::MangaDex;
/// use tana::CancellationToken;
///
/// # async fn example() -> tana::Result<()> {
/// let provider = MangaDex::new("en");
/// let ctx = CancellationToken::new();
///
/// let results = provider.search(&ctx, "one piece").await?;
/// if let Some(manga) = results.first() {
///     let chapters = provider.get_chapters(&ctx, &manga.id).await?;
///     println!("{} has {} chapters", manga.title, chapters.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct MangaDex {
    client: Client,
    info: ProviderInfo,
    language: String,
    api_base: String,
}

impl MangaDex {
    /// Creates a MangaDex provider with the given preferred language code.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(USER_AGENT)
                .gzip(true)
                .brotli(true)
                .build()
                .expect("Failed to build HTTP client"),
            info: ProviderInfo {
                id: "mangadex".to_string(),
                name: "MangaDex".to_string(),
                base_url: SITE_BASE.to_string(),
                languages: [
                    "en", "ja", "ko", "zh", "es", "fr", "de", "it", "pt-br", "ru",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
                is_nsfw: false,
            },
            language: language.into(),
            api_base: API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL.
    ///
    /// Useful for API-compatible self-hosted deployments and for tests.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Issues a GET against `url`, racing it against the cancellation token
    /// so a caller that gives up mid-flight is answered within one round
    /// trip. Transport failures classify as [`Error::SourceUnavailable`].
    async fn execute(&self, ctx: &CancellationToken, url: &str) -> Result<Response> {
        tokio::select! {
            _ = ctx.cancelled() => Err(Error::Cancelled),
            result = self.client.get(url).send() => {
                result.map_err(|e| Error::source_unavailable(e.to_string()))
            }
        }
    }

    /// Builds a search summary from a manga record.
    fn to_summary(&self, manga: MangaData) -> MangaSummary {
        MangaSummary {
            title: lang::resolve_title(&manga.attributes.title, &self.language),
            cover_url: cover_url(&manga.id, &manga.relationships),
            url: format!("{SITE_BASE}/title/{}", manga.id),
            id: manga.id,
        }
    }

    /// Builds the full catalog record from a manga record fetched with
    /// author/artist/cover includes.
    fn to_detail(&self, manga: MangaData) -> MangaDetail {
        let (genres, tags) = self.partition_tags(&manga.attributes.tags);

        MangaDetail {
            title: lang::resolve_title(&manga.attributes.title, &self.language),
            description: lang::resolve_text(&manga.attributes.description, &self.language),
            cover_url: cover_url(&manga.id, &manga.relationships),
            status: manga.attributes.status,
            author: related_name(&manga.relationships, "author"),
            artist: related_name(&manga.relationships, "artist"),
            genres,
            tags,
            url: format!("{SITE_BASE}/title/{}", manga.id),
            id: manga.id,
        }
    }

    /// Splits the source's tag taxonomy into genres (group `"genre"`) and
    /// everything else, preserving source order within each list.
    fn partition_tags(&self, tags: &[TagData]) -> (Vec<String>, Vec<String>) {
        let mut genres = Vec::new();
        let mut others = Vec::new();

        for tag in tags {
            let Some(name) = lang::resolve_text(&tag.attributes.name, &self.language) else {
                continue;
            };
            if tag.attributes.group == "genre" {
                genres.push(name);
            } else {
                others.push(name);
            }
        }

        (genres, others)
    }

    fn to_chapter(&self, data: ChapterData) -> Chapter {
        let number = parse_chapter_number(data.attributes.chapter.as_deref());
        let title = data
            .attributes
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Chapter {number}"));

        Chapter {
            title,
            number,
            volume: data.attributes.volume.filter(|v| !v.is_empty()),
            url: format!("{SITE_BASE}/chapter/{}", data.id),
            published_at: data
                .attributes
                .publish_at
                .as_deref()
                .and_then(parse_publish_time),
            page_count: data.attributes.pages,
            id: data.id,
        }
    }
}

#[async_trait]
impl Provider for MangaDex {
    fn info(&self) -> ProviderInfo {
        self.info.clone()
    }

    async fn search(&self, ctx: &CancellationToken, query: &str) -> Result<Vec<MangaSummary>> {
        let url = format!(
            "{}/manga?title={}&limit={}&includes[]=cover_art",
            self.api_base,
            urlencoding::encode(query),
            SEARCH_LIMIT,
        );
        debug!(query, "searching catalog");

        let response = self.execute(ctx, &url).await?;
        let response = ensure_ok(response, || {
            Error::source_unavailable("unexpected status: 404 Not Found")
        })?;
        let body: SearchResponse = decode(response).await?;

        Ok(body
            .data
            .into_iter()
            .map(|manga| self.to_summary(manga))
            .collect())
    }

    async fn get_manga(&self, ctx: &CancellationToken, id: &str) -> Result<MangaDetail> {
        let url = format!(
            "{}/manga/{}?includes[]=cover_art&includes[]=author&includes[]=artist",
            self.api_base, id,
        );

        let response = self.execute(ctx, &url).await?;
        let response = ensure_ok(response, || Error::MangaNotFound(id.to_string()))?;
        let body: MangaResponse = decode(response).await?;

        Ok(self.to_detail(body.data))
    }

    async fn get_chapters(&self, ctx: &CancellationToken, manga_id: &str) -> Result<Vec<Chapter>> {
        let mut chapters: Vec<Chapter> = Vec::new();
        let mut offset = 0u32;

        loop {
            let url = format!(
                "{}/manga/{}/feed?limit={}&offset={}&translatedLanguage[]={}&order[chapter]=asc",
                self.api_base, manga_id, FEED_PAGE_LIMIT, offset, self.language,
            );
            debug!(offset, "fetching chapter feed page");

            let response = self.execute(ctx, &url).await?;
            let response = ensure_ok(response, || Error::MangaNotFound(manga_id.to_string()))?;
            let page: FeedResponse = decode(response).await?;

            // The feed is requested in increasing offset order and
            // server-sorted ascending, so plain concatenation keeps the
            // sequence globally ascending.
            let fetched = page.data.len();
            for entry in page.data {
                chapters.push(self.to_chapter(entry));
            }

            // An empty page also terminates, guarding against a total the
            // server never delivers.
            if fetched == 0 || chapters.len() as u32 >= page.total {
                break;
            }
            offset += FEED_PAGE_LIMIT;

            tokio::select! {
                _ = ctx.cancelled() => return Err(Error::Cancelled),
                _ = tokio::time::sleep(FEED_PAGE_DELAY) => {}
            }
        }

        Ok(chapters)
    }

    async fn get_pages(&self, ctx: &CancellationToken, chapter_id: &str) -> Result<Vec<Page>> {
        let url = format!("{}/at-home/server/{}", self.api_base, chapter_id);

        let response = self.execute(ctx, &url).await?;
        let response = ensure_ok(response, || Error::ChapterNotFound(chapter_id.to_string()))?;
        let body: AtHomeResponse = decode(response).await?;

        let base = body.base_url.trim_end_matches('/').to_string();
        let hash = body.chapter.hash;

        Ok(body
            .chapter
            .data
            .into_iter()
            .enumerate()
            .map(|(index, filename)| Page {
                index: index as u32,
                url: format!("{base}/data/{hash}/{filename}"),
                filename,
            })
            .collect())
    }
}

/// Classifies a non-success status: 429 maps to [`Error::RateLimited`], 404
/// to the operation-specific not-found error, anything else non-200 to
/// [`Error::SourceUnavailable`].
fn ensure_ok<F>(response: Response, not_found: F) -> Result<Response>
where
    F: FnOnce() -> Error,
{
    match response.status() {
        StatusCode::OK => Ok(response),
        StatusCode::NOT_FOUND => Err(not_found()),
        StatusCode::TOO_MANY_REQUESTS => Err(Error::rate_limited(retry_after(&response))),
        status => Err(Error::source_unavailable(format!(
            "unexpected status: {status}"
        ))),
    }
}

/// Reads the `Retry-After` header as whole seconds, when present.
fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// Reads the response body and decodes it, classifying a body-read failure
/// as [`Error::SourceUnavailable`] and a decode failure as
/// [`Error::InvalidResponse`].
async fn decode<T>(response: Response) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::source_unavailable(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::invalid_response(e.to_string()))
}

/// Locates the first `cover_art` relationship carrying a `fileName`
/// attribute and composes the CDN thumbnail URL for it.
fn cover_url(manga_id: &str, relationships: &[Relationship]) -> Option<String> {
    relationships
        .iter()
        .filter(|rel| rel.kind == "cover_art")
        .find_map(|rel| {
            rel.attributes
                .as_ref()?
                .get("fileName")?
                .as_str()
                .map(|filename| format!("{COVERS_BASE}/{manga_id}/{filename}.256.jpg"))
        })
}

/// Returns the first relationship of `kind` carrying a non-empty `name`
/// attribute; later duplicates of the same kind are ignored.
fn related_name(relationships: &[Relationship], kind: &str) -> Option<String> {
    relationships
        .iter()
        .filter(|rel| rel.kind == kind)
        .find_map(|rel| {
            rel.attributes
                .as_ref()?
                .get("name")?
                .as_str()
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
}

/// Parses the source's chapter-number string. Empty, absent or non-numeric
/// input defaults to 0, which conflates "chapter 0" with "unparseable";
/// callers needing round-trip fidelity must treat 0 as ambiguous.
fn parse_chapter_number(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn parse_publish_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
