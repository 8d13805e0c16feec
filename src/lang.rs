//! Locale-fallback resolution for multi-language metadata.
//!
//! Sources like MangaDex ship titles, descriptions and tag names as a
//! mapping from locale code to text. These helpers pick one display string
//! from such a mapping using a priority-ordered, best-effort heuristic.

use std::collections::HashMap;

/// Romanized-Japanese fallback used for titles only.
const ROMAJI: &str = "ja-ro";

/// Placeholder returned when a title mapping has no usable entry at all.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Resolves a display title from a locale-to-text mapping.
///
/// Priority order: the preferred locale, then `"en"`, then the
/// romanized-Japanese `"ja-ro"` fallback, then the first non-empty value
/// under the map's iteration order, then [`UNKNOWN_TITLE`]. The fourth rule
/// is order-dependent on `HashMap` iteration and deliberately unspecified —
/// call sites must never depend on a specific tied locale winning.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use tana::lang::resolve_title;
///
/// let mut titles = HashMap::new();
/// titles.insert("en".to_string(), "Foo".to_string());
/// titles.insert("ja".to_string(), "Bar".to_string());
///
/// assert_eq!(resolve_title(&titles, "ja"), "Bar");
/// assert_eq!(resolve_title(&titles, "de"), "Foo");
/// assert_eq!(resolve_title(&HashMap::new(), "en"), "Unknown Title");
/// ```
pub fn resolve_title(titles: &HashMap<String, String>, preferred: &str) -> String {
    for locale in [preferred, "en", ROMAJI] {
        if let Some(title) = titles.get(locale) {
            if !title.trim().is_empty() {
                return title.trim().to_string();
            }
        }
    }

    titles
        .values()
        .find(|title| !title.trim().is_empty())
        .map(|title| title.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// Resolves a description-like text from a locale-to-text mapping.
///
/// Same ordering as [`resolve_title`] but without the romanized-Japanese
/// fallback, and `None` instead of a placeholder when nothing usable exists.
pub fn resolve_text(texts: &HashMap<String, String>, preferred: &str) -> Option<String> {
    for locale in [preferred, "en"] {
        if let Some(text) = texts.get(locale) {
            if !text.trim().is_empty() {
                return Some(text.trim().to_string());
            }
        }
    }

    texts
        .values()
        .find(|text| !text.trim().is_empty())
        .map(|text| text.trim().to_string())
}
