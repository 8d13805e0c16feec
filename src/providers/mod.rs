//! Concrete provider implementations with conditional compilation support.
//!
//! Each provider lives behind its own feature flag so downstream crates can
//! build with only the sources they need:
//!
//! - `source-mangadex` - Enables the MangaDex provider
//! - `all-sources` - Enables all providers (default)
//!
//! Build with only MangaDex support:
//! ```bash
//! cargo build --no-default-features --features source-mangadex
//! ```

#[cfg(feature = "source-mangadex")]
pub mod mangadex;

#[cfg(feature = "source-mangadex")]
pub use mangadex::MangaDex;
