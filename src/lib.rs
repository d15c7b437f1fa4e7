//! # Hackline
//!
//! A Hacker News client core: paged story listings, text search, and
//! comment threads.
//!
//! ## Architecture
//!
//! Hackline follows the same pipeline for every fetch:
//!
//! ```text
//! Request → Fetcher → Parser (HTML | JSON) → Normalizer → Story / Comment
//! ```
//!
//! - [`request`]: Builds request URLs for the forum and the search index
//! - [`fetcher`]: One HTTP GET per call, no retries
//! - [`parser`]: Scrapes HTML listings and decodes JSON responses
//! - [`normalizer`]: Converts both record shapes into [`Story`](domain::Story)
//! - [`thread`]: Builds comment trees
//! - [`store`]: Remembers pagination cursors per category
//!
//! ## Quick Start
//!
//! ```bash
//! # Two pages of the front page
//! hackline stories top --pages 2
//!
//! # Search
//! hackline search "rust async"
//!
//! # Comment thread of a story
//! hackline comments 8863
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the config,
/// the client, and the story store.
pub mod app;

/// Single-flight search, story pages, and comment lookups.
pub mod client;

/// Command-line interface using clap.
///
/// - `stories <category> [--pages N]` - List stories
/// - `search <text>` - Search stories
/// - `comments <id>` - Show a comment thread
pub mod cli;

/// Configuration loaded from `~/.config/hackline/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Story`](domain::Story): A story from either source
/// - [`Comment`](domain::Comment): A comment with its replies
/// - [`StoryQueryType`](domain::StoryQueryType): Story categories
/// - [`Cursor`](domain::Cursor): Opaque pagination token
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Record normalization into [`Story`](domain::Story).
pub mod normalizer;

/// HTML listing scraper and JSON response decoders.
pub mod parser;

/// Request URL construction.
pub mod request;

/// Pagination state per category.
///
/// - [`CursorStore`](store::CursorStore): Cursor bookkeeping
/// - [`StoryStore`](store::StoryStore): Paged fetching on top of a client
pub mod store;

/// Comment tree construction.
pub mod thread;
