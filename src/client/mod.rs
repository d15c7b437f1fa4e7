//! Fetch operations against the forum and the search index.
//!
//! Story pages and comment lookups are independent and may run concurrently.
//! Text search is single-flight: starting a search cancels the previous one,
//! which then resolves to [`HacklineError::Cancelled`].

use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::app::{HacklineError, Result};
use crate::config::ApiConfig;
use crate::domain::{Comment, Cursor, Page, Source, Story, StoryQueryType};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::normalizer::Normalizer;
use crate::parser::{self, json};
use crate::request::{Endpoint, Hosts};
use crate::thread;

pub struct Client {
    hosts: Hosts,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    search: Mutex<Option<CancellationToken>>,
}

impl Client {
    pub fn new(hosts: Hosts, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            hosts,
            fetcher,
            normalizer: Normalizer::new(),
            search: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let hosts = Hosts::new(&config.forum_url, &config.search_url)?;
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(config)?);
        Ok(Self::new(hosts, fetcher))
    }

    pub fn hosts(&self) -> &Hosts {
        &self.hosts
    }

    /// Fetch one page of `category`, continuing from `cursor` when given.
    pub async fn stories(
        &self,
        category: StoryQueryType,
        cursor: Option<&Cursor>,
    ) -> Result<Page<Story>> {
        let url = Endpoint::Stories { category, cursor }.url(&self.hosts)?;
        let body = self.fetcher.fetch(&url).await?;

        let page = match category.source() {
            Source::Forum => {
                let html = String::from_utf8_lossy(&body);
                let page = parser::parse_story_page(&html)?;
                Page {
                    items: self.normalizer.stories_from_html(page.items),
                    next_cursor: page.next_cursor,
                }
            }
            Source::SearchIndex => {
                let hits = json::decode_search(&body)?;
                let next_cursor = json::next_cursor(&hits);
                Page {
                    items: self.normalizer.stories_from_hits(hits),
                    next_cursor,
                }
            }
        };

        tracing::debug!(
            "{}: {} stories, more: {}",
            category,
            page.items.len(),
            page.next_cursor.is_some()
        );
        Ok(page)
    }

    /// Search stories by free text.
    ///
    /// Any search still in flight on this client is cancelled first. Empty
    /// text only cancels and returns no stories.
    pub async fn search_stories(&self, text: &str) -> Result<Vec<Story>> {
        let token = self.begin_search();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let url = Endpoint::Search(text).url(&self.hosts)?;
        let body = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!("Search {:?} superseded", text);
                return Err(HacklineError::Cancelled);
            }
            result = self.fetcher.fetch(&url) => result?,
        };

        if token.is_cancelled() {
            return Err(HacklineError::Cancelled);
        }

        let hits = json::decode_search(&body)?;
        Ok(self.normalizer.stories_from_hits(hits))
    }

    /// Fetch the full comment tree of a story. Returns root comments.
    pub async fn comments(&self, story_id: i64) -> Result<Vec<Comment>> {
        let url = Endpoint::Item(story_id).url(&self.hosts)?;
        let body = self.fetcher.fetch(&url).await?;
        let records = json::decode_item(&body)?;
        Ok(thread::build(records))
    }

    fn begin_search(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut current = self.search.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        token
    }
}
