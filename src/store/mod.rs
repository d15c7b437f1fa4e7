//! Per-category pagination state.
//!
//! [`CursorStore`] remembers, for each category, the cursor for the next page
//! and whether one exists. [`StoryStore`] couples it with a [`Client`] so that
//! callers only say "next page" or "start over".
//!
//! Pages of one category must be requested one after another; two concurrent
//! "next page" calls for the same category are not guarded against.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::app::Result;
use crate::client::Client;
use crate::domain::{Cursor, Story, StoryQueryType};

/// Pagination state of a category that has been fetched at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub cursor: Cursor,
    pub exists: bool,
}

/// What the next fetch of a category should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Issue a request, continuing from the cursor if there is one.
    Fetch(Option<Cursor>),
    /// No further pages; do not touch the network.
    Exhausted,
}

#[derive(Debug, Default)]
pub struct CursorStore {
    states: HashMap<StoryQueryType, PageState>,
}

impl CursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, category: StoryQueryType, refresh: bool) -> Resolution {
        if refresh {
            return Resolution::Fetch(None);
        }
        match self.states.get(&category) {
            None => Resolution::Fetch(None),
            Some(state) if !state.exists => Resolution::Exhausted,
            Some(state) => Resolution::Fetch(Some(state.cursor.clone())),
        }
    }

    /// Replace the state of `category` after a successful fetch.
    pub fn record(&mut self, category: StoryQueryType, next: Option<Cursor>) {
        let state = match next {
            Some(cursor) => PageState {
                cursor,
                exists: true,
            },
            None => PageState {
                cursor: Cursor::default(),
                exists: false,
            },
        };
        self.states.insert(category, state);
    }

    pub fn state(&self, category: StoryQueryType) -> Option<&PageState> {
        self.states.get(&category)
    }

    /// False only once a fetch has reported the last page.
    pub fn has_more(&self, category: StoryQueryType) -> bool {
        self.states.get(&category).map_or(true, |s| s.exists)
    }
}

/// Paged story fetching with remembered cursors.
pub struct StoryStore {
    client: Arc<Client>,
    cursors: Mutex<CursorStore>,
}

impl StoryStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            cursors: Mutex::new(CursorStore::new()),
        }
    }

    /// Fetch the next page of `category`, or its first page when `refresh`.
    ///
    /// Once the last page has been seen, non-refresh calls return no stories
    /// without a request. A failed fetch leaves the stored cursor unchanged.
    pub async fn stories(&self, category: StoryQueryType, refresh: bool) -> Result<Vec<Story>> {
        let resolution = self.cursors().resolve(category, refresh);
        let cursor = match resolution {
            Resolution::Exhausted => {
                tracing::debug!("{}: no more pages", category);
                return Ok(Vec::new());
            }
            Resolution::Fetch(cursor) => cursor,
        };

        let page = self.client.stories(category, cursor.as_ref()).await?;
        if page.next_cursor.is_none() {
            tracing::info!("{}: reached the last page", category);
        }

        self.cursors().record(category, page.next_cursor);
        Ok(page.items)
    }

    pub fn has_more(&self, category: StoryQueryType) -> bool {
        self.cursors().has_more(category)
    }

    pub fn state(&self, category: StoryQueryType) -> Option<PageState> {
        self.cursors().state(category).cloned()
    }

    fn cursors(&self) -> MutexGuard<'_, CursorStore> {
        self.cursors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HacklineError;
    use crate::fetcher::Fetcher;
    use crate::request::Hosts;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use url::Url;

    /// Serves canned bodies in order and records every requested URL.
    /// `None` in the queue answers with a transport error.
    struct StubFetcher {
        responses: Mutex<VecDeque<Option<String>>>,
        requests: Mutex<Vec<Url>>,
    }

    impl StubFetcher {
        fn new(responses: Vec<Option<String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(url.clone());
            match self.responses.lock().unwrap().pop_front() {
                Some(Some(body)) => Ok(body.into_bytes()),
                _ => Err(HacklineError::Domain("connection reset".into())),
            }
        }
    }

    fn listing(id: i64, more: Option<&str>) -> Option<String> {
        let more = more
            .map(|href| format!(r#"<tr><td><a class="morelink" href="{}">More</a></td></tr>"#, href))
            .unwrap_or_default();
        Some(format!(
            r#"<table class="itemlist">
              <tr class="athing" id="{id}"><td class="title"><span class="titleline"><a href="https://s{id}.dev">Story {id}</a></span></td></tr>
              <tr><td class="subtext"><span class="score">1 point</span> by <a class="hnuser">u{id}</a></td></tr>
              {more}
            </table>"#
        ))
    }

    fn store_with(fetcher: Arc<StubFetcher>) -> StoryStore {
        StoryStore::new(Arc::new(Client::new(Hosts::default(), fetcher)))
    }

    #[test]
    fn test_resolve_state_machine() {
        let mut cursors = CursorStore::new();
        let next = Cursor::new(vec![("p".into(), "2".into())]);

        assert_eq!(cursors.resolve(StoryQueryType::Top, false), Resolution::Fetch(None));
        assert!(cursors.has_more(StoryQueryType::Top));

        cursors.record(StoryQueryType::Top, Some(next.clone()));
        assert_eq!(
            cursors.resolve(StoryQueryType::Top, false),
            Resolution::Fetch(Some(next))
        );

        cursors.record(StoryQueryType::Top, None);
        assert_eq!(cursors.resolve(StoryQueryType::Top, false), Resolution::Exhausted);
        assert!(!cursors.has_more(StoryQueryType::Top));
        assert_eq!(
            cursors.state(StoryQueryType::Top),
            Some(&PageState {
                cursor: Cursor::default(),
                exists: false
            })
        );
    }

    #[test]
    fn test_refresh_always_fetches_from_start() {
        let mut cursors = CursorStore::new();
        for category in StoryQueryType::ALL {
            cursors.record(category, None);
            assert_eq!(cursors.resolve(category, true), Resolution::Fetch(None));

            cursors.record(category, Some(Cursor::older_than(1)));
            assert_eq!(cursors.resolve(category, true), Resolution::Fetch(None));
        }
    }

    #[tokio::test]
    async fn test_pages_follow_cursor_until_exhausted() {
        let fetcher = StubFetcher::new(vec![listing(1, Some("news?p=2")), listing(2, None)]);
        let store = store_with(fetcher.clone());

        let first = store.stories(StoryQueryType::Top, true).await.unwrap();
        let second = store.stories(StoryQueryType::Top, false).await.unwrap();
        let third = store.stories(StoryQueryType::Top, false).await.unwrap();

        assert_eq!(first[0].id, 1);
        assert_eq!(second[0].id, 2);
        assert!(third.is_empty());
        assert!(!store.has_more(StoryQueryType::Top));

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query(), None);
        assert_eq!(requests[1].query(), Some("p=2"));
    }

    #[tokio::test]
    async fn test_refresh_after_exhaustion_uses_empty_cursor() {
        let fetcher = StubFetcher::new(vec![listing(1, None), listing(3, Some("news?p=2"))]);
        let store = store_with(fetcher.clone());

        store.stories(StoryQueryType::Show, false).await.unwrap();
        assert!(!store.has_more(StoryQueryType::Show));

        let again = store.stories(StoryQueryType::Show, true).await.unwrap();
        assert_eq!(again[0].id, 3);
        assert!(store.has_more(StoryQueryType::Show));

        let requests = fetcher.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].path(), "/show");
        assert_eq!(requests[1].query(), None);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_cursor() {
        let fetcher = StubFetcher::new(vec![listing(1, Some("news?p=2")), None, listing(2, None)]);
        let store = store_with(fetcher.clone());

        store.stories(StoryQueryType::Top, true).await.unwrap();
        let err = store.stories(StoryQueryType::Top, false).await.unwrap_err();
        assert!(err.is_retryable());

        store.stories(StoryQueryType::Top, false).await.unwrap();
        let requests = fetcher.requests();
        assert_eq!(requests[1].query(), Some("p=2"));
        assert_eq!(requests[2].query(), Some("p=2"));
    }

    #[tokio::test]
    async fn test_categories_are_independent() {
        let fetcher = StubFetcher::new(vec![listing(1, None), listing(2, None)]);
        let store = store_with(fetcher.clone());

        store.stories(StoryQueryType::Top, false).await.unwrap();
        let ask = store.stories(StoryQueryType::Ask, false).await.unwrap();

        assert_eq!(ask[0].id, 2);
        assert!(!store.has_more(StoryQueryType::Top));
        assert!(!store.has_more(StoryQueryType::Ask));
        assert!(store.has_more(StoryQueryType::Best));
        assert_eq!(store.state(StoryQueryType::Best), None);
        assert_eq!(fetcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_search_index_page_exhausts_category() {
        let fetcher = StubFetcher::new(vec![Some(r#"{"hits": []}"#.into())]);
        let store = store_with(fetcher.clone());

        let stories = store.stories(StoryQueryType::Job, false).await.unwrap();
        assert!(stories.is_empty());
        assert!(!store.has_more(StoryQueryType::Job));

        store.stories(StoryQueryType::Job, false).await.unwrap();
        assert_eq!(fetcher.requests().len(), 1);
    }
}
