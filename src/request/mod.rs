//! Request targets for the three upstream sources.
//!
//! The forum host serves HTML listings; the search host serves both the
//! JSON search index and single-item lookups.

use url::Url;

use crate::app::{HacklineError, Result};
use crate::domain::{Cursor, Source, StoryQueryType};

pub const DEFAULT_FORUM_URL: &str = "https://news.ycombinator.com";
pub const DEFAULT_SEARCH_URL: &str = "http://hn.algolia.com";

/// Base URLs of the upstream hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hosts {
    pub forum: Url,
    pub search: Url,
}

impl Hosts {
    pub fn new(forum: &str, search: &str) -> Result<Self> {
        Ok(Self {
            forum: Self::parse_base(forum)?,
            search: Self::parse_base(search)?,
        })
    }

    /// Bases keep their path prefix: `http://proxy/hn` serves `/hn/news`.
    fn parse_base(raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(HacklineError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                raw
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}

impl Default for Hosts {
    fn default() -> Self {
        Self {
            forum: Url::parse(DEFAULT_FORUM_URL).expect("default forum URL is valid"),
            search: Url::parse(DEFAULT_SEARCH_URL).expect("default search URL is valid"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    /// One page of a category listing.
    Stories {
        category: StoryQueryType,
        cursor: Option<&'a Cursor>,
    },
    /// Free-text story search.
    Search(&'a str),
    /// Full item (with comment tree) by id.
    Item(i64),
}

impl Endpoint<'_> {
    pub fn url(&self, hosts: &Hosts) -> Result<Url> {
        match *self {
            Endpoint::Stories { category, cursor } => stories_url(hosts, category, cursor),
            Endpoint::Search(text) => {
                let mut url = join(&hosts.search, "api/v1/search")?;
                url.set_query(Some(&format!(
                    "query={}&tags=story",
                    urlencoding::encode(text)
                )));
                Ok(url)
            }
            Endpoint::Item(id) => join(&hosts.search, &format!("api/v1/items/{}", id)),
        }
    }
}

/// Resolve `path` under `base` rather than at the host root.
fn join(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path.trim_start_matches('/'))?)
}

fn stories_url(hosts: &Hosts, category: StoryQueryType, cursor: Option<&Cursor>) -> Result<Url> {
    let mut url = match category.source() {
        Source::Forum => join(&hosts.forum, category.path())?,
        Source::SearchIndex => {
            let mut url = join(&hosts.search, category.path())?;
            if let Some(tag) = category.tag() {
                url.query_pairs_mut().append_pair("tags", tag);
            }
            url
        }
    };

    if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
        url.query_pairs_mut().extend_pairs(cursor.pairs());
    }

    Ok(url)
}
