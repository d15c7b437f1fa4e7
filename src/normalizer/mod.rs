use html_escape::decode_html_entities;

use crate::domain::Story;
use crate::parser::{HtmlStory, SearchHit};

/// Converts scraped and decoded records into canonical [`Story`] values.
///
/// Both sources converge here; only documented defaults are filled in
/// (`0` for a missing id or comment count).
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn story_from_html(&self, record: HtmlStory) -> Story {
        Story {
            by: record.by,
            descendants: record.descendants.unwrap_or(0),
            id: record.id.unwrap_or(0),
            score: record.score,
            date: record.date,
            title: record.title.unwrap_or_default(),
            url: record.url.and_then(external_url),
            text: None,
            comment_ids: None,
            age: record.age,
            created_at: None,
        }
    }

    pub fn story_from_hit(&self, hit: SearchHit) -> Story {
        let id = hit
            .id
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);

        if id == 0 {
            tracing::debug!("Search hit without usable id: {:?}", hit.id);
        }

        Story {
            by: Some(hit.by),
            descendants: hit.descendants.unwrap_or(0),
            id,
            score: Some(hit.score),
            date: hit.date,
            title: decode_html_entities(&hit.title).to_string(),
            url: hit.url.and_then(external_url),
            text: hit.text.filter(|t| !t.is_empty()),
            comment_ids: None,
            age: None,
            created_at: hit.created_at,
        }
    }

    pub fn stories_from_html(&self, records: Vec<HtmlStory>) -> Vec<Story> {
        records
            .into_iter()
            .map(|r| self.story_from_html(r))
            .collect()
    }

    pub fn stories_from_hits(&self, hits: Vec<SearchHit>) -> Vec<Story> {
        hits.into_iter().map(|h| self.story_from_hit(h)).collect()
    }
}

/// Forum-relative links (`item?id=…`) and empty strings are self posts.
fn external_url(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with("item?") {
        return None;
    }
    Some(raw)
}
