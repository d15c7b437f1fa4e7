//! Search-index and item-lookup JSON schemas.
//!
//! Only the envelope must decode; malformed hits and comment nodes are
//! dropped individually.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::app::{HacklineError, Result};
use crate::domain::Cursor;
use crate::parser::lenient::best_effort_vec;

/// `yyyy-MM-dd'T'HH:mm:ss.SSSZ` with a numeric offset.
const SEARCH_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(deserialize_with = "best_effort_vec")]
    hits: Vec<SearchHit>,
}

/// One story record from the search index.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "created_at", deserialize_with = "search_date")]
    pub date: DateTime<Utc>,
    pub title: String,
    pub url: Option<String>,
    #[serde(rename = "author")]
    pub by: String,
    #[serde(rename = "points")]
    pub score: i64,
    #[serde(rename = "num_comments")]
    pub descendants: Option<i64>,
    #[serde(rename = "objectID")]
    pub id: Option<String>,
    #[serde(rename = "story_text")]
    pub text: Option<String>,
    #[serde(rename = "created_at_i")]
    pub created_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ItemResponse {
    #[serde(deserialize_with = "best_effort_vec")]
    children: Vec<CommentRecord>,
}

/// One comment node from the item lookup, with its nested replies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    #[serde(rename = "created_at", deserialize_with = "search_date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "author")]
    pub by: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "parent_id")]
    pub parent: Option<i64>,
    pub story_id: Option<i64>,
    #[serde(default, deserialize_with = "best_effort_vec")]
    pub children: Vec<CommentRecord>,
}

pub fn decode_search(body: &[u8]) -> Result<Vec<SearchHit>> {
    serde_json::from_slice::<SearchResponse>(body)
        .map(|response| response.hits)
        .map_err(|e| HacklineError::Decoding(e.to_string()))
}

/// Comment threads nest arbitrarily deep, so the item body is decoded
/// without serde_json's recursion limit, on a stack that grows as needed.
pub fn decode_item(body: &[u8]) -> Result<Vec<CommentRecord>> {
    from_slice_unbounded::<ItemResponse>(body)
        .map(|response| response.children)
        .map_err(|e| HacklineError::Decoding(e.to_string()))
}

fn from_slice_unbounded<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Cursor for the page after `hits`: everything older than the last hit.
///
/// `None` when the page is empty or the last hit carries no timestamp.
pub fn next_cursor(hits: &[SearchHit]) -> Option<Cursor> {
    hits.last()
        .and_then(|hit| hit.created_at)
        .map(Cursor::older_than)
}

pub fn parse_search_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw, SEARCH_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

fn search_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_search_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {}", raw)))
}
