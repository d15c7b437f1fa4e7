use serde::{Deserialize, Serialize};

/// Opaque "how to fetch the next page" token: ordered query parameters.
///
/// Values are never interpreted; they are replayed onto the next request
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor(Vec<(String, String)>);

impl Cursor {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// Search-index cursor: only items created strictly before `unix_secs`.
    pub fn older_than(unix_secs: i64) -> Self {
        Self(vec![(
            "numericFilters".to_string(),
            format!("created_at_i<{}", unix_secs),
        )])
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Cursor {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One page of results plus the cursor for the page after it.
///
/// `next_cursor == None` means there are no further pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }
}
