use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::age::time_ago;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    Ask,
    Show,
    Normal,
}

impl StoryType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ask => "ask",
            Self::Show => "show",
            Self::Normal => "normal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub by: Option<String>,
    /// Comment count.
    pub descendants: i64,
    /// Zero when upstream supplied no usable id.
    pub id: i64,
    pub score: Option<i64>,
    pub date: DateTime<Utc>,
    pub title: String,
    /// External link; `None` for self posts.
    pub url: Option<String>,
    pub text: Option<String>,
    /// Child comment ids, when the source lists them.
    pub comment_ids: Option<Vec<i64>>,
    /// Age label as rendered by the forum, e.g. "3 hours ago".
    pub age: Option<String>,
    /// Raw unix seconds from the search index.
    pub created_at: Option<i64>,
}

impl Story {
    pub fn story_type(&self) -> StoryType {
        if self.title.starts_with("Show HN:") {
            StoryType::Show
        } else if self.title.starts_with("Ask HN:") || self.url.is_none() {
            StoryType::Ask
        } else {
            StoryType::Normal
        }
    }

    /// "`score` points · `author` · `age`", skipping whatever is absent.
    pub fn info(&self) -> String {
        self.info_at(Utc::now())
    }

    pub fn info_at(&self, now: DateTime<Utc>) -> String {
        let age = self
            .age
            .clone()
            .unwrap_or_else(|| time_ago(self.date, now));

        [
            self.score.map(|score| format!("{} points", score)),
            self.by.clone(),
            Some(age),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ")
    }

    /// Whether this story was mapped without a usable id.
    pub fn is_degraded(&self) -> bool {
        self.id == 0
    }
}
