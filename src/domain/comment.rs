use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::age::time_ago;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// `None` for deleted or removed comments.
    pub by: Option<String>,
    pub deleted: bool,
    pub id: i64,
    /// Parent item id, `0` when unknown.
    pub parent: i64,
    pub text: Option<String>,
    pub date: DateTime<Utc>,
    /// Nesting depth; root comments are tier 0.
    pub tier: usize,
    pub children: Vec<Comment>,
}

impl Comment {
    /// Pre-order traversal: this comment, then each child's subtree in order.
    ///
    /// Deleted comments are included. Callers rendering a thread are expected
    /// to skip entries without an author themselves.
    pub fn flatten(&self) -> Vec<&Comment> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Comment>) {
        out.push(self);
        for child in &self.children {
            child.collect_into(out);
        }
    }

    /// "`author` · `age`", skipping the author for deleted comments.
    pub fn info(&self) -> String {
        self.info_at(Utc::now())
    }

    pub fn info_at(&self, now: DateTime<Utc>) -> String {
        [self.by.clone(), Some(time_ago(self.date, now))]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn comment(id: i64, by: Option<&str>, tier: usize, children: Vec<Comment>) -> Comment {
        Comment {
            by: by.map(String::from),
            deleted: by.is_none(),
            id,
            parent: 0,
            text: None,
            date: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            tier,
            children,
        }
    }

    fn sample() -> Comment {
        comment(
            1,
            Some("a"),
            0,
            vec![
                comment(2, Some("b"), 1, vec![comment(3, Some("c"), 2, vec![])]),
                comment(4, None, 1, vec![comment(5, Some("e"), 2, vec![])]),
            ],
        )
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let ids: Vec<i64> = sample().flatten().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_flatten_is_repeatable() {
        let root = sample();
        let first: Vec<i64> = root.flatten().iter().map(|c| c.id).collect();
        let second: Vec<i64> = root.flatten().iter().map(|c| c.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_flatten_keeps_deleted_subtree() {
        let root = sample();
        let flat = root.flatten();
        let deleted = flat.iter().find(|c| c.id == 4).unwrap();
        assert!(deleted.deleted);
        assert!(flat.iter().any(|c| c.id == 5));
    }

    #[test]
    fn test_info_skips_missing_author() {
        let c = comment(9, None, 0, vec![]);
        let now = c.date + Duration::hours(3);
        assert_eq!(c.info_at(now), "3 hours ago");

        let c = comment(9, Some("dang"), 0, vec![]);
        assert_eq!(c.info_at(now), "dang · 3 hours ago");
    }
}
