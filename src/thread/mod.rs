//! Comment tree construction.
//!
//! Each decoded record owns its replies by value, so the tree is built in a
//! single top-down pass with the depth passed along. No node is shared and
//! no child points back at its parent beyond the stored `parent` id.

use crate::domain::Comment;
use crate::parser::CommentRecord;

/// Build the root comments of a thread; replies hang off `children`.
///
/// The result is unfiltered: deleted comments (no author) are kept, along
/// with any replies beneath them.
pub fn build(records: Vec<CommentRecord>) -> Vec<Comment> {
    build_tier(records, 0)
}

fn build_tier(records: Vec<CommentRecord>, tier: usize) -> Vec<Comment> {
    records
        .into_iter()
        .map(|record| build_node(record, tier))
        .collect()
}

fn build_node(record: CommentRecord, tier: usize) -> Comment {
    Comment {
        deleted: record.by.is_none(),
        by: record.by,
        id: record.id,
        parent: record.parent.unwrap_or(0),
        text: record.text,
        date: record.date,
        tier,
        children: build_tier(record.children, tier + 1),
    }
}
