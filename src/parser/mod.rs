pub mod html;
pub mod json;
pub mod lenient;

pub use html::{parse_story_page, HtmlStory};
pub use json::{decode_item, decode_search, CommentRecord, SearchHit};
