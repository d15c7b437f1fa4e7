pub mod age;
pub mod category;
pub mod comment;
pub mod cursor;
pub mod story;

pub use age::time_ago;
pub use category::{Source, StoryQueryType};
pub use comment::Comment;
pub use cursor::{Cursor, Page};
pub use story::{Story, StoryType};
