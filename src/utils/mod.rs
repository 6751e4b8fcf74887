pub mod error;
pub mod fs;
pub mod path;
pub mod slug;

pub use error::{BoxResult, TocError};
pub use slug::slugify;
