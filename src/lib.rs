//! Minimalist table of contents generation for rendered HTML.
//!
//! Point it at a container of prose and a target container; it collects the
//! headings, gives each one a stable anchor id and writes a nested list of
//! links into the target.
//!
//! ```
//! use minitoc::{init, parse_html};
//!
//! let mut page = parse_html(r#"<div id="toc"></div><main id="content"><h2>Intro</h2></main>"#);
//! init(&mut page, "content", "toc", None);
//!
//! assert!(page.to_html().contains(r##"<a href="#intro">Intro</a>"##));
//! ```

pub mod config;
pub mod dom;
pub mod toc;
pub mod utils;

pub use config::{ListType, TocConfig};
pub use dom::{parse_html, Document, ElementTree, NodeId};
pub use toc::{init, HeadingDescriptor, TableOfContents, TocStats};
pub use utils::slugify;
