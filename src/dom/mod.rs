//! Element tree collaborator.
//!
//! The table of contents never touches HTML text directly; it talks to a
//! [`Document`]. [`ElementTree`] is the in-memory implementation shipped with
//! the crate, and [`parse_html`] builds one from rendered markup.

mod parser;
mod tree;
mod types;

pub use parser::parse_html;
pub use tree::{ElementTree, NodeKind};
pub use types::{Document, NodeId};

/// Elements that never have content or an end tag
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose content is raw text rather than markup
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Check whether a tag name is a void element
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Check whether a tag name holds raw text
pub fn is_raw_text_element(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}
