use log::debug;
use serde::Serialize;

use crate::config::TocConfig;
use crate::dom::Document;

/// One heading found in the source container, in document order.
///
/// Derived fresh from the document on every build; `id` is the identifier
/// the element carries (after assignment, always `Some`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingDescriptor {
    /// Lowercase tag name; its position in the configured sequence is the level
    pub tag: String,
    /// Rendered display text
    pub text: String,
    /// Identifier the heading is linked by
    pub id: Option<String>,
}

impl HeadingDescriptor {
    pub fn new(tag: impl Into<String>, text: impl Into<String>, id: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            id,
        }
    }
}

/// Collect the configured heading elements below `source`.
///
/// Only tags listed in `config.headings` are considered. Empty `id`
/// attributes count as absent.
pub fn extract_headings<D: Document>(
    doc: &D,
    source: D::Handle,
    config: &TocConfig,
) -> Vec<(D::Handle, HeadingDescriptor)> {
    let headings: Vec<_> = doc
        .descendants_by_tag(source, &config.headings)
        .into_iter()
        .filter_map(|element| {
            let tag = doc.tag_name(element)?;
            let id = doc.id(element).filter(|id| !id.is_empty());
            Some((element, HeadingDescriptor::new(tag, doc.text_content(element), id)))
        })
        .collect();

    debug!("Found {} heading(s) matching {:?}", headings.len(), config.headings);
    headings
}
