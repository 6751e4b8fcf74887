use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::config::defaults;

/// Which list element the table of contents is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListType {
    /// `<ol>`
    #[serde(rename = "ol")]
    Ordered,
    /// `<ul>`
    #[serde(rename = "ul")]
    Unordered,
}

impl ListType {
    /// The HTML tag for this list style
    pub fn tag(self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            ListType::Unordered => "ul",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ListType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ol" => Ok(ListType::Ordered),
            "ul" => Ok(ListType::Unordered),
            other => Err(format!("unknown list type '{}', expected 'ol' or 'ul'", other)),
        }
    }
}

/// Table of contents configuration.
///
/// A value object: build it once from defaults plus caller options (see
/// [`TocConfig::merge`]) and hand it to a
/// [`TableOfContents`](crate::toc::TableOfContents). It is never mutated
/// during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocConfig {
    /// Heading tags to collect; the position of a tag is its nesting level
    pub headings: Vec<String>,

    /// Title printed above the list; empty suppresses the title element
    pub title: String,

    /// Tag wrapping the title
    #[serde(rename = "titleTag")]
    pub title_tag: String,

    /// List style used for the top-level list and every sublist
    #[serde(rename = "listType")]
    pub list_type: ListType,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            headings: defaults::default_headings(),
            title: defaults::default_title(),
            title_tag: defaults::default_title_tag(),
            list_type: defaults::default_list_type(),
        }
    }
}

impl TocConfig {
    /// Nesting level of a heading tag, or `None` if the tag isn't collected
    pub fn level_of(&self, tag: &str) -> Option<usize> {
        self.headings.iter().position(|h| h.eq_ignore_ascii_case(tag))
    }

    /// Whether a title element should precede the list
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TocConfig::default();
        assert_eq!(config.headings, vec!["h2", "h3", "h4", "h5", "h6"]);
        assert_eq!(config.title, "Table of contents");
        assert_eq!(config.title_tag, "h2");
        assert_eq!(config.list_type, ListType::Ordered);
    }

    #[test]
    fn test_level_is_position_in_sequence() {
        let config = TocConfig::default();
        assert_eq!(config.level_of("h2"), Some(0));
        assert_eq!(config.level_of("H4"), Some(2));
        assert_eq!(config.level_of("h1"), None);
    }

    #[test]
    fn test_list_type_parsing() {
        assert_eq!("UL".parse::<ListType>(), Ok(ListType::Unordered));
        assert_eq!(" ol ".parse::<ListType>(), Ok(ListType::Ordered));
        assert!("dl".parse::<ListType>().is_err());
        assert_eq!(ListType::Unordered.to_string(), "ul");
    }
}
