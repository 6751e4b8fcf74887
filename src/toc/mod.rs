//! Table of contents generation for rendered pages.
//!
//! A build runs in four steps against a [`Document`]:
//! 1. resolve the source and target containers by identifier
//! 2. collect the configured heading elements below the source, leaving out
//!    any inside the target (a target nested in the source holds the previous
//!    build's title)
//! 3. give every heading an identifier (see [`assign_identifiers`])
//! 4. generate the nested list markup and replace the target's content
//!
//! A container that cannot be found makes the whole build a no-op: nothing is
//! written and no error is raised.

mod generator;
mod ids;
mod parser;

pub use generator::{generate_toc, generate_toc_with_stats, TocStats};
pub use ids::{assign_identifiers, FALLBACK_ID};
pub use parser::{extract_headings, HeadingDescriptor};

use log::debug;
use serde_json::Value;

use crate::config::TocConfig;
use crate::dom::Document;

/// A configured table of contents builder.
///
/// Instances share no state, so several can work on different documents (or
/// different containers of the same document) side by side.
#[derive(Debug, Clone, Default)]
pub struct TableOfContents {
    config: TocConfig,
}

impl TableOfContents {
    pub fn new(config: TocConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TocConfig {
        &self.config
    }

    /// Collect the headings below `source_id` and assign their identifiers.
    ///
    /// Returns `None` when the source container doesn't exist.
    pub fn headings<D: Document>(&self, doc: &mut D, source_id: &str) -> Option<Vec<HeadingDescriptor>> {
        let source = resolve(doc, "source", source_id)?;
        Some(self.collect(doc, source, None))
    }

    /// Build the markup for the headings below `source_id` without writing it
    /// anywhere. Identifiers are still written back onto the headings.
    pub fn markup<D: Document>(&self, doc: &mut D, source_id: &str) -> Option<String> {
        let headings = self.headings(doc, source_id)?;
        Some(generate_toc(&headings, &self.config))
    }

    /// Build the table of contents for `source_id` and write it into
    /// `target_id`, replacing whatever the target held.
    ///
    /// Both containers are resolved before anything is touched; if either is
    /// missing the document is left unchanged and `None` is returned.
    pub fn print<D: Document>(&self, doc: &mut D, source_id: &str, target_id: &str) -> Option<TocStats> {
        let source = resolve(doc, "source", source_id)?;
        let target = resolve(doc, "target", target_id)?;

        let headings = self.collect(doc, source, Some(target));
        let (markup, stats) = generate_toc_with_stats(&headings, &self.config);
        doc.replace_children_with_markup(target, &markup);

        debug!(
            "Wrote table of contents with {} item(s) from #{} into #{}",
            stats.items, source_id, target_id
        );
        Some(stats)
    }

    fn collect<D: Document>(
        &self,
        doc: &mut D,
        source: D::Handle,
        target: Option<D::Handle>,
    ) -> Vec<HeadingDescriptor> {
        let mut headings = extract_headings(&*doc, source, &self.config);
        if let Some(target) = target {
            headings.retain(|(element, _)| !doc.contains(target, *element));
        }
        assign_identifiers(doc, &mut headings);
        headings.into_iter().map(|(_, heading)| heading).collect()
    }
}

fn resolve<D: Document>(doc: &D, role: &str, id: &str) -> Option<D::Handle> {
    if id.is_empty() {
        debug!("No {} container given, skipping table of contents", role);
        return None;
    }

    let element = doc.element_by_id(id);
    if element.is_none() {
        debug!("No {} container with id '{}', skipping table of contents", role, id);
    }
    element
}

/// Initialize a table of contents in one call.
///
/// `options` is overlaid on the defaults with [`TocConfig::merge`]'s leniency:
/// unknown or mistyped fields are ignored. Returns what was written, or
/// `None` if the build was skipped.
pub fn init<D: Document>(doc: &mut D, source_id: &str, target_id: &str, options: Option<&Value>) -> Option<TocStats> {
    let config = options.map_or_else(TocConfig::default, TocConfig::from_options);
    TableOfContents::new(config).print(doc, source_id, target_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, ElementTree};
    use serde_json::json;

    const PAGE: &str = concat!(
        "<nav id=\"toc\"><p>placeholder</p></nav>",
        "<main id=\"content\">",
        "<h2>Intro</h2><p>...</p>",
        "<h3>Background</h3>",
        "<h2 id=\"how\">Methods</h2>",
        "</main>"
    );

    fn toc_html(tree: &ElementTree) -> String {
        let target = tree.element_by_id("toc").unwrap();
        tree.inner_html(target)
    }

    #[test]
    fn test_init_with_defaults() {
        let mut tree = parse_html(PAGE);
        let stats = init(&mut tree, "content", "toc", None).unwrap();

        assert_eq!(stats.items, 3);
        assert_eq!(
            toc_html(&tree),
            concat!(
                "<h2>Table of contents</h2><ol>",
                "<li><a href=\"#intro\">Intro</a>",
                "<ol><li><a href=\"#background\">Background</a></li></ol></li>",
                "<li><a href=\"#how\">Methods</a></li>",
                "</ol>"
            )
        );
        assert!(tree.to_html().contains("<h2 id=\"intro\">Intro</h2>"));
        assert!(tree.to_html().contains("<h3 id=\"background\">Background</h3>"));
    }

    #[test]
    fn test_init_with_options() {
        let mut tree = parse_html(PAGE);
        let options = json!({ "title": "", "listType": "ul", "headings": ["h2"], "unknown": true });
        init(&mut tree, "content", "toc", Some(&options)).unwrap();

        assert_eq!(
            toc_html(&tree),
            "<ul><li><a href=\"#intro\">Intro</a></li><li><a href=\"#how\">Methods</a></li></ul>"
        );
    }

    #[test]
    fn test_missing_containers_leave_document_untouched() {
        for (source, target) in [("missing", "toc"), ("content", "missing"), ("", "toc"), ("content", "")] {
            let mut tree = parse_html(PAGE);
            assert!(init(&mut tree, source, target, None).is_none());
            assert_eq!(tree.to_html(), PAGE);
            assert_eq!(toc_html(&tree), "<p>placeholder</p>");
        }
    }

    #[test]
    fn test_rebuild_is_stable() {
        let mut tree = parse_html(PAGE);
        let toc = TableOfContents::default();
        toc.print(&mut tree, "content", "toc").unwrap();
        let first_page = tree.to_html();
        let first_ids = toc.headings(&mut tree, "content").unwrap();

        toc.print(&mut tree, "content", "toc").unwrap();
        assert_eq!(tree.to_html(), first_page);
        assert_eq!(toc.headings(&mut tree, "content").unwrap(), first_ids);
    }

    #[test]
    fn test_independent_instances() {
        let mut tree = parse_html(concat!(
            "<div id=\"a\"><h2>One</h2></div><div id=\"a-toc\"></div>",
            "<div id=\"b\"><h2>Two</h2><h3>Three</h3></div><div id=\"b-toc\"></div>"
        ));
        let ordered = TableOfContents::default();
        let unordered = TableOfContents::new(TocConfig::from_options(&json!({ "listType": "ul", "title": "B" })));

        assert_eq!(ordered.print(&mut tree, "a", "a-toc").unwrap().items, 1);
        assert_eq!(unordered.print(&mut tree, "b", "b-toc").unwrap().items, 2);

        let a_toc = tree.inner_html(tree.element_by_id("a-toc").unwrap());
        let b_toc = tree.inner_html(tree.element_by_id("b-toc").unwrap());
        assert!(a_toc.starts_with("<h2>Table of contents</h2><ol>"));
        assert!(b_toc.starts_with("<h2>B</h2><ul>"));
        assert_eq!(ordered.config().list_type, crate::config::ListType::Ordered);
    }

    #[test]
    fn test_markup_without_target() {
        let mut tree = parse_html(PAGE);
        let markup = TableOfContents::default().markup(&mut tree, "content").unwrap();
        assert!(markup.contains("<a href=\"#background\">Background</a>"));
        assert_eq!(toc_html(&tree), "<p>placeholder</p>");
        assert!(TableOfContents::default().markup(&mut tree, "nope").is_none());
    }

    #[test]
    fn test_target_inside_source_is_not_collected() {
        let page = concat!(
            "<main id=\"content\">",
            "<nav id=\"toc\"></nav>",
            "<h2>Intro</h2><h3>Background</h3>",
            "</main>"
        );
        let mut tree = parse_html(page);

        let first = init(&mut tree, "content", "toc", None).unwrap();
        let first_page = tree.to_html();
        let second = init(&mut tree, "content", "toc", None).unwrap();

        assert_eq!(first.items, 2);
        assert_eq!(second, first);
        assert_eq!(tree.to_html(), first_page);
        assert!(!toc_html(&tree).contains("#table-of-contents"));
    }
}
