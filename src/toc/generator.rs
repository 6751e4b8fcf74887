use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;
use serde::Serialize;

use crate::config::TocConfig;
use crate::toc::parser::HeadingDescriptor;
use crate::utils::slugify;

/// Counters collected while building the list markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TocStats {
    /// List items emitted
    pub items: usize,
    /// List containers opened, the top-level list included
    pub opened: usize,
    /// List containers closed, the top-level list included
    pub closed: usize,
    /// Deepest nesting reached below the top-level list
    pub max_depth: usize,
}

/// Generate the table of contents markup for a sequence of headings
pub fn generate_toc(headings: &[HeadingDescriptor], config: &TocConfig) -> String {
    generate_toc_with_stats(headings, config).0
}

/// Generate the table of contents markup and report what was emitted.
///
/// Each heading's level is the position of its tag in `config.headings`.
/// Moving deeper opens one sublist per level inside the current item, so
/// skipping levels nests empty sublists. Moving shallower closes one sublist
/// (and the item holding it, if any) per level, but never more than are open:
/// a heading shallower than everything before it becomes a top-level sibling.
pub fn generate_toc_with_stats(headings: &[HeadingDescriptor], config: &TocConfig) -> (String, TocStats) {
    let list = config.list_type.tag();
    let mut stats = TocStats::default();
    let mut html = String::new();

    if config.has_title() {
        html.push_str(&format!(
            "<{tag}>{}</{tag}>",
            encode_text(&config.title),
            tag = config.title_tag
        ));
    }

    html.push_str(&format!("<{}>", list));
    stats.opened += 1;

    // One entry per open sublist: whether it sits directly inside an item
    let mut open: Vec<bool> = Vec::new();
    let mut previous_level: Option<usize> = None;

    for heading in headings {
        let level = match config.level_of(&heading.tag) {
            Some(level) => level,
            None => {
                warn!("Skipping <{}> \"{}\": not a configured heading", heading.tag, heading.text);
                continue;
            }
        };
        let previous = previous_level.unwrap_or(level);

        if previous_level.is_some() {
            if level > previous {
                for step in 0..level - previous {
                    html.push_str(&format!("<{}>", list));
                    open.push(step == 0);
                    stats.opened += 1;
                }
                stats.max_depth = stats.max_depth.max(open.len());
            } else {
                html.push_str("</li>");
                for _ in 0..(previous - level).min(open.len()) {
                    html.push_str(&format!("</{}>", list));
                    stats.closed += 1;
                    if open.pop() == Some(true) {
                        html.push_str("</li>");
                    }
                }
            }
        }

        let id = heading.id.clone().unwrap_or_else(|| slugify(&heading.text));
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            encode_double_quoted_attribute(&id),
            encode_text(&heading.text)
        ));
        stats.items += 1;
        previous_level = Some(level);
    }

    if previous_level.is_some() {
        html.push_str("</li>");
        while let Some(in_item) = open.pop() {
            html.push_str(&format!("</{}>", list));
            stats.closed += 1;
            if in_item {
                html.push_str("</li>");
            }
        }
    }

    html.push_str(&format!("</{}>", list));
    stats.closed += 1;

    (html, stats)
}
