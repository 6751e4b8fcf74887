use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::dom::tree::{ElementTree, NodeKind};
use crate::dom::types::NodeId;
use crate::dom::{is_raw_text_element, is_void_element};

lazy_static! {
    static ref TOKEN_REGEX: Regex = Regex::new(concat!(
        r"(?s)",
        r"(?P<comment><!--.*?-->)",
        r#"|(?P<decl><[!?][^>]*>)"#,
        r"|</(?P<end>[A-Za-z][A-Za-z0-9:-]*)\s*>",
        r#"|<(?P<start>[A-Za-z][A-Za-z0-9:-]*)(?P<attrs>(?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?)*)\s*(?P<close>/?)>"#,
    ))
    .unwrap();

    static ref ATTR_REGEX: Regex = Regex::new(
        r#"(?P<name>[^\s"'>/=]+)(?:\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'=<>`]+)))?"#
    )
    .unwrap();
}

/// Start tags that implicitly close an open `<p>`
const CLOSES_PARAGRAPH: [&str; 33] = [
    "address", "article", "aside", "blockquote", "dd", "details", "dialog", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "li", "main", "menu", "nav", "ol", "p", "pre", "section", "ul",
];

/// Elements an implied close never reaches past
const SCOPE_BOUNDARIES: [&str; 10] = [
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

/// Parse rendered HTML into an [`ElementTree`].
///
/// The tokenizer is lenient: stray end tags are dropped, elements left open
/// at the end of input are closed implicitly, and anything that does not look
/// like a tag is kept as text. Optional end tags (`p`, `li`, `dt`/`dd`,
/// `option`, table rows and cells) are implied the way browsers imply them,
/// and an element whose end tag was implied serializes without one.
pub fn parse_html(html: &str) -> ElementTree {
    let mut tree = ElementTree::new();
    let root = tree.root();
    append_markup(&mut tree, root, html);
    tree
}

/// Parse a markup fragment and append the resulting nodes under `parent`.
pub(crate) fn append_markup(tree: &mut ElementTree, parent: NodeId, markup: &str) {
    // ASCII lowercasing keeps byte offsets aligned with `markup`
    let lowered = markup.to_ascii_lowercase();
    let mut open: Vec<(NodeId, String)> = Vec::new();
    let mut pos = 0;

    while let Some(caps) = TOKEN_REGEX.captures_at(markup, pos) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => break,
        };
        let current = open.last().map_or(parent, |(node, _)| *node);

        if whole.start() > pos {
            tree.append_node(current, NodeKind::Text(markup[pos..whole.start()].to_string()));
        }
        pos = whole.end();

        if let Some(comment) = caps.name("comment") {
            let text = comment.as_str();
            let body = &text[4..text.len() - 3];
            tree.append_node(current, NodeKind::Comment(body.to_string()));
        } else if let Some(decl) = caps.name("decl") {
            tree.append_node(current, NodeKind::Declaration(decl.as_str().to_string()));
        } else if let Some(end) = caps.name("end") {
            let name = end.as_str().to_ascii_lowercase();
            match open.iter().rposition(|(_, open_name)| *open_name == name) {
                Some(index) => {
                    tree.mark_end_tag(open[index].0);
                    open.truncate(index);
                }
                None => trace!("Ignoring stray end tag </{}>", name),
            }
        } else if let Some(start) = caps.name("start") {
            let name = start.as_str().to_ascii_lowercase();
            let self_closing = caps.name("close").map_or(false, |c| !c.as_str().is_empty());
            let attributes = caps
                .name("attrs")
                .map(|attrs| parse_attributes(attrs.as_str()))
                .unwrap_or_default();

            close_implied(&mut open, &name);
            let current = open.last().map_or(parent, |(node, _)| *node);

            let element = tree.append_node(
                current,
                NodeKind::Element {
                    name: name.clone(),
                    attributes,
                    self_closing,
                    end_tag: false,
                },
            );

            if is_raw_text_element(&name) && !self_closing {
                let closing = format!("</{}", name);
                let body_end = match lowered[pos..].find(&closing) {
                    Some(offset) => {
                        tree.mark_end_tag(element);
                        pos + offset
                    }
                    None => markup.len(),
                };
                if body_end > pos {
                    tree.append_node(element, NodeKind::Text(markup[pos..body_end].to_string()));
                }
                pos = match markup[body_end..].find('>') {
                    Some(offset) => body_end + offset + 1,
                    None => markup.len(),
                };
            } else if !self_closing && !is_void_element(&name) {
                open.push((element, name));
            }
        }
    }

    if pos < markup.len() {
        let current = open.last().map_or(parent, |(node, _)| *node);
        tree.append_node(current, NodeKind::Text(markup[pos..].to_string()));
    }
}

/// Pop the elements a start tag `name` closes without an end tag
fn close_implied(open: &mut Vec<(NodeId, String)>, name: &str) {
    match name {
        "li" => close_in_scope(open, &["li"], &["ol", "ul"], true),
        "dt" | "dd" => close_in_scope(open, &["dt", "dd"], &["dl"], true),
        "option" | "optgroup" => close_in_scope(open, &["option"], &["select", "datalist", "optgroup"], true),
        "tr" => close_in_scope(open, &["tr"], &["table", "tbody", "thead", "tfoot"], false),
        "td" | "th" => close_in_scope(open, &["td", "th"], &["table", "tr"], false),
        "tbody" | "thead" | "tfoot" => close_in_scope(open, &["tbody", "thead", "tfoot"], &["table"], false),
        _ => {}
    }

    if CLOSES_PARAGRAPH.contains(&name) {
        close_in_scope(open, &["p"], &[], true);
    }
}

/// Close the innermost open element named in `targets`, unless a `stops`
/// element (or, when `bounded`, a scope boundary) comes first
fn close_in_scope(open: &mut Vec<(NodeId, String)>, targets: &[&str], stops: &[&str], bounded: bool) {
    for index in (0..open.len()).rev() {
        let name = open[index].1.as_str();
        if targets.contains(&name) {
            open.truncate(index);
            return;
        }
        if stops.contains(&name) || (bounded && SCOPE_BOUNDARIES.contains(&name)) {
            return;
        }
    }
}

fn parse_attributes(raw: &str) -> Vec<(String, Option<String>)> {
    ATTR_REGEX
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.name("name")?.as_str().to_ascii_lowercase();
            let value = caps
                .name("dq")
                .or_else(|| caps.name("sq"))
                .or_else(|| caps.name("bare"))
                .map(|v| decode_html_entities(v.as_str()).into_owned());
            Some((name, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_round_trips_simple_document() {
        let html = r#"<!DOCTYPE html><html><body><div id="content"><h2 class="title">Intro</h2><p>Text<br>more</p></div></body></html>"#;
        assert_eq!(parse_html(html).to_html(), html);
    }

    #[test]
    fn test_attribute_forms() {
        let tree = parse_html(r#"<input type=checkbox checked data-x='a "b"'><h2 ID="Up">x</h2>"#);
        let input = tree.descendants(tree.root())[0];
        assert_eq!(tree.attribute(input, "type"), Some("checkbox"));
        assert_eq!(tree.attribute(input, "checked"), Some(""));
        assert_eq!(tree.attribute(input, "data-x"), Some(r#"a "b""#));
        assert!(tree.element_by_id("Up").is_some());
    }

    #[test]
    fn test_nested_heading_text() {
        let tree = parse_html("<div id=c><h2>Using <code>cargo</code> &amp; <em>friends</em>\n  today</h2></div>");
        let container = tree.element_by_id("c").unwrap();
        let headings = tree.descendants_by_tag(container, &["h2".to_string()]);
        assert_eq!(tree.text_content(headings[0]), "Using cargo & friends today");
    }

    #[test]
    fn test_script_body_is_not_markup() {
        let html = "<div id=c><script>if (a < b) { x = '<h2>no</h2>'; }</script><h2>yes</h2></div>";
        let tree = parse_html(html);
        let container = tree.element_by_id("c").unwrap();
        let headings = tree.descendants_by_tag(container, &["h2".to_string()]);
        assert_eq!(headings.len(), 1);
        assert_eq!(tree.text_content(headings[0]), "yes");
        assert_eq!(tree.to_html(), html.replace("id=c", "id=\"c\""));
    }

    #[test]
    fn test_lenient_structure() {
        let tree = parse_html("<div id=a><p>one</span> two<div id=b>open");
        let b = tree.element_by_id("b").unwrap();
        let a = tree.element_by_id("a").unwrap();
        assert_eq!(tree.text_content(b), "open");
        assert_eq!(tree.text_content(a), "one twoopen");
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.to_html(), r#"<div id="a"><p>one two<div id="b">open"#);
    }

    #[test]
    fn test_omitted_paragraph_and_item_end_tags() {
        let html = r#"<main id="content"><p>para<h2>Intro</h2><p>x<ul><li>a<li>b</ul></main>"#;
        let tree = parse_html(html);
        let main = tree.element_by_id("content").unwrap();

        let h2 = tree.descendants_by_tag(main, &["h2".to_string()])[0];
        assert_eq!(tree.parent(h2), Some(main));

        let ul = tree.descendants_by_tag(main, &["ul".to_string()])[0];
        assert_eq!(tree.parent(ul), Some(main));
        let items = tree.descendants_by_tag(main, &["li".to_string()]);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|&li| tree.parent(li) == Some(ul)));

        assert_eq!(tree.to_html(), html);
    }

    #[test]
    fn test_omitted_definition_and_table_end_tags() {
        let html = "<dl><dt>a<dd>b<dt>c</dl><table><tr><td>1<td>2<tr><th>3</table><select><option>x<option>y</select>";
        let tree = parse_html(html);
        let root = tree.root();

        let dl = tree.descendants_by_tag(root, &["dl".to_string()])[0];
        assert_eq!(tree.children(dl).len(), 3);

        let table = tree.descendants_by_tag(root, &["table".to_string()])[0];
        let rows = tree.descendants_by_tag(table, &["tr".to_string()]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|&tr| tree.parent(tr) == Some(table)));
        assert_eq!(tree.children(rows[0]).len(), 2);

        let select = tree.descendants_by_tag(root, &["select".to_string()])[0];
        assert_eq!(tree.children(select).len(), 2);

        assert_eq!(tree.to_html(), html);
    }

    #[test]
    fn test_nested_lists_keep_outer_item_open() {
        let tree = parse_html("<ul><li>a<ul><li>b<li>c</ul><li>d</ul>");
        let root = tree.root();
        let items = tree.descendants_by_tag(root, &["li".to_string()]);
        assert_eq!(items.len(), 4);
        assert_eq!(tree.text_content(items[0]), "abc");
        assert_eq!(tree.parent(items[3]), tree.parent(items[0]));
    }

    #[test]
    fn test_comments_and_stray_angle_brackets() {
        let html = "<!DOCTYPE html><p>1 < 2 <!-- <h2>hidden</h2> --></p>";
        let tree = parse_html(html);
        assert_eq!(tree.to_html(), html);

        let kinds: Vec<_> = tree.descendants(tree.root()).into_iter().map(|n| tree.kind(n).clone()).collect();
        assert_eq!(kinds[0], NodeKind::Declaration("<!DOCTYPE html>".to_string()));
        assert!(kinds.contains(&NodeKind::Comment(" <h2>hidden</h2> ".to_string())));
        assert!(tree.descendants_by_tag(tree.root(), &["h2".to_string()]).is_empty());
    }
}
