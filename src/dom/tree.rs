use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};

use crate::dom::parser;
use crate::dom::types::{Document, NodeId};
use crate::dom::{is_raw_text_element, is_void_element};

/// What a node in the tree holds
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The document root
    Document,
    /// An element with its lowercase name and attributes in source order.
    /// `end_tag` is false when the source left the end tag implied.
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
        end_tag: bool,
    },
    /// Text exactly as it appears in markup (entities still encoded)
    Text(String),
    /// Comment body without the `<!--`/`-->` delimiters
    Comment(String),
    /// Declarations such as `<!DOCTYPE html>`, stored verbatim
    Declaration(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory element tree backed by an index arena.
///
/// Nodes are never freed; replacing an element's children just detaches the
/// old ones, so handles stay valid for the lifetime of the tree.
#[derive(Debug, Clone)]
pub struct ElementTree {
    nodes: Vec<NodeData>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create an empty tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append an element with no attributes under `parent`
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes: Vec::new(),
                self_closing: false,
                end_tag: true,
            },
        )
    }

    /// Append plain text under `parent`; markup characters are escaped
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(encode_text(text).into_owned()))
    }

    pub(crate) fn append_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.push(parent, kind)
    }

    /// Record that the source closed `node` with an explicit end tag
    pub(crate) fn mark_end_tag(&mut self, node: NodeId) {
        if let NodeKind::Element { end_tag, .. } = &mut self.nodes[node.0].kind {
            *end_tag = true;
        }
    }

    /// Value of an attribute; valueless attributes read as `""`
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            match attributes.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(name)) {
                Some((_, existing)) => *existing = Some(value.to_string()),
                None => attributes.push((name.to_ascii_lowercase(), Some(value.to_string()))),
            }
        }
    }

    /// Detach every child of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// All nodes below `node` in document order, `node` excluded
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.walk(node).collect()
    }

    /// Lazy pre-order walk below `node`
    fn walk(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let current = stack.pop()?;
            stack.extend(self.children(current).iter().rev().copied());
            Some(current)
        })
    }

    fn element_name(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        for &child in self.children(node) {
            match &self.nodes[child.0].kind {
                NodeKind::Text(text) => out.push_str(&decode_html_entities(text)),
                NodeKind::Element { name, .. } if is_raw_text_element(name) => {}
                NodeKind::Element { name, .. } if name == "br" => out.push(' '),
                NodeKind::Element { .. } => self.collect_text(child, out),
                _ => {}
            }
        }
    }

    /// Serialize the whole document back to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_children(self.root(), &mut out);
        out
    }

    /// Serialize the content of a single node
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_children(node, &mut out);
        out
    }

    fn write_children(&self, node: NodeId, out: &mut String) {
        for &child in self.children(node) {
            self.write_node(child, out);
        }
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Document => self.write_children(node, out),
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(body) => {
                out.push_str("<!--");
                out.push_str(body);
                out.push_str("-->");
            }
            NodeKind::Declaration(decl) => out.push_str(decl),
            NodeKind::Element {
                name,
                attributes,
                self_closing,
                end_tag,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&encode_double_quoted_attribute(value));
                        out.push('"');
                    }
                }

                let children = self.children(node);
                if is_void_element(name) {
                    out.push('>');
                } else if *self_closing && children.is_empty() {
                    out.push_str(" />");
                } else {
                    out.push('>');
                    self.write_children(node, out);
                    if *end_tag {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                }
            }
        }
    }
}

impl Document for ElementTree {
    type Handle = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk(self.root())
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    fn ids(&self) -> Vec<String> {
        self.walk(self.root())
            .filter_map(|node| self.attribute(node, "id"))
            .map(str::to_string)
            .collect()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn descendants_by_tag(&self, root: NodeId, tags: &[String]) -> Vec<NodeId> {
        self.walk(root)
            .filter(|&node| {
                self.element_name(node)
                    .map_or(false, |name| tags.iter().any(|tag| tag == name))
            })
            .collect()
    }

    fn tag_name(&self, element: NodeId) -> Option<String> {
        self.element_name(element).map(str::to_string)
    }

    fn text_content(&self, element: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(element, &mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn id(&self, element: NodeId) -> Option<String> {
        self.attribute(element, "id").map(str::to_string)
    }

    fn set_id(&mut self, element: NodeId, id: &str) {
        self.set_attribute(element, "id", id);
    }

    fn replace_children_with_markup(&mut self, element: NodeId, markup: &str) {
        self.clear_children(element);
        // New content may not survive an implied end tag
        self.mark_end_tag(element);
        parser::append_markup(self, element, markup);
    }
}
