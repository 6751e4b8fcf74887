/// Handle to a node stored in an [`ElementTree`](super::ElementTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// The hosting document's element tree, as seen by the table of contents.
///
/// Everything the builder needs from a page goes through this trait: container
/// lookup, heading discovery, identifier write-back and replacing the target's
/// content. Implementors decide what a handle is; it only has to be cheap to
/// copy and compare.
pub trait Document {
    /// Handle to one element of the document
    type Handle: Copy + Eq;

    /// First element in document order whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Handle>;

    /// Every `id` attribute value in the document.
    fn ids(&self) -> Vec<String>;

    /// Whether `node` is `ancestor` itself or lies somewhere below it.
    fn contains(&self, ancestor: Self::Handle, node: Self::Handle) -> bool;

    /// Descendants of `root` (excluding `root` itself) whose lowercase tag
    /// name is one of `tags`, in document order.
    fn descendants_by_tag(&self, root: Self::Handle, tags: &[String]) -> Vec<Self::Handle>;

    /// Lowercase tag name of an element.
    fn tag_name(&self, element: Self::Handle) -> Option<String>;

    /// Rendered text of an element: descendant text, entity-decoded, with
    /// whitespace runs collapsed and the ends trimmed.
    fn text_content(&self, element: Self::Handle) -> String;

    /// The element's `id` attribute, if present.
    fn id(&self, element: Self::Handle) -> Option<String>;

    /// Set (or overwrite) the element's `id` attribute.
    fn set_id(&mut self, element: Self::Handle, id: &str);

    /// Replace all of the element's content with the given markup fragment.
    fn replace_children_with_markup(&mut self, element: Self::Handle, markup: &str);
}
