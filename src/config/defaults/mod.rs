use crate::config::types::ListType;

/// Default heading tags, outermost first
pub fn default_headings() -> Vec<String> {
    ["h2", "h3", "h4", "h5", "h6"]
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

/// Default title printed above the list
pub fn default_title() -> String {
    "Table of contents".to_string()
}

/// Default tag wrapping the title
pub fn default_title_tag() -> String {
    "h2".to_string()
}

/// Default list style
pub fn default_list_type() -> ListType {
    ListType::Ordered
}
