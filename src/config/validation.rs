use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap();
}

/// Check that a string can be used as an element name in generated markup
pub fn is_valid_tag_name(name: &str) -> bool {
    TAG_NAME_REGEX.is_match(name)
}

/// Validate a heading sequence: non-empty, every entry a usable tag name
pub fn validate_headings(headings: &[String]) -> Result<(), String> {
    if headings.is_empty() {
        return Err("headings must not be empty".to_string());
    }

    for tag in headings {
        if !is_valid_tag_name(tag) {
            return Err(format!("invalid heading tag '{}'", tag));
        }
    }

    Ok(())
}
