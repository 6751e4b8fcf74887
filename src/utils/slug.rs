use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    // Word characters are ASCII only, so anything left outside [A-Za-z0-9_-]
    // after diacritic stripping becomes a hyphen.
    static ref NON_WORD_REGEX: Regex = Regex::new(r"[^A-Za-z0-9_\-]+").unwrap();
    static ref HYPHEN_RUN_REGEX: Regex = Regex::new(r"-{2,}").unwrap();
}

/// Convert display text into a URL-safe, lowercase, hyphen-separated slug.
///
/// Accented characters are decomposed (NFD) and their combining marks
/// dropped, so `"Crème brûlée"` becomes `"creme-brulee"`. Empty or
/// all-punctuation text yields an empty slug; callers that need a usable
/// identifier must guard against that themselves.
pub fn slugify(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = stripped.to_lowercase();
    let trimmed = lowered.trim();

    let hyphenated = WHITESPACE_REGEX.replace_all(trimmed, "-");
    let cleaned = NON_WORD_REGEX.replace_all(&hyphenated, "-");
    let collapsed = HYPHEN_RUN_REGEX.replace_all(&cleaned, "-");

    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugs() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Table of   contents  "), "table-of-contents");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_diacritics_are_stripped() {
        assert_eq!(slugify("Crème brûlée"), "creme-brulee");
        assert_eq!(slugify("Ça va, Émile?"), "ca-va-emile");
    }

    #[test]
    fn test_punctuation_collapses_to_single_hyphens() {
        assert_eq!(slugify("API Reference (v2)"), "api-reference-v2");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--leading and trailing--"), "leading-and-trailing");
        assert_eq!(slugify("What's new?!"), "what-s-new");
    }

    #[test]
    fn test_degenerate_input_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("?!*"), "");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slug_shape_holds_for_mixed_input() {
        let inputs = [
            "Intro",
            " Ünïcödé\tTabs\nand lines ",
            "1. Getting started — quickly",
            "<b>tags</b> & entities",
            "---",
            "a\u{00a0}b",
        ];

        for input in inputs {
            let slug = slugify(input);
            assert_eq!(slug, slug.to_lowercase(), "not lowercase: {:?}", slug);
            assert!(!slug.chars().any(char::is_whitespace), "whitespace in {:?}", slug);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "edge hyphen in {:?}", slug);
            assert!(!slug.contains("--"), "repeated hyphen in {:?}", slug);
        }
    }
}
