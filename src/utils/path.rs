use std::path::{Path, PathBuf};

/// Get file extension as a lowercase string
pub fn get_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Check if a path looks like a rendered HTML page
pub fn is_html_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(get_extension(path).as_deref(), Some("html") | Some("htm"))
}

/// Where a processed file should be written.
///
/// Without an output directory the file is rewritten in place; otherwise its
/// path relative to `root` is mirrored under `output`.
pub fn output_path(file: &Path, root: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        None => file.to_path_buf(),
        Some(out) => {
            let relative = file
                .strip_prefix(root)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .or_else(|| file.file_name().map(PathBuf::from))
                .unwrap_or_else(|| file.to_path_buf());
            out.join(relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_detection() {
        assert!(is_html_file("site/index.html"));
        assert!(is_html_file("PAGE.HTM"));
        assert!(!is_html_file("feed.xml"));
        assert!(!is_html_file("README"));
    }

    #[test]
    fn test_output_path_in_place() {
        let file = Path::new("_site/docs/index.html");
        assert_eq!(output_path(file, Path::new("_site"), None), file);
    }

    #[test]
    fn test_output_path_mirrors_relative_layout() {
        let file = Path::new("_site/docs/index.html");
        assert_eq!(
            output_path(file, Path::new("_site"), Some(Path::new("out"))),
            PathBuf::from("out/docs/index.html")
        );
    }
}
