use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::utils::error::{BoxResult, TocError};
use crate::utils::path::is_html_file;

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> BoxResult<()> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}

/// Read a file to string
pub fn read_file<P: AsRef<Path>>(path: P) -> BoxResult<String> {
    let mut file = fs::File::open(path.as_ref()).map_err(|e| {
        TocError::File(format!("Failed to open {}: {}", path.as_ref().display(), e))
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Write a string to a file, creating the file if it doesn't exist
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> BoxResult<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            create_directory(parent)?;
        }
    }

    let mut file = fs::File::create(path.as_ref())?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Expand the given paths into HTML files.
///
/// Files are taken as-is whatever their extension; directories are walked
/// recursively and only `.html`/`.htm` entries are kept. Each returned pair
/// is the file and the root it was found under.
pub fn collect_html_files(paths: &[PathBuf]) -> BoxResult<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
            files.push((path.clone(), root));
        } else if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| TocError::File(e.to_string()))?;
                if entry.file_type().is_file() && is_html_file(entry.path()) {
                    files.push((entry.path().to_path_buf(), path.clone()));
                }
            }
        } else {
            return Err(TocError::File(format!("Path does not exist: {}", path.display())).into());
        }
    }

    debug!("Collected {} HTML file(s)", files.len());
    Ok(files)
}
