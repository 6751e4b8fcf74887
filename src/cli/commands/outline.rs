use serde::Serialize;
use std::path::Path;

use minitoc::utils::error::{BoxResult, TocError};
use minitoc::utils::fs;
use minitoc::{parse_html, TableOfContents};

use crate::cli::commands::config::resolve_config;
use crate::cli::types::TocArgs;

/// One heading as reported by the outline command
#[derive(Debug, Serialize, PartialEq)]
pub struct OutlineEntry {
    pub level: usize,
    pub tag: String,
    pub text: String,
    pub id: String,
}

/// Print the headings of an HTML file as JSON without modifying it
pub fn handle_outline_command(file: &Path, args: &TocArgs) -> BoxResult<()> {
    let html = fs::read_file(file)?;
    let entries = outline(&html, args)?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

/// Collect the outline entries of a page; identifiers are the ones a build
/// would assign
pub fn outline(html: &str, args: &TocArgs) -> BoxResult<Vec<OutlineEntry>> {
    let config = resolve_config(args)?;
    let toc = TableOfContents::new(config);
    let mut page = parse_html(html);

    let headings = toc.headings(&mut page, &args.source).ok_or_else(|| {
        TocError::Generic(format!("No element with id '{}' found", args.source))
    })?;

    Ok(headings
        .into_iter()
        .filter_map(|heading| {
            Some(OutlineEntry {
                level: toc.config().level_of(&heading.tag)?,
                tag: heading.tag,
                text: heading.text,
                id: heading.id.unwrap_or_default(),
            })
        })
        .collect())
}
