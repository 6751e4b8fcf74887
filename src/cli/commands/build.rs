use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use minitoc::utils::error::BoxResult;
use minitoc::utils::{fs, path};
use minitoc::{parse_html, TableOfContents};

use crate::cli::commands::config::resolve_config;
use crate::cli::types::TocArgs;

/// What a build run did
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Files that received a table of contents
    pub updated: usize,
    /// Files left alone because they couldn't be read as UTF-8 text or a
    /// container was missing
    pub skipped: usize,
}

/// Handle the build command
pub fn handle_build_command(
    paths: &[PathBuf],
    args: &TocArgs,
    target: &str,
    output: Option<&Path>,
    dry_run: bool,
) -> BoxResult<()> {
    let summary = build(paths, args, target, output, dry_run)?;

    info!(
        "Table of contents {} in {} file(s), {} skipped",
        if dry_run { "would be written" } else { "written" },
        summary.updated,
        summary.skipped
    );
    Ok(())
}

/// Insert the table of contents into every HTML file under `paths`
pub fn build(
    paths: &[PathBuf],
    args: &TocArgs,
    target: &str,
    output: Option<&Path>,
    dry_run: bool,
) -> BoxResult<BuildSummary> {
    let toc = TableOfContents::new(resolve_config(args)?);
    let mut summary = BuildSummary::default();

    for (file, root) in fs::collect_html_files(paths)? {
        let html = match fs::read_file(&file) {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                summary.skipped += 1;
                continue;
            }
        };
        let mut page = parse_html(&html);

        match toc.print(&mut page, &args.source, target) {
            Some(stats) => {
                let destination = path::output_path(&file, &root, output);
                if dry_run {
                    info!("Would write {} item(s) to {}", stats.items, destination.display());
                } else {
                    fs::write_file(&destination, &page.to_html())?;
                    info!("Wrote {} item(s) to {}", stats.items, destination.display());
                }
                debug!("{}: {:?}", file.display(), stats);
                summary.updated += 1;
            }
            None => {
                warn!(
                    "Skipping {}: no #{} or #{} element",
                    file.display(),
                    args.source,
                    target
                );
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}
