use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use minitoc::ListType;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "minitoc")]
#[command(about = "Insert a table of contents into rendered HTML pages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debugging
    #[arg(short = 'g', long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Only report errors
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Insert a table of contents into HTML files
    #[command(alias = "b")]
    Build {
        /// HTML files, or directories to search for .html/.htm files
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        toc: TocArgs,

        /// Id of the element that receives the table of contents
        #[arg(short, long, value_name = "ID", default_value = "toc")]
        target: String,

        /// Write results under this directory instead of in place
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Report what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },

    /// Print the slug generated for each text
    Slug {
        /// Texts to slugify
        #[arg(required = true, value_name = "TEXT")]
        text: Vec<String>,
    },

    /// Print the headings of an HTML file as JSON
    Outline {
        /// HTML file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        toc: TocArgs,
    },
}

/// Options shared by the commands that read headings
#[derive(Args, Debug, Clone, Default)]
pub struct TocArgs {
    /// Id of the element whose headings are collected
    #[arg(short, long, value_name = "ID", default_value = "content")]
    pub source: String,

    /// Configuration file (YAML, TOML or JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Title above the list; pass an empty string to omit it
    #[arg(long)]
    pub title: Option<String>,

    /// Tag wrapping the title
    #[arg(long, value_name = "TAG")]
    pub title_tag: Option<String>,

    /// List style: ol or ul
    #[arg(long, value_name = "TYPE")]
    pub list_type: Option<ListType>,

    /// Comma separated heading tags, outermost first (e.g. h2,h3,h4)
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub headings: Option<Vec<String>>,
}
