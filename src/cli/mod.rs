pub mod types;
pub mod commands;
pub mod logging;

use clap::Parser;
use std::process::ExitCode;

use types::{Cli, Commands};

/// Run the command-line interface
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging system
    logging::init_logging(cli.debug, cli.quiet);

    let result = match &cli.command {
        Commands::Build { paths, toc, target, output, dry_run } => {
            commands::handle_build_command(paths, toc, target, output.as_deref(), *dry_run)
        }
        Commands::Slug { text } => {
            commands::handle_slug_command(text);
            Ok(())
        }
        Commands::Outline { file, toc } => commands::handle_outline_command(file, toc),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
