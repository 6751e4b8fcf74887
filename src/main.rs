use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    // Run the CLI
    cli::run()
}
