use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Pick the log level from the command line flags
pub fn log_level(debug: bool, quiet: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    }
}

/// Initialize logging with the level implied by the flags
pub fn init_logging(debug: bool, quiet: bool) -> LevelFilter {
    let level = log_level(debug, quiet);

    // A logger may already be installed (e.g. when embedded); keep it
    let _ = SimpleLogger::new().with_level(level).init();

    level
}
