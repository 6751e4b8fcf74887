use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for minitoc operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for the fallible outer surfaces (files, config, CLI)
#[derive(Debug)]
pub enum TocError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration file error
    Config(String),
    /// Input file handling error
    File(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for TocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TocError::Io(err) => write!(f, "IO error: {}", err),
            TocError::Config(msg) => write!(f, "Configuration error: {}", msg),
            TocError::File(msg) => write!(f, "File error: {}", msg),
            TocError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for TocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TocError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for TocError {
    fn from(err: io::Error) -> Self {
        TocError::Io(err)
    }
}

impl From<String> for TocError {
    fn from(msg: String) -> Self {
        TocError::Generic(msg)
    }
}

impl From<&str> for TocError {
    fn from(msg: &str) -> Self {
        TocError::Generic(msg.to_string())
    }
}
