//! Error types for loading a neighborhood file

use std::fmt;

/// Result type alias for scenario loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a neighborhood file
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be opened or read
    Io(std::io::Error),

    /// The file ended before the group count line
    MissingGroupCount,

    /// The group count is not a positive integer
    InvalidGroupCount(String),

    /// The file ended before all house records were read
    MissingHouse { index: usize, expected: usize },

    /// The file ended before all group records were read
    MissingGroup { index: usize, expected: usize },

    /// A line could not be parsed into the expected record
    MalformedRecord { line: usize, reason: String },

    /// A record references a house that does not exist
    HouseOutOfRange {
        line: usize,
        house: usize,
        house_count: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "I/O error: {}", err),
            LoadError::MissingGroupCount => write!(f, "missing group count"),
            LoadError::InvalidGroupCount(value) => {
                write!(f, "invalid group count '{}': expected a positive integer", value)
            }
            LoadError::MissingHouse { index, expected } => write!(
                f,
                "missing house record {} (expected {} houses)",
                index, expected
            ),
            LoadError::MissingGroup { index, expected } => write!(
                f,
                "missing group record {} (expected {} groups)",
                index, expected
            ),
            LoadError::MalformedRecord { line, reason } => {
                write!(f, "malformed record on line {}: {}", line, reason)
            }
            LoadError::HouseOutOfRange {
                line,
                house,
                house_count,
            } => write!(
                f,
                "line {} references house {} but only {} houses exist",
                line, house, house_count
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}
