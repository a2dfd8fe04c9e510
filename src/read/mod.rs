pub use self::table::{TableReader, TableReaderBuilder};

mod table;

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};

#[derive(Debug, Clone, PartialEq)]
/// A row of a table where every group is split in several series (for
/// instance a platform split by type of post).
pub struct SeriesRow {
    pub group: String,
    pub series: String,
    pub value: f64,
}

impl SeriesRow {
    pub fn new(group: &str, series: &str, value: f64) -> SeriesRow {
        SeriesRow {
            group: group.to_string(),
            series: series.to_string(),
            value,
        }
    }
}

/// Errors found while loading a table.
#[derive(Debug)]
pub enum ReadError {
    /// The input could not be opened or read.
    Io(io::Error),
    /// The input is not a well-formed delimited table.
    Csv(csv::Error),
    /// No header cell carries the requested name.
    MissingColumn(String),
    /// A value cell does not hold a number.
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadError::Io(error) => write!(f, "{}", error),
            ReadError::Csv(error) => write!(f, "Malformed table: {}", error),
            ReadError::MissingColumn(name) => write!(f, "Column '{}' not found in header", name),
            ReadError::InvalidNumber {
                line,
                column,
                value,
            } => write!(
                f,
                "Cannot parse '{}' as a number (line {}, column '{}')",
                value, line, column
            ),
        }
    }
}

impl Error for ReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReadError::Io(error) => Some(error),
            ReadError::Csv(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(error: io::Error) -> Self {
        ReadError::Io(error)
    }
}

impl From<csv::Error> for ReadError {
    fn from(error: csv::Error) -> Self {
        ReadError::Csv(error)
    }
}

/// Return io::Read from a path, falling back to using stdin if path is "-".
fn open_file(path: &str) -> Result<Box<dyn io::Read>, ReadError> {
    match path {
        "-" => Ok(Box::new(BufReader::new(io::stdin()))),
        _ => match File::open(path) {
            Ok(fd) => Ok(Box::new(BufReader::new(fd))),
            Err(error) => Err(ReadError::Io(io::Error::new(
                error.kind(),
                format!("Could not open {}: {}", path, error),
            ))),
        },
    }
}
