pub use self::summary::{quantile, GroupSummary, GroupedSummaries, SummaryStats};

mod summary;

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// One labeled numeric data point, as read from a row of an input table.
pub struct Observation {
    /// Label used for grouping (a platform, a date...).
    pub category: String,
    /// Numeric measurement attached to the label.
    pub value: f64,
}

impl Observation {
    pub fn new(category: &str, value: f64) -> Self {
        Self {
            category: category.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Error raised when a value that is NaN or infinite reaches a computation
/// that needs to order or scale numbers.
pub struct InvalidInputError {
    /// Category of the offending observation.
    pub category: String,
    /// The non-finite value itself.
    pub value: f64,
}

impl InvalidInputError {
    pub fn new(category: &str, value: f64) -> Self {
        Self {
            category: category.to_string(),
            value,
        }
    }

    /// Returns an error for the first non-finite value, if any.
    pub(crate) fn check(category: &str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::new(category, value))
        }
    }
}

impl fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid value {} in category '{}': only finite numbers are supported",
            self.value, self.category
        )
    }
}

impl Error for InvalidInputError {}
