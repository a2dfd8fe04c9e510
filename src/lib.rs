//! # Getting Started
//! Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! csvcharts = "*"
//! ```
//!
//! ```rust
//! use csvcharts::plot::BoxPlot;
//! use csvcharts::stats::{GroupedSummaries, Observation};
//!
//! let likes = [("Instagram", 120.0), ("Twitter", 35.0), ("Instagram", 80.0)];
//! let observations: Vec<Observation> = likes
//!     .iter()
//!     .map(|(platform, value)| Observation::new(platform, *value))
//!     .collect();
//! // Five-number summary of every platform, in order of appearance
//! let summaries = GroupedSummaries::new(&observations).unwrap();
//! assert_eq!(summaries.get("Instagram").unwrap().median, 100.0);
//! print!("{:60}", BoxPlot::new(summaries, None));
//! ```

#[macro_use]
extern crate derive_builder;
#[macro_use]
extern crate log;

mod format;
pub mod plot;
pub mod read;
pub mod stats;
