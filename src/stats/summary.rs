use std::collections::HashMap;
use std::fmt;

use yansi::Color::Blue;

use super::{InvalidInputError, Observation};
use crate::format::F64Formatter;

/// Computes the quantile at fraction `p` of already sorted values, using
/// linear interpolation between the two closest ranks.
///
/// The quantile is found at the real index `p * (n - 1)`.  When that index
/// falls between two elements, the result is interpolated between them.  `p`
/// is clamped to `[0, 1]`.  Returns `None` for an empty slice.
///
/// ```
/// use csvcharts::stats::quantile;
///
/// assert_eq!(quantile(&[2.0, 8.0], 0.25), Some(3.5));
/// assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
/// assert_eq!(quantile(&[], 0.5), None);
/// ```
pub fn quantile(sorted_values: &[f64], p: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let index = p.clamp(0.0, 1.0) * last as f64;
    let lo = index.floor() as usize;
    let hi = index.ceil() as usize;
    let frac = index - lo as f64;
    let (low, high) = (sorted_values[lo], sorted_values[hi]);
    let difference = high - low;
    if difference.is_finite() {
        Some(low + frac * difference)
    } else {
        // Ends too far apart to subtract: weight them instead.
        Some((low * (1.0 - frac) + high * frac).clamp(low, high))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Five-number summary of a set of numerical values.
pub struct SummaryStats {
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Computes the summary of unsorted values.  A sorted copy of the input is
    /// made, so callers keep their ordering.
    ///
    /// Values are expected to be finite; `GroupedSummaries::new` checks that
    /// for every observation before calling into here.
    pub fn new(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary of values sorted in ascending order.  Returns
    /// `None` if there are no values.
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.windows(2).all(|w| w[0] <= w[1]),
            "values must be sorted in ascending order"
        );
        Some(Self {
            min: *sorted_values.first()?,
            q1: quantile(sorted_values, 0.25)?,
            median: quantile(sorted_values, 0.5)?,
            q3: quantile(sorted_values, 0.75)?,
            max: *sorted_values.last()?,
        })
    }

    /// Distance between third and first quartiles.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

impl fmt::Display for SummaryStats {
    /// Formatter precision (as in `{:.2}`) selects the number of decimals.
    /// Without it, human units are picked from the min..max range.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formatter = match f.precision() {
            None => F64Formatter::new_with_range(self.min..self.max),
            Some(n) => F64Formatter::new(n),
        };
        write!(
            f,
            "Min = {min}; Q1 = {q1}; Median = {median}; Q3 = {q3}; Max = {max}",
            min = Blue.paint(formatter.format(self.min)),
            q1 = Blue.paint(formatter.format(self.q1)),
            median = Blue.paint(formatter.format(self.median)),
            q3 = Blue.paint(formatter.format(self.q3)),
            max = Blue.paint(formatter.format(self.max)),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Summary of all the observations sharing a category.
pub struct GroupSummary {
    pub category: String,
    /// Number of observations in the group.
    pub samples: usize,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Five-number summaries of observations grouped by category.
///
/// Groups are kept in the order their category was first seen in the input.
pub struct GroupedSummaries {
    groups: Vec<GroupSummary>,
}

impl GroupedSummaries {
    /// Groups `observations` by category and computes the summary of every
    /// group.
    ///
    /// An empty input gives an empty result.  Fails on the first observation
    /// whose value is NaN or infinite.
    ///
    /// ```
    /// use csvcharts::stats::{GroupedSummaries, Observation};
    ///
    /// let observations: Vec<Observation> = [1.0, 2.0, 3.0, 4.0]
    ///     .iter()
    ///     .map(|v| Observation::new("A", *v))
    ///     .collect();
    /// let summaries = GroupedSummaries::new(&observations).unwrap();
    /// let a = summaries.get("A").unwrap();
    /// assert_eq!((a.min, a.q1, a.median, a.q3, a.max), (1.0, 1.75, 2.5, 3.25, 4.0));
    /// ```
    pub fn new(observations: &[Observation]) -> Result<Self, InvalidInputError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut partitions: Vec<(&str, Vec<f64>)> = Vec::new();
        for observation in observations {
            InvalidInputError::check(&observation.category, observation.value)?;
            let slot = *index
                .entry(observation.category.as_str())
                .or_insert_with(|| {
                    partitions.push((observation.category.as_str(), Vec::new()));
                    partitions.len() - 1
                });
            partitions[slot].1.push(observation.value);
        }
        let groups = partitions
            .into_iter()
            .filter_map(|(category, mut values)| {
                values.sort_by(f64::total_cmp);
                let stats = SummaryStats::from_sorted(&values)?;
                debug!(
                    "Group '{}' has {} samples: {:.3}",
                    category,
                    values.len(),
                    stats
                );
                Some(GroupSummary {
                    category: category.to_string(),
                    samples: values.len(),
                    stats,
                })
            })
            .collect();
        Ok(Self { groups })
    }

    /// Summary of the group labeled `category`, if present.
    pub fn get(&self, category: &str) -> Option<&SummaryStats> {
        self.find(category).map(|g| &g.stats)
    }

    /// Number of observations in the group labeled `category`.
    pub fn samples(&self, category: &str) -> Option<usize> {
        self.find(category).map(|g| g.samples)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupSummary> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Smallest minimum and largest maximum across all groups.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let first = self.groups.first()?;
        Some(self.groups.iter().fold(
            (first.stats.min, first.stats.max),
            |(lo, hi), g| (lo.min(g.stats.min), hi.max(g.stats.max)),
        ))
    }

    fn find(&self, category: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.category == category)
    }
}
