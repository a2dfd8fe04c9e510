use std::collections::HashMap;
use std::fmt;

use yansi::Color::{self, Blue, Cyan, Green, Magenta, Red, Yellow};

use crate::format::{F64Formatter, HorizontalScale, BAR_CHAR};
use crate::read::SeriesRow;
use crate::stats::InvalidInputError;

const SERIES_COLORS: &[Color] = &[Red, Green, Blue, Yellow, Magenta, Cyan];

#[derive(Debug)]
/// A struct holding data to plot a bar chart of several series per group.
///
/// Rows that repeat a (group, series) pair are averaged, so the input can be
/// either a table of averages or a table of raw measurements.
pub struct GroupedBars {
    groups: Vec<String>,
    series: Vec<String>,
    /// Averaged value per group (outer) and series (inner).
    values: Vec<Vec<Option<f64>>>,
    precision: Option<usize>,
}

impl GroupedBars {
    /// Creates a GroupedBars from table rows.  Groups and series keep the
    /// order in which they are first seen.
    ///
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used.
    pub fn new(rows: &[SeriesRow], precision: Option<usize>) -> Result<Self, InvalidInputError> {
        let mut groups = Vec::new();
        let mut series = Vec::new();
        let mut group_index: HashMap<&str, usize> = HashMap::new();
        let mut series_index: HashMap<&str, usize> = HashMap::new();
        let mut means: HashMap<(usize, usize), (f64, usize)> = HashMap::new();
        for row in rows {
            InvalidInputError::check(&format!("{}/{}", row.group, row.series), row.value)?;
            let g = *group_index.entry(row.group.as_str()).or_insert_with(|| {
                groups.push(row.group.clone());
                groups.len() - 1
            });
            let s = *series_index.entry(row.series.as_str()).or_insert_with(|| {
                series.push(row.series.clone());
                series.len() - 1
            });
            let (mean, n) = means.entry((g, s)).or_insert((0.0, 0));
            *n += 1;
            *mean += (row.value - *mean) / *n as f64;
        }
        let values = (0..groups.len())
            .map(|g| {
                (0..series.len())
                    .map(|s| means.get(&(g, s)).map(|(mean, _)| *mean))
                    .collect()
            })
            .collect();
        Ok(GroupedBars {
            groups,
            series,
            values,
            precision,
        })
    }

    /// Averaged value of `series` inside `group`.
    pub fn get(&self, group: &str, series: &str) -> Option<f64> {
        let g = self.groups.iter().position(|x| x == group)?;
        let s = self.series.iter().position(|x| x == series)?;
        self.values[g][s]
    }

    fn top(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .flatten()
            .fold(0.0, |acc: f64, v| acc.max(*v))
    }

    fn color(index: usize) -> Color {
        SERIES_COLORS[index % SERIES_COLORS.len()]
    }
}

impl fmt::Display for GroupedBars {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.groups.is_empty() {
            return writeln!(f, "No data");
        }
        let width = f.width().unwrap_or(80);
        let top = self.top();
        let f64fmt = F64Formatter::new_with_precision(self.precision, 0.0..top);
        let scale = HorizontalScale::new(top, width);
        writeln!(
            f,
            "Groups = {groups}; Series = {series}; Max = {max}",
            groups = Blue.paint(self.groups.len().to_string()),
            series = Blue.paint(self.series.len().to_string()),
            max = Blue.paint(f64fmt.format(top)),
        )?;
        let legend = self
            .series
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{} {}", GroupedBars::color(i).paint(BAR_CHAR), name))
            .collect::<Vec<String>>()
            .join("  ");
        writeln!(f, "Series: {}", legend)?;
        match self.precision {
            Some(n) => write!(f, "{:.*}", n, scale)?,
            None => write!(f, "{}", scale)?,
        }
        let group_width = self.groups.iter().map(|g| g.chars().count()).max().unwrap_or(0);
        let series_width = self.series.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let value_width = self
            .values
            .iter()
            .flatten()
            .flatten()
            .map(|v| f64fmt.format(*v).len())
            .max()
            .unwrap_or(0);
        for (group, values) in self.groups.iter().zip(self.values.iter()) {
            let mut label = group.as_str();
            for (i, value) in values.iter().enumerate() {
                let value = match value {
                    Some(v) => *v,
                    None => continue,
                };
                writeln!(
                    f,
                    "[{label}] [{series}] [{value}] {bar}",
                    label = Blue.paint(format!("{:width$}", label, width = group_width)),
                    series = Blue.paint(format!("{:width$}", self.series[i], width = series_width)),
                    value = Green.paint(format!("{:>width$}", f64fmt.format(value), width = value_width)),
                    bar = scale.get_bar(value, GroupedBars::color(i)),
                )?;
                label = "";
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use yansi::Paint;

    fn rows() -> Vec<SeriesRow> {
        vec![
            SeriesRow::new("Facebook", "Image", 10.0),
            SeriesRow::new("Facebook", "Link", 5.0),
            SeriesRow::new("Twitter", "Image", 20.0),
            SeriesRow::new("Twitter", "Image", 40.0),
            SeriesRow::new("Twitter", "Video", 0.0),
        ]
    }

    #[test]
    fn averages_duplicates() {
        let bars = GroupedBars::new(&rows(), None).unwrap();
        assert_eq!(bars.groups, ["Facebook", "Twitter"]);
        assert_eq!(bars.series, ["Image", "Link", "Video"]);
        assert_float_eq!(bars.get("Twitter", "Image").unwrap(), 30.0, abs <= 1e-12);
        assert_float_eq!(bars.get("Facebook", "Link").unwrap(), 5.0, abs <= 1e-12);
        assert_eq!(bars.get("Facebook", "Video"), None);
        assert_eq!(bars.get("Myspace", "Image"), None);
        assert_float_eq!(bars.top(), 30.0, abs <= 1e-12);
    }

    #[test]
    fn rejects_non_finite() {
        let mut input = rows();
        input.push(SeriesRow::new("Twitter", "Link", f64::NAN));
        let error = GroupedBars::new(&input, None).unwrap_err();
        assert_eq!(error.category, "Twitter/Link");
    }

    #[test]
    fn display_test() {
        let bars = GroupedBars::new(&rows(), Some(1)).unwrap();
        Paint::disable();
        let display = format!("{:30}", bars);
        assert!(display.contains("Groups = 2; Series = 3; Max = 30.0\n"));
        assert!(display.contains("Series: ∎ Image  ∎ Link  ∎ Video\n"));
        assert!(display.contains("Each ∎ represents a value of 1.0\n"));
        assert!(display.contains("[Facebook] [Image] [10.0] ∎∎∎∎∎∎∎∎∎∎\n"));
        assert!(display.contains("[        ] [Link ] [ 5.0] ∎∎∎∎∎\n"));
        assert!(display.contains(&format!("[Twitter ] [Image] [30.0] {}\n", "∎".repeat(30))));
        assert!(display.contains("[        ] [Video] [ 0.0] \n"));
        assert!(!display.contains("[Facebook] [Video]"));
    }

    #[test]
    fn averages_huge_values() {
        let input = vec![SeriesRow::new("G", "S", 1e308), SeriesRow::new("G", "S", 1e308)];
        let bars = GroupedBars::new(&input, Some(0)).unwrap();
        assert_eq!(bars.get("G", "S"), Some(1e308));
        Paint::disable();
        let display = format!("{:20}", bars);
        assert!(display.ends_with(&format!("] {}\n", "∎".repeat(20))));
    }

    #[test]
    fn default_width() {
        let bars = GroupedBars::new(&rows(), Some(1)).unwrap();
        Paint::disable();
        assert_eq!(format!("{}", bars), format!("{:80}", bars));
        assert!(format!("{}", bars).contains(&format!("[30.0] {}\n", "∎".repeat(80))));
    }

    #[test]
    fn display_no_data() {
        let bars = GroupedBars::new(&[], None).unwrap();
        assert_eq!(format!("{}", bars), "No data\n");
    }
}
