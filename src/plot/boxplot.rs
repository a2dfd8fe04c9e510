use std::fmt;

use yansi::Color::{Blue, Green, Red};

use crate::format::{ColumnScale, F64Formatter};
use crate::stats::{GroupedSummaries, SummaryStats};

const WHISKER: char = '─';
const LOWER_END: char = '├';
const UPPER_END: char = '┤';
const BOX: char = '▒';
const MEDIAN: char = '┃';

#[derive(Debug)]
/// A struct holding data to plot a box-and-whisker chart, one row per group.
///
/// Rows share the same horizontal scale, going from the smallest minimum to
/// the largest maximum of all groups.  The width of that scale is taken from
/// the formatter width (as in `{:80}`), defaulting to 80 characters.
pub struct BoxPlot {
    summaries: GroupedSummaries,
    precision: Option<usize>,
}

impl BoxPlot {
    /// Creates a BoxPlot from already computed summaries.
    ///
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used, with an heuristic based on the
    /// input data for deciding the units and the decimal places.
    pub fn new(summaries: GroupedSummaries, precision: Option<usize>) -> BoxPlot {
        BoxPlot {
            summaries,
            precision,
        }
    }

    fn glyphs(stats: &SummaryStats, scale: &ColumnScale) -> String {
        let mut cells = vec![' '; scale.cells()];
        let min = scale.position(stats.min);
        let max = scale.position(stats.max);
        cells[min..=max].iter_mut().for_each(|c| *c = WHISKER);
        let q1 = scale.position(stats.q1);
        let q3 = scale.position(stats.q3);
        cells[q1..=q3].iter_mut().for_each(|c| *c = BOX);
        cells[min] = LOWER_END;
        cells[max] = UPPER_END;
        cells[scale.position(stats.median)] = MEDIAN;
        cells.into_iter().collect()
    }
}

impl fmt::Display for BoxPlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (min, max) = match self.summaries.bounds() {
            Some(bounds) => bounds,
            None => return writeln!(f, "No data"),
        };
        let width = f.width().unwrap_or(80);
        let f64fmt = F64Formatter::new_with_precision(self.precision, min..max);
        let scale = ColumnScale::new(min..max, width);
        writeln!(
            f,
            "Groups = {groups}; Min = {min}; Max = {max}",
            groups = Blue.paint(self.summaries.len().to_string()),
            min = Blue.paint(f64fmt.format(min)),
            max = Blue.paint(f64fmt.format(max)),
        )?;
        writeln!(
            f,
            "Whiskers {LOWER_END}{WHISKER}{UPPER_END} go from min to max, {BOX} spans Q1 to Q3, {MEDIAN} is the median"
        )?;
        let label_width = self
            .summaries
            .iter()
            .map(|g| g.category.chars().count())
            .max()
            .unwrap_or(0);
        for group in self.summaries.iter() {
            let s = &group.stats;
            writeln!(
                f,
                "[{label}] {row} ({numbers})",
                label = Blue.paint(format!("{:width$}", group.category, width = label_width)),
                row = Red.paint(BoxPlot::glyphs(s, &scale)),
                numbers = Green.paint(
                    [s.min, s.q1, s.median, s.q3, s.max]
                        .iter()
                        .map(|v| f64fmt.format(*v))
                        .collect::<Vec<String>>()
                        .join(" / ")
                ),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Observation;
    use yansi::Paint;

    fn summaries(groups: &[(&str, Vec<f64>)]) -> GroupedSummaries {
        let observations: Vec<Observation> = groups
            .iter()
            .flat_map(|(category, values)| {
                values
                    .iter()
                    .map(move |v| Observation::new(category, *v))
            })
            .collect();
        GroupedSummaries::new(&observations).unwrap()
    }

    #[test]
    fn glyphs_layout() {
        let scale = ColumnScale::new(0.0..10.0, 11);
        let stats = SummaryStats::new(&[0.0, 2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(BoxPlot::glyphs(&stats, &scale), "├─▒▒┃▒▒─┤  ");
        let single = SummaryStats::new(&[10.0]).unwrap();
        assert_eq!(BoxPlot::glyphs(&single, &scale), "          ┃");
    }

    #[test]
    fn display_test() {
        let plot = BoxPlot::new(
            summaries(&[("A", vec![0.0, 2.0, 4.0, 6.0, 8.0]), ("Bee", vec![10.0])]),
            Some(0),
        );
        Paint::disable();
        let display = format!("{:11}", plot);
        assert!(display.contains("Groups = 2; Min = 0; Max = 10\n"));
        assert!(display.contains("[A  ] ├─▒▒┃▒▒─┤   (0 / 2 / 4 / 6 / 8)\n"));
        assert!(display.contains(&format!(
            "[Bee]{}┃ (10 / 10 / 10 / 10 / 10)\n",
            " ".repeat(11)
        )));
    }

    #[test]
    fn display_all_equal() {
        let plot = BoxPlot::new(summaries(&[("A", vec![3.0, 3.0])]), Some(1));
        Paint::disable();
        let display = format!("{:5}", plot);
        assert!(display.contains("[A] ┃     (3.0 / 3.0 / 3.0 / 3.0 / 3.0)\n"));
    }

    #[test]
    fn display_no_data() {
        let plot = BoxPlot::new(GroupedSummaries::default(), None);
        Paint::disable();
        assert_eq!(format!("{}", plot), "No data\n");
    }
}
