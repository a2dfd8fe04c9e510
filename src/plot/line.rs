use std::collections::HashMap;
use std::fmt;
use std::ops::Range;

use yansi::Color::{Blue, Red};

use crate::format::F64Formatter;
use crate::stats::{InvalidInputError, Observation};

#[derive(Debug)]
/// A struct holding data to plot a line chart with one point per label (a
/// date, typically), in the order labels appear in the input.
pub struct LinePlot {
    labels: Vec<String>,
    values: Vec<f64>,
    height: usize,
    precision: Option<usize>,
}

impl LinePlot {
    /// Creates a LinePlot from labeled values.  Values sharing a label are
    /// averaged into a single point.
    ///
    /// `height` is the number of "rows" to display (every row has a height of a
    /// character).
    ///
    /// `precision` is an Option with the number of decimals to display.  If
    /// "None" is used, human units will be used.
    pub fn new(
        points: &[Observation],
        height: usize,
        precision: Option<usize>,
    ) -> Result<LinePlot, InvalidInputError> {
        let mut labels = Vec::new();
        let mut means: Vec<(f64, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for point in points {
            InvalidInputError::check(&point.category, point.value)?;
            let slot = *index.entry(point.category.as_str()).or_insert_with(|| {
                labels.push(point.category.clone());
                means.push((0.0, 0));
                labels.len() - 1
            });
            let (mean, n) = &mut means[slot];
            *n += 1;
            *mean += (point.value - *mean) / *n as f64;
        }
        Ok(LinePlot {
            labels,
            values: means.into_iter().map(|(mean, _)| mean).collect(),
            height: height.max(1),
            precision,
        })
    }

    /// Value domain of the y axis.  It always includes zero.
    fn domain(&self) -> Range<f64> {
        let min = self.values.iter().fold(0.0, |acc: f64, v| acc.min(*v));
        let max = self.values.iter().fold(0.0, |acc: f64, v| acc.max(*v));
        if max > min {
            min..max
        } else {
            min..min + 1.0
        }
    }

    /// Lower bound of every row, from bottom to top.
    fn y_axis(&self) -> Vec<f64> {
        let domain = self.domain();
        let height = self.height as f64;
        let step = domain.end / height - domain.start / height;
        (0..self.height)
            .map(|y| domain.start + step * y as f64)
            .collect()
    }

    fn column_width(&self) -> usize {
        self.labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl fmt::Display for LinePlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.labels.is_empty() {
            return writeln!(f, "No data");
        }
        let domain = self.domain();
        let f64fmt = F64Formatter::new_with_precision(self.precision, domain.clone());
        writeln!(
            f,
            "Points = {len}; Min = {min}; Max = {max}",
            len = Blue.paint(self.labels.len().to_string()),
            min = Blue.paint(f64fmt.format(self.values.iter().cloned().fold(f64::INFINITY, f64::min))),
            max = Blue.paint(f64fmt.format(self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max))),
        )?;
        let mut y_axis = self.y_axis();
        y_axis.reverse();
        let y_width = y_axis
            .iter()
            .map(|v| f64fmt.format(*v).len())
            .max()
            .unwrap_or(0);
        let column_width = self.column_width();
        let values = self.values.as_slice();
        let y_fmt = &f64fmt;
        let row = move |range: Range<f64>| Row {
            values,
            range,
            y_width,
            column_width,
            f64fmt: y_fmt,
        };
        write!(f, "{}", row(y_axis[0]..f64::INFINITY))?;
        for y in y_axis.windows(2) {
            write!(f, "{}", row(y[1]..y[0]))?;
        }
        write!(f, "{: <width$}", "", width = y_width + 3)?;
        for label in self.labels.iter() {
            write!(f, "{:width$}", label, width = column_width)?;
        }
        writeln!(f)
    }
}

/// One horizontal slice of the chart, holding the points whose value falls
/// in `range`.
struct Row<'a> {
    values: &'a [f64],
    range: Range<f64>,
    y_width: usize,
    column_width: usize,
    f64fmt: &'a F64Formatter,
}

impl fmt::Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells: String = self
            .values
            .iter()
            .map(|value| {
                let mark = if self.range.contains(value) { '●' } else { ' ' };
                format!("{: <width$}", mark, width = self.column_width)
            })
            .collect();
        writeln!(
            f,
            "[{}] {}",
            Blue.paint(format!(
                "{:>width$}",
                self.f64fmt.format(self.range.start),
                width = self.y_width
            )),
            Red.paint(cells),
        )
    }
}
