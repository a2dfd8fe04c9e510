use std::fmt;
use std::ops::Range;

use yansi::Color::{self, Blue};
use yansi::Paint;

// Units-based suffixes for human formatting.
const UNITS: &[&str] = &["", " K", " M", " G", " T", " P", " E", " Z", " Y"];
pub static BAR_CHAR: &str = "∎";

#[derive(Debug)]
pub struct F64Formatter {
    /// Decimals digits to be used
    decimals: usize,
    /// Number of times the value will be divided by 1000
    divisor: u8,
    /// Suffix (typically units) to be printed after number
    suffix: String,
}

impl F64Formatter {
    /// Initializes a new `F64Formatter` with a fixed number of decimals.
    pub fn new(decimals: usize) -> F64Formatter {
        F64Formatter {
            decimals,
            divisor: 0,
            suffix: "".to_owned(),
        }
    }

    /// Initializes a new `F64Formatter` for formatting numbers in the
    /// provided range, picking decimals and units from its magnitude.
    pub fn new_with_range(range: Range<f64>) -> F64Formatter {
        let difference = range.end - range.start;
        if difference == 0.0 || !difference.is_finite() {
            return F64Formatter::new(3);
        }
        let log = difference.abs().log10() as i64;
        if log <= 0 {
            F64Formatter::new((-log as usize).min(8) + 3)
        } else {
            let divisor = ((log - 1) / 3).min(5) as u8;
            F64Formatter {
                decimals: log.rem_euclid(3) as usize,
                divisor,
                suffix: UNITS[divisor as usize].to_owned(),
            }
        }
    }

    /// Picks a fixed precision if given, or human units for `range` otherwise.
    pub fn new_with_precision(precision: Option<usize>, range: Range<f64>) -> F64Formatter {
        match precision {
            Some(n) => F64Formatter::new(n),
            None => F64Formatter::new_with_range(range),
        }
    }

    pub fn format(&self, number: f64) -> String {
        format!(
            "{:.*}{}",
            self.decimals,
            number / 1000_usize.pow(self.divisor.into()) as f64,
            self.suffix
        )
    }
}

/// Maps values of a numeric domain onto character columns (or rows).
#[derive(Debug, Clone, Copy)]
pub struct ColumnScale {
    start: f64,
    end: f64,
    cells: usize,
}

impl ColumnScale {
    /// `cells` is the amount of characters available; it is at least 1.
    pub fn new(domain: Range<f64>, cells: usize) -> ColumnScale {
        ColumnScale {
            start: domain.start,
            end: domain.end,
            cells: cells.max(1),
        }
    }

    /// Index of the cell holding `value`, clamped to the available cells.
    /// A degenerate domain puts everything in the first cell.
    pub fn position(&self, value: f64) -> usize {
        let span = self.end - self.start;
        if span <= 0.0 {
            return 0;
        }
        let ratio = ((value - self.start) / span).clamp(0.0, 1.0);
        (ratio * (self.cells - 1) as f64).round() as usize
    }

    pub fn cells(&self) -> usize {
        self.cells
    }
}

pub struct HorizontalScale {
    /// How much value is represented by a char
    scale: f64,
    /// Longest bar, in chars
    width: usize,
}

impl HorizontalScale {
    /// Builds a scale so that `top` fits in `width` chars.
    pub fn new(top: f64, width: usize) -> HorizontalScale {
        let width = width.max(1);
        let scale = top.abs() / width as f64;
        HorizontalScale {
            scale: if scale > 0.0 && scale.is_finite() {
                scale
            } else {
                1.0
            },
            width,
        }
    }

    /// Bar for `value`, never longer than the scale width.
    pub fn get_bar(&self, value: f64, color: Color) -> Paint<String> {
        let units = (value.max(0.0) / self.scale)
            .round()
            .min(self.width as f64) as usize;
        color.paint(format!("{:∎<width$}", "", width = units))
    }
}

impl fmt::Display for HorizontalScale {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let f64fmt = F64Formatter::new_with_precision(formatter.precision(), 0.0..self.scale);
        writeln!(
            formatter,
            "Each {} represents a value of {}",
            BAR_CHAR,
            Blue.paint(f64fmt.format(self.scale)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yansi::Color::{Green, Red};

    #[test]
    fn test_basic_format() {
        assert_eq!(F64Formatter::new(0).format(1000.0), "1000");
        assert_eq!(F64Formatter::new(3).format(1000.0), "1000.000");
        assert_eq!(F64Formatter::new(1).format(12345.299), "12345.3");
    }

    #[test]
    fn test_human_format_from_zero() {
        assert_eq!(F64Formatter::new_with_range(0.0..2.0).format(1.12), "1.120");
        assert_eq!(
            F64Formatter::new_with_range(0.0..200.0).format(234.12),
            "234.12"
        );
        assert_eq!(
            F64Formatter::new_with_range(0.0..1000000.0).format(234000.1234),
            "234 K"
        );
        assert_eq!(
            F64Formatter::new_with_range(0.0..100000000.0).format(1234000.1234),
            "1.23 M"
        );
    }

    #[test]
    fn test_human_format_degenerate_ranges() {
        assert_eq!(F64Formatter::new_with_range(5.0..5.0).format(5.0), "5.000");
        assert_eq!(
            F64Formatter::new_with_range(0.0..f64::INFINITY).format(5.0),
            "5.000"
        );
        assert_eq!(
            F64Formatter::new_with_range(0.0..0.0002).format(0.0000043),
            "0.000004"
        );
    }

    #[test]
    fn test_precision_wins_over_range() {
        assert_eq!(
            F64Formatter::new_with_precision(Some(1), 0.0..1000000.0).format(2.24),
            "2.2"
        );
        assert_eq!(
            F64Formatter::new_with_precision(None, 0.0..1000000.0).format(2000.0),
            "2 K"
        );
    }

    #[test]
    fn test_column_scale() {
        let scale = ColumnScale::new(0.0..10.0, 11);
        assert_eq!(scale.position(0.0), 0);
        assert_eq!(scale.position(5.0), 5);
        assert_eq!(scale.position(10.0), 10);
        assert_eq!(scale.position(-3.0), 0);
        assert_eq!(scale.position(30.0), 10);
        assert_eq!(ColumnScale::new(2.0..2.0, 11).position(2.0), 0);
        assert_eq!(ColumnScale::new(0.0..1.0, 0).cells(), 1);
    }

    #[test]
    fn test_horizontal_scale() {
        Paint::disable();
        assert_eq!(
            format!("{:.1}", HorizontalScale::new(200.0, 100)),
            format!("Each {BAR_CHAR} represents a value of 2.0\n")
        );
    }

    #[test]
    fn test_horizontal_scale_with_zero_top() {
        let scale = HorizontalScale::new(0.0, 10);
        assert_eq!(scale.scale, 1.0);
    }

    #[test]
    fn test_horizontal_scale_bar() {
        let scale = HorizontalScale::new(100.0, 10);
        assert_eq!(
            scale.get_bar(80.0, Red),
            Red.paint(format!("{:∎<width$}", "", width = 8))
        );
        assert_eq!(scale.get_bar(-5.0, Green), Green.paint(String::new()));
    }

    #[test]
    fn test_horizontal_scale_bar_is_bounded() {
        let scale = HorizontalScale::new(100.0, 10);
        let full = Red.paint(format!("{:∎<width$}", "", width = 10));
        assert_eq!(scale.get_bar(500.0, Red), full);
        assert_eq!(scale.get_bar(f64::INFINITY, Red), full);
        assert_eq!(scale.get_bar(f64::NAN, Red), Red.paint(String::new()));
    }
}
