use csv::{ReaderBuilder, StringRecord, Trim};

use crate::read::{open_file, ReadError, SeriesRow};
use crate::stats::Observation;

/// Reads delimited tables whose first row is a header, picking columns by
/// header name.
#[derive(Debug, Builder)]
pub struct TableReader {
    /// Field separator.
    #[builder(default = "b','")]
    delimiter: u8,
    /// Strip whitespace around headers and cells.
    #[builder(default = "true")]
    trim: bool,
}

impl Default for TableReader {
    fn default() -> Self {
        TableReader {
            delimiter: b',',
            trim: true,
        }
    }
}

impl TableReader {
    /// Reads one `Observation` per row, labeled with the `category` column
    /// and carrying the number in the `value` column.
    pub fn read_observations(
        &self,
        path: &str,
        category: &str,
        value: &str,
    ) -> Result<Vec<Observation>, ReadError> {
        self.read_columns(path, &[category, value])?
            .into_iter()
            .map(|(line, cells)| {
                Ok(Observation {
                    value: parse_value(line, value, &cells[1])?,
                    category: cells.into_iter().next().unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Reads one `SeriesRow` per row, for charts that split every group in
    /// several series.
    pub fn read_series(
        &self,
        path: &str,
        group: &str,
        series: &str,
        value: &str,
    ) -> Result<Vec<SeriesRow>, ReadError> {
        self.read_columns(path, &[group, series, value])?
            .into_iter()
            .map(|(line, cells)| {
                let value = parse_value(line, value, &cells[2])?;
                let mut cells = cells.into_iter();
                Ok(SeriesRow {
                    group: cells.next().unwrap_or_default(),
                    series: cells.next().unwrap_or_default(),
                    value,
                })
            })
            .collect()
    }

    /// Returns the line number and the requested cells of every data row.
    fn read_columns(
        &self,
        path: &str,
        columns: &[&str],
    ) -> Result<Vec<(u64, Vec<String>)>, ReadError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(open_file(path)?);
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            debug!("No header found in {}", path);
            return Ok(Vec::new());
        }
        let indices = columns
            .iter()
            .map(|name| column_index(&headers, name))
            .collect::<Result<Vec<usize>, ReadError>>()?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let cells = indices
                .iter()
                .map(|i| record.get(*i).unwrap_or_default().to_string())
                .collect();
            rows.push((line, cells));
        }
        debug!("Read {} rows from {}", rows.len(), path);
        Ok(rows)
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, ReadError> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| ReadError::MissingColumn(name.to_string()))
}

/// Non-finite spellings ("NaN", "inf") parse fine here; they are refused
/// later by the computations that need finite numbers.
fn parse_value(line: u64, column: &str, cell: &str) -> Result<f64, ReadError> {
    cell.parse::<f64>().map_err(|parse_error| {
        debug!("Cannot parse float ({}) at '{}'", parse_error, cell);
        ReadError::InvalidNumber {
            line,
            column: column.to_string(),
            value: cell.to_string(),
        }
    })
}
