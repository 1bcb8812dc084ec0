//! Sensor log import.
//!
//! Log layout:
//!   <free-form preamble lines>
//!   OADateTime;Bin00;Bin01;...;RollMean_PM10
//!   45231,5;0;12;...;3,4
//!
//! - Everything before the `OADateTime` header is ignored, the header too.
//! - `n. def.` in a data line reads as `0`.
//! - The delimiter is taken from the header: `;`, tab, else `,`. With a
//!   non-comma delimiter a decimal comma is accepted.
//! - Blank lines are skipped; columns past the last known field are ignored.

use std::path::Path;

use crate::data::sensor::{SensorRecord, FIELD_COUNT};
use crate::data::series::TimeSeries;
use crate::error::{Result, ViewerError};

pub const HEADER_MARKER: &str = "OADateTime";
pub const UNDEFINED_TOKEN: &str = "n. def.";

/// Column separator and decimal-separator convention of a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    pub delimiter: char,
    pub decimal_comma: bool,
}

impl CsvFormat {
    /// Guess the format from the header row.
    pub fn detect(header: &str) -> Self {
        let delimiter = if header.contains(';') {
            ';'
        } else if header.contains('\t') {
            '\t'
        } else {
            ','
        };
        Self {
            delimiter,
            decimal_comma: delimiter != ',',
        }
    }

    fn parse_number(&self, cell: &str) -> Option<f64> {
        let cell = cell.trim();
        if self.decimal_comma && cell.contains(',') {
            cell.replace(',', ".").parse().ok()
        } else {
            cell.parse().ok()
        }
    }
}

/// Read and parse a sensor log from disk.
pub fn load_sensor_file(path: impl AsRef<Path>) -> Result<TimeSeries> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
    let series = parse_sensor_log(&text).map_err(|e| match e {
        ViewerError::MissingHeader { .. } => ViewerError::MissingHeader {
            path: path.to_path_buf(),
        },
        other => other,
    })?;
    tracing::info!(path = %path.display(), records = series.len(), "loaded sensor log");
    Ok(series)
}

/// Parse the text of a sensor log. Line numbers in errors are 1-based.
pub fn parse_sensor_log(text: &str) -> Result<TimeSeries> {
    let mut lines = text.lines().enumerate();
    let format = lines
        .by_ref()
        .find(|(_, line)| line.trim_start().starts_with(HEADER_MARKER))
        .map(|(_, header)| CsvFormat::detect(header))
        .ok_or_else(|| ViewerError::MissingHeader {
            path: Default::default(),
        })?;

    let mut records = Vec::new();
    for (idx, raw) in lines {
        if raw.trim().is_empty() {
            continue;
        }
        records.push(parse_row(raw, idx + 1, format)?);
    }

    let series = TimeSeries::new(records);
    if !series.is_sorted() {
        tracing::warn!("sensor log timestamps are not ascending; lookups may be wrong");
    }
    Ok(series)
}

fn parse_row(raw: &str, line: usize, format: CsvFormat) -> Result<SensorRecord> {
    let row = raw.replace(UNDEFINED_TOKEN, "0");
    let cells: Vec<&str> = row.split(format.delimiter).collect();
    let expected = FIELD_COUNT + 1;
    if cells.len() < expected {
        return Err(ViewerError::ShortRow {
            line,
            expected,
            found: cells.len(),
        });
    }

    let number = |column: usize| {
        format
            .parse_number(cells[column])
            .ok_or_else(|| ViewerError::InvalidNumber {
                line,
                column: column + 1,
                value: cells[column].trim().to_string(),
            })
    };

    let oa_date = number(0)?;
    let mut values = [0.0; FIELD_COUNT];
    for (i, slot) in values.iter_mut().enumerate() {
        *slot = number(i + 1)?;
    }
    Ok(SensorRecord::new(oa_date, values))
}
