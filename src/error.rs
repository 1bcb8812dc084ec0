//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: no header row starting with \"OADateTime\" found")]
    MissingHeader { path: PathBuf },
    #[error("line {line}: expected {expected} columns, found {found}")]
    ShortRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column {column}: cannot parse {value:?} as a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },
    #[error("invalid gradient key {0:?} (expected a number or a percentage like \"50%\")")]
    InvalidGradientKey(String),
    #[error("invalid color {0:?} (expected #RRGGBB or #AARRGGBB)")]
    InvalidColor(String),
    #[error("settings: {0}")]
    SettingsParse(#[from] serde_yaml::Error),
    #[error("settings: {0}")]
    SettingsWrite(#[from] serde_json::Error),
    #[error("unknown sensor field {0:?}")]
    UnknownField(String),
    #[error("sensor index {index} out of range (0..{count})")]
    SensorIndexOutOfRange { index: usize, count: usize },
    #[error("zoom range [{left}, {right}] is too narrow")]
    DegenerateZoomRange { left: f64, right: f64 },
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViewerError::Io {
            path: path.into(),
            source,
        }
    }
}
