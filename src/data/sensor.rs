//! Sensor record layout: the closed set of numeric fields a log row carries.
//!
//! Every data row of a sensor log holds an OLE-Automation timestamp followed by
//! the fields below, in declaration order. [`SensorField`] is the only way to
//! address a value; it doubles as the column index into [`SensorRecord::values`].

use chrono::NaiveDateTime;

use crate::data::oadate;
use crate::error::{Result, ViewerError};

/// Number of numeric columns following the timestamp.
pub const FIELD_COUNT: usize = 45;

/// Number of particle-size histogram bins (`Bin00..Bin23`).
pub const BIN_COUNT: usize = 24;

/// A numeric column of a sensor log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorField {
    Bin00,
    Bin01,
    Bin02,
    Bin03,
    Bin04,
    Bin05,
    Bin06,
    Bin07,
    Bin08,
    Bin09,
    Bin10,
    Bin11,
    Bin12,
    Bin13,
    Bin14,
    Bin15,
    Bin16,
    Bin17,
    Bin18,
    Bin19,
    Bin20,
    Bin21,
    Bin22,
    Bin23,
    MeanToFBin1Us,
    MeanToFBin3Us,
    MeanToFBin5Us,
    MeanToFBin7Us,
    CountPerSecond,
    SamplingPeriodS,
    SampleFlowRateMlS,
    TemperatureC,
    RelativeHumidityPercent,
    RejectGlitch,
    RejectLongTof,
    RejectRatio,
    RejectOutOfRange,
    FanRevCount,
    LaserStatus,
    Pm1,
    Pm2_5,
    Pm10,
    RollMeanPm1,
    RollMeanPm2_5,
    RollMeanPm10,
}

/// (display name, identifier) per field, indexed by column.
const NAMES: [(&str, &str); FIELD_COUNT] = [
    ("Bin00", "Bin00"),
    ("Bin01", "Bin01"),
    ("Bin02", "Bin02"),
    ("Bin03", "Bin03"),
    ("Bin04", "Bin04"),
    ("Bin05", "Bin05"),
    ("Bin06", "Bin06"),
    ("Bin07", "Bin07"),
    ("Bin08", "Bin08"),
    ("Bin09", "Bin09"),
    ("Bin10", "Bin10"),
    ("Bin11", "Bin11"),
    ("Bin12", "Bin12"),
    ("Bin13", "Bin13"),
    ("Bin14", "Bin14"),
    ("Bin15", "Bin15"),
    ("Bin16", "Bin16"),
    ("Bin17", "Bin17"),
    ("Bin18", "Bin18"),
    ("Bin19", "Bin19"),
    ("Bin20", "Bin20"),
    ("Bin21", "Bin21"),
    ("Bin22", "Bin22"),
    ("Bin23", "Bin23"),
    ("MeanToFBin1(us)", "MeanToFBin1_us"),
    ("MeanToFBin3(us)", "MeanToFBin3_us"),
    ("MeanToFBin5(us)", "MeanToFBin5_us"),
    ("MeanToFBin7(us)", "MeanToFBin7_us"),
    ("Count/s", "Count_s"),
    ("SamplingPeriod(s)", "SamplingPeriod_s"),
    ("SFR(ml/s)", "SFR_ml_s"),
    ("Temperature(C)", "Temperature_C"),
    ("RelativeHumidity(%)", "RelativeHumidity_percent"),
    ("#RejectGlitch", "RejectGlitch"),
    ("#RejectLongTOF", "RejectLongTOF"),
    ("#RejectRatio", "RejectRatio"),
    ("#RejectOutOfRange", "RejectOutOfRange"),
    ("FanRevCount", "FanRevCount"),
    ("LaserStatus", "LaserStatus"),
    ("PM1(ug/m3)", "PM1_ug_m3"),
    ("PM2,5(ug/m3)", "PM2_5_ug_m3"),
    ("PM10(ug/m3)", "PM10_ug_m3"),
    ("RollMean_PM1", "RollMean_PM1"),
    ("RollMean_PM2,5", "RollMean_PM2_5"),
    ("RollMean_PM10", "RollMean_PM10"),
];

impl SensorField {
    /// All fields in column order.
    pub const ALL: [SensorField; FIELD_COUNT] = [
        SensorField::Bin00,
        SensorField::Bin01,
        SensorField::Bin02,
        SensorField::Bin03,
        SensorField::Bin04,
        SensorField::Bin05,
        SensorField::Bin06,
        SensorField::Bin07,
        SensorField::Bin08,
        SensorField::Bin09,
        SensorField::Bin10,
        SensorField::Bin11,
        SensorField::Bin12,
        SensorField::Bin13,
        SensorField::Bin14,
        SensorField::Bin15,
        SensorField::Bin16,
        SensorField::Bin17,
        SensorField::Bin18,
        SensorField::Bin19,
        SensorField::Bin20,
        SensorField::Bin21,
        SensorField::Bin22,
        SensorField::Bin23,
        SensorField::MeanToFBin1Us,
        SensorField::MeanToFBin3Us,
        SensorField::MeanToFBin5Us,
        SensorField::MeanToFBin7Us,
        SensorField::CountPerSecond,
        SensorField::SamplingPeriodS,
        SensorField::SampleFlowRateMlS,
        SensorField::TemperatureC,
        SensorField::RelativeHumidityPercent,
        SensorField::RejectGlitch,
        SensorField::RejectLongTof,
        SensorField::RejectRatio,
        SensorField::RejectOutOfRange,
        SensorField::FanRevCount,
        SensorField::LaserStatus,
        SensorField::Pm1,
        SensorField::Pm2_5,
        SensorField::Pm10,
        SensorField::RollMeanPm1,
        SensorField::RollMeanPm2_5,
        SensorField::RollMeanPm10,
    ];

    /// The histogram bins, smallest particle size first.
    pub fn bins() -> &'static [SensorField] {
        &Self::ALL[..BIN_COUNT]
    }

    /// Column index into [`SensorRecord::values`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown in the field selector, as printed in the log header.
    pub fn display_name(self) -> &'static str {
        NAMES[self.index()].0
    }

    /// Stable identifier used in settings files.
    pub fn ident(self) -> &'static str {
        NAMES[self.index()].1
    }

    pub fn is_bin(self) -> bool {
        self.index() < BIN_COUNT
    }

    /// Look a field up by identifier or display name.
    pub fn from_name(name: &str) -> Result<SensorField> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.ident() == name || f.display_name() == name)
            .ok_or_else(|| ViewerError::UnknownField(name.to_string()))
    }
}

impl Default for SensorField {
    fn default() -> Self {
        SensorField::Pm2_5
    }
}

impl std::fmt::Display for SensorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One parsed data row. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    oa_date: f64,
    timestamp: NaiveDateTime,
    values: [f64; FIELD_COUNT],
}

impl SensorRecord {
    pub fn new(oa_date: f64, values: [f64; FIELD_COUNT]) -> Self {
        Self {
            oa_date,
            timestamp: oadate::to_datetime(oa_date),
            values,
        }
    }

    pub fn from_timestamp(timestamp: NaiveDateTime, values: [f64; FIELD_COUNT]) -> Self {
        Self::new(oadate::from_datetime(timestamp), values)
    }

    /// Raw OLE-Automation date the row was stamped with.
    pub fn oa_date(&self) -> f64 {
        self.oa_date
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    #[inline]
    pub fn value(&self, field: SensorField) -> f64 {
        self.values[field.index()]
    }

    pub fn values(&self) -> &[f64; FIELD_COUNT] {
        &self.values
    }
}
