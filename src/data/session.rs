//! Session: the nine sensor slots plus the state they share.
//!
//! Slots are addressed by their stable index `0..SENSOR_COUNT`; the UI maps
//! each indicator, graph line and histogram window to a slot through that
//! index only.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{NaiveDateTime, TimeDelta};
use egui::Color32;

use crate::data::gradient::{default_sensor_color, ColorGradient};
use crate::data::import;
use crate::data::playback::{PlaybackClock, PlaybackSample};
use crate::data::sensor::SensorField;
use crate::data::series::{millis, TimeSeries};
use crate::data::ticks::format_signed_hms;
use crate::data::viewport::Viewport;
use crate::error::{Result, ViewerError};

pub const SENSOR_COUNT: usize = 9;

#[derive(Debug, Clone)]
pub struct SensorSlot {
    index: usize,
    file_name: Option<PathBuf>,
    color: Color32,
    series: Option<TimeSeries>,
    bin_max: f64,
    sample: Option<PlaybackSample>,
    /// Histogram window visibility.
    pub histogram_open: bool,
}

impl SensorSlot {
    fn new(index: usize) -> Self {
        Self {
            index,
            file_name: None,
            color: default_sensor_color(index),
            series: None,
            bin_max: 0.0,
            sample: None,
            histogram_open: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn series(&self) -> Option<&TimeSeries> {
        self.series.as_ref()
    }

    /// Loaded and non-empty.
    pub fn has_data(&self) -> bool {
        self.series.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Cursor position evaluated by the last tick.
    pub fn sample(&self) -> Option<PlaybackSample> {
        self.sample
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    slots: Vec<SensorSlot>,
    field: SensorField,
    gradient: ColorGradient,
    data_start: Option<NaiveDateTime>,
    data_end: Option<NaiveDateTime>,
    max_value: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            slots: (0..SENSOR_COUNT).map(SensorSlot::new).collect(),
            field: SensorField::default(),
            gradient: ColorGradient::default(),
            data_start: None,
            data_end: None,
            max_value: 0.0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[SensorSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Result<&SensorSlot> {
        self.slots.get(index).ok_or(ViewerError::SensorIndexOutOfRange {
            index,
            count: SENSOR_COUNT,
        })
    }

    pub fn slot_mut(&mut self, index: usize) -> Result<&mut SensorSlot> {
        self.slots.get_mut(index).ok_or(ViewerError::SensorIndexOutOfRange {
            index,
            count: SENSOR_COUNT,
        })
    }

    /// Slots with a non-empty series, in index order.
    pub fn loaded_slots(&self) -> impl Iterator<Item = &SensorSlot> {
        self.slots.iter().filter(|s| s.has_data())
    }

    pub fn has_data(&self) -> bool {
        self.loaded_slots().next().is_some()
    }

    /// Load a log file into slot `index`, replacing what was there.
    pub fn load_sensor(&mut self, index: usize, path: impl AsRef<Path>) -> Result<()> {
        self.slot(index)?;
        let path = path.as_ref();
        let series = import::load_sensor_file(path)?;
        self.set_series(index, series, Some(path.to_path_buf()))
    }

    /// Install an already parsed series into slot `index`.
    pub fn set_series(&mut self, index: usize, series: TimeSeries, file_name: Option<PathBuf>) -> Result<()> {
        let slot = self.slot_mut(index)?;
        slot.bin_max = series.max_bin_value().unwrap_or(0.0);
        slot.series = Some(series);
        slot.file_name = file_name;
        slot.sample = None;
        self.recompute_range();
        self.recompute_max();
        Ok(())
    }

    pub fn set_color(&mut self, index: usize, color: Color32) -> Result<()> {
        self.slot_mut(index)?.color = color;
        Ok(())
    }

    pub fn field(&self) -> SensorField {
        self.field
    }

    pub fn select_field(&mut self, field: SensorField) {
        if self.field != field {
            tracing::debug!(field = field.ident(), "selected field");
        }
        self.field = field;
        self.recompute_max();
    }

    pub fn gradient(&self) -> &ColorGradient {
        &self.gradient
    }

    pub fn set_gradient(&mut self, gradient: ColorGradient) {
        self.gradient = gradient;
    }

    /// Maximum of the selected field across all loaded sensors.
    pub fn observed_max(&self) -> f64 {
        self.max_value
    }

    pub fn data_start(&self) -> Option<NaiveDateTime> {
        self.data_start
    }

    pub fn data_end(&self) -> Option<NaiveDateTime> {
        self.data_end
    }

    /// Time span covered by all loaded sensors.
    pub fn duration(&self) -> TimeDelta {
        match (self.data_start, self.data_end) {
            (Some(start), Some(end)) => end - start,
            _ => TimeDelta::zero(),
        }
    }

    fn duration_millis(&self) -> f64 {
        millis(self.duration())
    }

    /// Timestamp at a fraction of the session range.
    pub fn time_at_fraction(&self, fraction: f64) -> Option<NaiveDateTime> {
        let start = self.data_start?;
        let offset = self.duration_millis() * fraction;
        if !offset.is_finite() {
            return None;
        }
        start.checked_add_signed(TimeDelta::microseconds((offset * 1_000.0).round() as i64))
    }

    /// Fraction of the session range at `time`. Not clamped; `NaN` when
    /// nothing is loaded.
    pub fn fraction_at_time(&self, time: NaiveDateTime) -> f64 {
        match self.data_start {
            Some(start) => millis(time - start) / self.duration_millis(),
            None => f64::NAN,
        }
    }

    /// Advance the clock and evaluate every loaded sensor at the new cursor.
    pub fn tick(&mut self, clock: &mut PlaybackClock, now: Instant) {
        let field = self.field;
        let max = self.max_value;
        let samples = clock.tick(
            now,
            self.slots.iter().filter_map(|s| s.series.as_ref()),
            field,
            max,
        );
        let mut samples = samples.into_iter();
        for slot in self.slots.iter_mut().filter(|s| s.has_data()) {
            slot.sample = samples.next();
        }
    }

    /// Indicator color of a slot at the current cursor, `None` before the
    /// first tick or without data.
    pub fn indicator_color(&self, index: usize) -> Option<Color32> {
        let sample = self.slots.get(index)?.sample?;
        Some(self.gradient.indicator_color(sample.value, self.max_value))
    }

    /// Histogram bar heights in `[0, 1]` at the current cursor, normalized to
    /// the slot's largest bin value.
    pub fn histogram_bars(&self, index: usize) -> Option<Vec<f64>> {
        let slot = self.slots.get(index)?;
        let series = slot.series.as_ref().filter(|s| !s.is_empty())?;
        if slot.bin_max == 0.0 {
            return None;
        }
        let idx = slot.sample.map(|s| s.lerp_index).unwrap_or(0.0);
        Some(
            SensorField::bins()
                .iter()
                .map(|&bin| series.get_lerp_value(idx, bin) / slot.bin_max)
                .collect(),
        )
    }

    /// Pixel coordinates of slot `index`'s visible records inside a
    /// `width` × `height` graph. Non-finite points are skipped.
    pub fn graph_points(&self, index: usize, viewport: &Viewport, width: f64, height: f64) -> Vec<[f64; 2]> {
        let (Some(slot), Some(start)) = (self.slots.get(index), self.data_start) else {
            return Vec::new();
        };
        let Some(series) = slot.series.as_ref() else {
            return Vec::new();
        };
        let (view_start, view_end) = viewport.visible_range();
        let (Some(from), Some(to)) = (self.time_at_fraction(view_start), self.time_at_fraction(view_end)) else {
            return Vec::new();
        };
        let Some(range) = series.index_range(from, to) else {
            return Vec::new();
        };
        let total = self.duration_millis();
        series.records()[range]
            .iter()
            .filter_map(|r| {
                let x_fraction = millis(r.timestamp() - start) / total;
                let y_fraction = 1.0 - r.value(self.field) / self.max_value;
                let x = viewport.to_viewport_x(x_fraction, width);
                let y = y_fraction * height;
                (x.is_finite() && y.is_finite()).then_some([x, y])
            })
            .collect()
    }

    /// Progress of the cursor through the session, `None` without data.
    pub fn progress(&self, clock: &PlaybackClock) -> Option<f64> {
        let p = self.fraction_at_time(clock.current_time());
        p.is_finite().then_some(p)
    }

    /// Signed `hh:mm:ss` of the cursor relative to the session start.
    pub fn timestamp_label(&self, clock: &PlaybackClock) -> String {
        match self.data_start {
            Some(start) => format_signed_hms(clock.current_time() - start),
            None => format_signed_hms(TimeDelta::zero()),
        }
    }

    fn recompute_range(&mut self) {
        self.data_start = self.loaded_slots().filter_map(|s| s.series.as_ref()?.start_time()).min();
        self.data_end = self.loaded_slots().filter_map(|s| s.series.as_ref()?.end_time()).max();
    }

    fn recompute_max(&mut self) {
        let field = self.field;
        if let Some(max) = self
            .loaded_slots()
            .filter_map(|s| s.series.as_ref()?.max_value(field))
            .reduce(f64::max)
        {
            self.max_value = max;
        }
    }
}
