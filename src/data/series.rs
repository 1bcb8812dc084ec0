//! TimeSeries: the sorted, read-only record list of one sensor log.
//!
//! Lookups work in "lerp index" space: a fractional record index whose integer
//! part is the earlier neighbour and whose fractional part is the elapsed-time
//! ratio toward the later neighbour.

use std::ops::RangeInclusive;

use chrono::{NaiveDateTime, TimeDelta};

use crate::data::sensor::{SensorField, SensorRecord};

/// Records sorted ascending by timestamp.
///
/// Sortedness is a precondition of [`find_lerp_index`](Self::find_lerp_index);
/// it is not enforced. Use [`is_sorted`](Self::is_sorted) to check input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    records: Vec<SensorRecord>,
}

impl TimeSeries {
    pub fn new(records: Vec<SensorRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SensorRecord> {
        self.records.get(index)
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.records.first().map(SensorRecord::timestamp)
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.records.last().map(SensorRecord::timestamp)
    }

    /// `true` when timestamps never decrease.
    pub fn is_sorted(&self) -> bool {
        self.records
            .windows(2)
            .all(|w| w[0].timestamp() <= w[1].timestamp())
    }

    /// Largest value of `field` over the whole series.
    pub fn max_value(&self, field: SensorField) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.value(field))
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Largest value over all histogram bins of all records.
    pub fn max_bin_value(&self) -> Option<f64> {
        SensorField::bins()
            .iter()
            .filter_map(|&bin| self.max_value(bin))
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Map a timestamp to a fractional record index.
    ///
    /// Exact timestamp matches return the integer index. Between two records
    /// the result is `i + (time - t[i]) / (t[i+1] - t[i])`. Queries before
    /// the first record return `0`, after the last `len - 1`.
    pub fn find_lerp_index(&self, time: NaiveDateTime) -> f64 {
        let count = self.records.len() as i64;
        let mut start: i64 = 0;
        let mut end: i64 = count - 1;

        while start <= end {
            let probe = end - (end - start) / 2;
            let probe_time = self.records[probe as usize].timestamp();
            if time < probe_time {
                end = probe - 1;
            } else if time > probe_time {
                start = probe + 1;
            } else {
                return probe as f64;
            }
        }

        if end < 0 {
            return 0.0;
        }
        if start >= count {
            return (count - 1) as f64;
        }

        let time1 = self.records[end as usize].timestamp();
        let time2 = self.records[start as usize].timestamp();
        let factor = millis(time - time1) / millis(time2 - time1);
        end as f64 + factor
    }

    /// Linearly interpolate `field` at a fractional index.
    ///
    /// Integer indices return the stored value untouched. The index must lie
    /// in `[0, len - 1]`; clamp it through [`find_lerp_index`](Self::find_lerp_index).
    pub fn get_lerp_value(&self, index: f64, field: SensorField) -> f64 {
        let idx1 = index.floor() as usize;
        let idx2 = index.ceil() as usize;

        if idx1 == idx2 {
            return self.records[idx1].value(field);
        }
        let val1 = self.records[idx1].value(field);
        let val2 = self.records[idx2].value(field);
        val1 + (val2 - val1) * (index - idx1 as f64)
    }

    /// Interpolated value of `field` at `time`, `None` for an empty series.
    pub fn value_at(&self, time: NaiveDateTime, field: SensorField) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.get_lerp_value(self.find_lerp_index(time), field))
    }

    /// Indices of the records needed to draw `[from, to]`, including the
    /// neighbours just outside so lines reach the edges.
    pub fn index_range(&self, from: NaiveDateTime, to: NaiveDateTime) -> Option<RangeInclusive<usize>> {
        if self.is_empty() {
            return None;
        }
        let last = self.records.len() - 1;
        let start = self.find_lerp_index(from).floor().max(0.0) as usize;
        let end = (self.find_lerp_index(to).ceil().max(0.0) as usize).min(last);
        Some(start.min(end)..=end)
    }

    /// `true` if any of the `window + 1` records starting at `floor(index)`
    /// has `field` above `threshold`.
    pub fn any_above(&self, index: f64, field: SensorField, threshold: f64, window: usize) -> bool {
        let first = index.floor().max(0.0) as usize;
        self.records
            .iter()
            .skip(first)
            .take(window + 1)
            .any(|r| r.value(field) > threshold)
    }
}

impl From<Vec<SensorRecord>> for TimeSeries {
    fn from(records: Vec<SensorRecord>) -> Self {
        Self::new(records)
    }
}

/// Fractional milliseconds of a time delta.
pub(crate) fn millis(delta: TimeDelta) -> f64 {
    delta
        .num_microseconds()
        .map(|us| us as f64 / 1_000.0)
        .unwrap_or_else(|| delta.num_milliseconds() as f64)
}
