//! Axis tick generation for the value axis and the timeline.
//!
//! Ticks carry a position in `[0, 1]` along the axis and a ready-made label;
//! the axis strip only has to place them.

use chrono::TimeDelta;

/// A single axis annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct TickInfo {
    /// Position along the axis, `0` = start, `1` = end.
    pub pos: f64,
    pub label: String,
}

impl TickInfo {
    pub fn new(pos: f64, label: impl Into<String>) -> Self {
        Self {
            pos,
            label: label.into(),
        }
    }
}

/// How many ticks fit on an axis of `length` pixels with at least
/// `min_spacing` pixels between them.
pub fn max_tick_count_for_length(length: f64, min_spacing: f64) -> usize {
    if !length.is_finite() || !min_spacing.is_finite() || length <= 0.0 || min_spacing <= 0.0 {
        return 1;
    }
    (length / min_spacing).floor() as usize + 1
}

/// Ticks for a value axis running from `0` to `max_value`.
///
/// Spacing is the naive spacing rounded up to a multiple of 100. The last
/// regular tick is dropped when it would crowd the final tick, which is always
/// placed at `1` and labelled with the exact maximum.
pub fn generate_value_ticks(max_value: f64, max_tick_count: usize) -> Vec<TickInfo> {
    let mut ticks = vec![TickInfo::new(0.0, "0")];
    if !max_value.is_finite() || max_value <= 0.0 {
        return ticks;
    }
    let count = max_tick_count.max(1) as f64;
    let spacing = ((max_value / count) / 100.0).ceil() * 100.0;

    let mut value = spacing;
    while value < max_value - spacing / 2.0 {
        ticks.push(TickInfo::new(value / max_value, format_value(value)));
        value += spacing;
    }
    ticks.push(TickInfo::new(1.0, format_value(max_value)));
    ticks
}

/// Ticks for a time axis showing `[range_start, range_end]` (fractions) of a
/// recording `total` long.
///
/// A single tick is placed at the end and shows the total duration.
pub fn generate_time_ticks(
    total: TimeDelta,
    max_tick_count: usize,
    range_start: f64,
    range_end: f64,
) -> Vec<TickInfo> {
    let count = max_tick_count.max(1);
    if count == 1 {
        return vec![TickInfo::new(1.0, format_signed_hms(total))];
    }
    let total_ms = total.num_milliseconds() as f64;
    (0..count)
        .map(|i| {
            let pos = i as f64 / (count - 1) as f64;
            let fraction = range_start + pos * (range_end - range_start);
            let at = TimeDelta::milliseconds((total_ms * fraction).round() as i64);
            TickInfo::new(pos, format_signed_hms(at))
        })
        .collect()
}

/// `hh:mm:ss`, prefixed with `-` for negative durations. Hours wrap at 24
/// like a clock-style time-span readout.
pub fn format_signed_hms(duration: TimeDelta) -> String {
    let sign = if duration < TimeDelta::zero() { "-" } else { "" };
    let secs = duration.num_seconds().unsigned_abs();
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
