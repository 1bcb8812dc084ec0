//! Playback clock: the "current time" cursor shared by all sensors.
//!
//! The clock never reads the system time itself; callers pass `Instant`s into
//! [`PlaybackClock::advance`] / [`PlaybackClock::tick`].

use std::ops::RangeInclusive;
use std::time::Instant;

use chrono::{NaiveDateTime, TimeDelta};

use crate::data::sensor::SensorField;
use crate::data::series::TimeSeries;

/// Records inspected past the cursor by the auto-slowdown rule.
pub const SLOWDOWN_LOOKAHEAD: usize = 5;

/// Fraction of the observed maximum that counts as a spike.
pub const SLOWDOWN_THRESHOLD: f64 = 0.4;

/// Range of the playback speed slider.
pub const PLAYBACK_FACTOR_RANGE: RangeInclusive<f64> = 0.1..=10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Paused,
    Playing,
    /// User is dragging the scrub bar; overrides paused/playing.
    Scrubbing,
}

/// Cursor position of one series after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSample {
    pub lerp_index: f64,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    current_time: NaiveDateTime,
    last_tick: Option<Instant>,
    playback_factor: f64,
    paused: bool,
    scrubbing: bool,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self {
            current_time: NaiveDateTime::default(),
            last_tick: None,
            playback_factor: 1.0,
            paused: true,
            scrubbing: false,
        }
    }
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ClockState {
        if self.scrubbing {
            ClockState::Scrubbing
        } else if self.paused {
            ClockState::Paused
        } else {
            ClockState::Playing
        }
    }

    pub fn current_time(&self) -> NaiveDateTime {
        self.current_time
    }

    pub fn playback_factor(&self) -> f64 {
        self.playback_factor
    }

    pub fn set_playback_factor(&mut self, factor: f64) {
        if factor.is_finite() {
            self.playback_factor = factor.clamp(*PLAYBACK_FACTOR_RANGE.start(), *PLAYBACK_FACTOR_RANGE.end());
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    pub fn start(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Pause and rewind to `series_start`. The next `advance` starts a fresh
    /// tick baseline.
    pub fn stop(&mut self, series_start: NaiveDateTime) {
        self.paused = true;
        self.current_time = series_start;
        self.resync();
    }

    /// Forget the previous tick so the next `advance` only records its
    /// timestamp. Used after the UI was blocked (file dialogs, loading).
    pub fn resync(&mut self) {
        self.last_tick = None;
    }

    pub fn begin_scrub(&mut self) {
        self.scrubbing = true;
    }

    pub fn end_scrub(&mut self) {
        self.scrubbing = false;
    }

    pub fn jump_to(&mut self, time: NaiveDateTime) {
        self.current_time = time;
    }

    /// Move the cursor by the wall-clock time since the previous call, scaled
    /// by the playback factor. The tick timestamp is recorded even while
    /// paused or scrubbing so resuming does not jump.
    pub fn advance(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            if !self.paused && !self.scrubbing {
                let elapsed = now.saturating_duration_since(last).as_secs_f64();
                let micros = (elapsed * self.playback_factor * 1e6).round() as i64;
                if let Some(t) = self.current_time.checked_add_signed(TimeDelta::microseconds(micros)) {
                    self.current_time = t;
                }
            }
        }
        self.last_tick = Some(now);
    }

    /// Advance, then evaluate every series at the new cursor and apply the
    /// auto-slowdown rule: if a value above `0.4 * observed_max` lies within
    /// the next few records, the playback factor is capped at 1.
    pub fn tick<'a>(
        &mut self,
        now: Instant,
        series: impl IntoIterator<Item = &'a TimeSeries>,
        field: SensorField,
        observed_max: f64,
    ) -> Vec<PlaybackSample> {
        self.advance(now);
        let threshold = SLOWDOWN_THRESHOLD * observed_max;
        let mut samples = Vec::new();
        for s in series.into_iter().filter(|s| !s.is_empty()) {
            let lerp_index = s.find_lerp_index(self.current_time);
            let value = s.get_lerp_value(lerp_index, field);
            if self.playback_factor > 1.0 && s.any_above(lerp_index, field, threshold, SLOWDOWN_LOOKAHEAD) {
                tracing::debug!(factor = self.playback_factor, "spike ahead, slowing playback");
                self.playback_factor = self.playback_factor.min(1.0);
            }
            samples.push(PlaybackSample { lerp_index, value });
        }
        samples
    }
}
