//! Configuration for the viewer window.

use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use crate::data::playback::PLAYBACK_FACTOR_RANGE;

/// Top-level configuration consumed by [`crate::run_viewer`].
#[derive(Clone)]
pub struct ViewerConfig {
    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    // ── Playback ─────────────────────────────────────────────────────────────
    /// Redraw / clock tick cadence.
    pub tick_interval: Duration,
    /// Playback factor on startup.
    pub initial_playback_factor: f64,
    /// Range of the speed slider.
    pub playback_factor_range: RangeInclusive<f64>,

    // ── Timeline ─────────────────────────────────────────────────────────────
    /// Minimum pixel distance between axis labels.
    pub min_tick_spacing: f32,
    /// Drags shorter than this (pixels) count as a click-to-jump.
    pub min_drag_distance: f32,

    // ── Startup ──────────────────────────────────────────────────────────────
    /// Settings document loaded before the first frame.
    pub settings_path: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "SmartFilter Viewer".to_string(),
            native_options: None,

            tick_interval: Duration::from_millis(20),
            initial_playback_factor: 1.0,
            playback_factor_range: PLAYBACK_FACTOR_RANGE,

            min_tick_spacing: 100.0,
            min_drag_distance: 5.0,

            settings_path: None,
        }
    }
}
