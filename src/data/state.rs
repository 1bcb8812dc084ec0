//! ViewerState: everything the panels read and mutate during a frame.
//!
//! The app owns one `ViewerState`; panels receive `&mut ViewerState` and
//! route user actions through the methods below, so the same actions can be
//! driven from tests without a window.

use std::path::Path;
use std::time::Instant;

use crate::data::playback::{ClockState, PlaybackClock};
use crate::data::session::Session;
use crate::data::viewport::Viewport;
use crate::error::{Result, ViewerError};
use crate::persistence::{load_settings_from_path, save_settings_to_path, SettingsSerde};

#[derive(Debug, Default)]
pub struct ViewerState {
    pub session: Session,
    pub clock: PlaybackClock,
    pub viewport: Viewport,
    /// Error shown in the modal dialog until dismissed.
    pub pending_error: Option<String>,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for the error dialog.
    pub fn report(&mut self, err: ViewerError) {
        tracing::error!("{err}");
        self.pending_error = Some(err.to_string());
    }

    /// Run `f`, reporting its error instead of returning it.
    pub fn report_on_error(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) {
        if let Err(e) = f(self) {
            self.report(e);
        }
    }

    /// Load a file into slot `index` and restart playback from the start of
    /// the session.
    pub fn load_sensor(&mut self, index: usize, path: &Path) -> Result<()> {
        self.session.load_sensor(index, path)?;
        self.restart();
        Ok(())
    }

    pub fn load_settings(&mut self, path: &Path) -> Result<()> {
        let settings = load_settings_from_path(path)?;
        let result = settings.apply_to(&mut self.session);
        if self.session.has_data() {
            self.restart();
        }
        result
    }

    pub fn save_settings(&self, path: &Path) -> Result<()> {
        save_settings_to_path(&SettingsSerde::capture(&self.session), path)
    }

    /// Rewind to the session start and play. The wall-clock time spent
    /// loading is not added to the cursor.
    fn restart(&mut self) {
        if let Some(start) = self.session.data_start() {
            self.clock.stop(start);
            self.clock.start();
        }
        self.clock.resync();
    }

    pub fn toggle_play(&mut self) {
        match self.clock.state() {
            ClockState::Playing => self.clock.pause(),
            ClockState::Paused => self.clock.start(),
            ClockState::Scrubbing => {}
        }
    }

    /// Pause and rewind to the session start.
    pub fn stop(&mut self) {
        if let Some(start) = self.session.data_start() {
            self.clock.stop(start);
        } else {
            self.clock.pause();
        }
    }

    /// Move the cursor to a fraction of the session range.
    pub fn jump_to_fraction(&mut self, fraction: f64) {
        if let Some(time) = self.session.time_at_fraction(fraction) {
            self.clock.jump_to(time);
        }
    }

    /// One clock tick; called once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.session.tick(&mut self.clock, now);
    }
}
