//! SmartFilter viewer crate root: re-exports and module wiring.
//!
//! Replays particulate-sensor logs from up to nine sensors on a shared
//! timeline. The crate is split into:
//! - `data`: sensor records, time series lookup, viewport, playback clock,
//!   axis ticks, color gradients, CSV import and the session model
//! - `persistence`: the settings document
//! - `config`: window and timeline configuration
//! - `cli`: command-line arguments of the binary
//! - `panels` / `app`: the egui front end and [`run_viewer`]

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;
pub mod persistence;

pub use app::{run_viewer, ViewerApp};
pub use cli::ViewerArgs;
pub use config::ViewerConfig;
pub use data::gradient::{ColorGradient, GradientKey, GradientStop};
pub use data::playback::{ClockState, PlaybackClock, PlaybackSample};
pub use data::sensor::{SensorField, SensorRecord};
pub use data::series::TimeSeries;
pub use data::session::{Session, SensorSlot, SENSOR_COUNT};
pub use data::state::ViewerState;
pub use data::ticks::TickInfo;
pub use data::viewport::Viewport;
pub use error::{Result, ViewerError};
