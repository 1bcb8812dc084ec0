//! Command-line arguments of the `smartfilter-viewer` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ViewerConfig;

#[derive(Debug, Parser)]
#[command(
    name = "smartfilter-viewer",
    version,
    about = "Replay particulate-sensor logs on a shared timeline"
)]
pub struct ViewerArgs {
    /// Settings file to load on startup (sensor files, colors, gradient, field)
    pub settings: Option<PathBuf>,
}

impl ViewerArgs {
    pub fn into_config(self) -> ViewerConfig {
        ViewerConfig {
            settings_path: self.settings,
            ..Default::default()
        }
    }
}
