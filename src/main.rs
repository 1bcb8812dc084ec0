use clap::Parser;
use smartfilter_viewer::{run_viewer, ViewerArgs};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let args = ViewerArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run_viewer(args.into_config())
}
