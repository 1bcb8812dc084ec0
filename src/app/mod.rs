mod run;
mod viewer_app;

pub use run::run_viewer;
pub use viewer_app::ViewerApp;
