//! Top-level entry point for running the viewer as a native window.

use eframe::egui;

use crate::config::ViewerConfig;

use super::viewer_app::ViewerApp;

/// Launch the viewer in a native window.
///
/// Loads `cfg.settings_path` (if any) before the first frame, installs the
/// Phosphor icon font and enters the eframe event loop. Blocks until the
/// window is closed.
pub fn run_viewer(mut cfg: ViewerConfig) -> eframe::Result<()> {
    let app = ViewerApp::new(&cfg);

    let title = cfg.title.clone();
    let mut opts = cfg.native_options.take().unwrap_or_default();
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts.viewport.clone().with_inner_size(egui::vec2(1280.0, 800.0));
    }

    tracing::info!(title = %title, "starting viewer");
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
