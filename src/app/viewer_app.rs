//! Standalone application wrapper for the viewer.
//!
//! [`ViewerApp`] owns the [`ViewerState`] and the panels and implements
//! [`eframe::App`]. Each frame it ticks the playback clock once, lays out the
//! panels and shows the error dialog when something failed.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::state::ViewerState;
use crate::panels::{ControlsPanel, HistogramWindows, ScrubBarPanel, SensorsPanel, TimelinePanel};

pub struct ViewerApp {
    pub state: ViewerState,
    tick_interval: Duration,

    controls: ControlsPanel,
    sensors: SensorsPanel,
    timeline: TimelinePanel,
    scrub_bar: ScrubBarPanel,
    histograms: HistogramWindows,
}

impl ViewerApp {
    pub fn new(cfg: &ViewerConfig) -> Self {
        let mut state = ViewerState::new();
        state.clock.set_playback_factor(cfg.initial_playback_factor);
        if let Some(path) = &cfg.settings_path {
            state.report_on_error(|s| s.load_settings(path));
        }
        Self {
            state,
            tick_interval: cfg.tick_interval,
            controls: ControlsPanel::new(cfg.playback_factor_range.clone()),
            sensors: SensorsPanel,
            timeline: TimelinePanel::new(cfg.min_tick_spacing, cfg.min_drag_distance),
            scrub_bar: ScrubBarPanel,
            histograms: HistogramWindows,
        }
    }

    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.pending_error.clone() else {
            return;
        };
        let mut dismissed = false;
        let modal = egui::Modal::new(egui::Id::new("error_dialog")).show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.heading("Error");
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        if dismissed || modal.should_close() {
            self.state.pending_error = None;
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick(Instant::now());

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls.show(ui, &mut self.state);
        });
        egui::TopBottomPanel::bottom("scrub_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                self.scrub_bar.show(ui, &mut self.state);
            });
        egui::SidePanel::left("sensors")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                self.sensors.show(ui, &mut self.state);
            });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.timeline.show(ui, &mut self.state);
        });
        self.histograms.show(ctx, &mut self.state);

        self.show_error_dialog(ctx);

        ctx.request_repaint_after(self.tick_interval);
    }
}
