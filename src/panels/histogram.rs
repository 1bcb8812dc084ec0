//! Per-sensor particle-size histogram windows.

use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::data::sensor::BIN_COUNT;
use crate::data::state::ViewerState;

#[derive(Default)]
pub struct HistogramWindows;

impl HistogramWindows {
    pub fn show(&mut self, ctx: &egui::Context, state: &mut ViewerState) {
        for index in 0..state.session.slots().len() {
            let (mut open, color) = match state.session.slots().get(index) {
                Some(slot) if slot.histogram_open => (true, slot.color()),
                _ => continue,
            };
            let bars = state.session.histogram_bars(index);

            egui::Window::new(format!("Sensor {} histogram", index + 1))
                .id(egui::Id::new(("histogram", index)))
                .open(&mut open)
                .default_size([360.0, 220.0])
                .show(ctx, |ui| match bars {
                    Some(heights) => {
                        let bars = heights
                            .into_iter()
                            .enumerate()
                            .map(|(bin, h)| Bar::new(bin as f64, h).width(0.9).name(format!("Bin{bin:02}")))
                            .collect();
                        let chart = BarChart::new("bins", bars).color(color);
                        Plot::new(("histogram_plot", index))
                            .allow_drag(false)
                            .allow_zoom(false)
                            .allow_scroll(false)
                            .allow_boxed_zoom(false)
                            .include_x(-0.5)
                            .include_x(BIN_COUNT as f64 - 0.5)
                            .include_y(0.0)
                            .include_y(1.0)
                            .show(ui, |plot_ui| plot_ui.bar_chart(chart));
                    }
                    None => {
                        ui.label("No histogram data for this sensor.");
                    }
                });

            if !open {
                if let Ok(slot) = state.session.slot_mut(index) {
                    slot.histogram_open = false;
                }
            }
        }
    }
}
