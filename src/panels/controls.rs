//! Top bar: transport buttons, speed, field selection, zoom reset and
//! settings files.

use std::ops::RangeInclusive;

use eframe::egui;
use egui_phosphor::regular as icons;

use crate::data::playback::ClockState;
use crate::data::sensor::SensorField;
use crate::data::state::ViewerState;

pub struct ControlsPanel {
    pub speed_range: RangeInclusive<f64>,
}

impl ControlsPanel {
    pub fn new(speed_range: RangeInclusive<f64>) -> Self {
        Self { speed_range }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut ViewerState) {
        ui.horizontal(|ui| {
            let playing = state.clock.state() == ClockState::Playing;
            let (icon, hint) = if playing {
                (icons::PAUSE, "Pause")
            } else {
                (icons::PLAY, "Play")
            };
            if ui.button(icon).on_hover_text(hint).clicked() {
                state.toggle_play();
            }
            if ui.button(icons::STOP).on_hover_text("Stop and rewind").clicked() {
                state.stop();
            }

            ui.separator();
            let mut factor = state.clock.playback_factor();
            let slider = egui::Slider::new(&mut factor, self.speed_range.clone())
                .logarithmic(true)
                .text("speed");
            if ui.add(slider).changed() {
                state.clock.set_playback_factor(factor);
            }

            ui.separator();
            let mut field = state.session.field();
            egui::ComboBox::from_id_salt("sensor_field")
                .selected_text(field.display_name())
                .height(400.0)
                .show_ui(ui, |ui| {
                    for f in SensorField::ALL {
                        ui.selectable_value(&mut field, f, f.display_name());
                    }
                });
            if field != state.session.field() {
                state.session.select_field(field);
            }

            ui.separator();
            let zoom_btn = ui.add_enabled(
                state.viewport.is_zoomed(),
                egui::Button::new(icons::MAGNIFYING_GLASS_MINUS),
            );
            if zoom_btn.on_hover_text("Reset zoom").clicked() {
                state.viewport.reset_zoom();
            }

            ui.separator();
            if ui
                .button(format!("{} Load settings", icons::FOLDER_OPEN))
                .clicked()
            {
                if let Some(path) = settings_dialog().pick_file() {
                    state.report_on_error(|s| s.load_settings(&path));
                }
            }
            if ui
                .button(format!("{} Save settings", icons::FLOPPY_DISK))
                .clicked()
            {
                if let Some(path) = settings_dialog().set_file_name("settings.json").save_file() {
                    state.report_on_error(|s| s.save_settings(&path));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.monospace(state.session.timestamp_label(&state.clock));
            });
        });
    }
}

fn settings_dialog() -> rfd::FileDialog {
    rfd::FileDialog::new()
        .add_filter("Settings", &["json", "hjson", "yaml", "yml"])
        .add_filter("All files", &["*"])
}
