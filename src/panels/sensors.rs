//! The 3×3 grid of sensor indicators.
//!
//! Left click loads a log file into the slot, right click toggles its
//! histogram window.

use eframe::egui;
use egui::{Align2, Color32, FontId, Sense, Stroke, Vec2};

use crate::data::session::SENSOR_COUNT;
use crate::data::state::ViewerState;

const COLUMNS: usize = 3;
const INDICATOR_SIZE: f32 = 64.0;
const EMPTY_COLOR: Color32 = Color32::from_gray(60);

#[derive(Default)]
pub struct SensorsPanel;

impl SensorsPanel {
    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut ViewerState) {
        egui::Grid::new("sensor_grid")
            .spacing(Vec2::splat(8.0))
            .show(ui, |ui| {
                for index in 0..SENSOR_COUNT {
                    self.indicator(ui, state, index);
                    if (index + 1) % COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    fn indicator(&mut self, ui: &mut egui::Ui, state: &mut ViewerState, index: usize) {
        let Some(slot) = state.session.slots().get(index) else {
            return;
        };
        let fill = state.session.indicator_color(index).unwrap_or(EMPTY_COLOR);
        let ring = slot.color();
        let hover = match slot.file_name() {
            Some(path) => format!("{}\nRight click: histogram", path.display()),
            None => "Click to load a sensor log".to_string(),
        };

        let (rect, response) = ui.allocate_exact_size(Vec2::splat(INDICATOR_SIZE), Sense::click());
        let painter = ui.painter_at(rect);
        let radius = INDICATOR_SIZE * 0.5 - 3.0;
        painter.circle(rect.center(), radius, fill, Stroke::new(3.0, ring));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            (index + 1).to_string(),
            FontId::proportional(16.0),
            Color32::BLACK,
        );
        let response = response.on_hover_text(hover);

        if response.clicked() {
            let picked = rfd::FileDialog::new()
                .set_title(format!("Load sensor {}", index + 1))
                .add_filter("Sensor log", &["csv", "txt"])
                .add_filter("All files", &["*"])
                .pick_file();
            if let Some(path) = picked {
                state.report_on_error(|s| s.load_sensor(index, &path));
            }
        }
        if response.secondary_clicked() {
            if let Ok(slot) = state.session.slot_mut(index) {
                slot.histogram_open = !slot.histogram_open;
            }
        }
    }
}
