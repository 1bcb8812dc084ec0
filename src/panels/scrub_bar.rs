//! Scrub bar under the timeline.
//!
//! Pressing on the bar starts scrubbing and jumps; dragging keeps jumping;
//! releasing hands the cursor back to the clock.

use eframe::egui;
use egui::{Color32, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::data::state::ViewerState;

const BAR_HEIGHT: f32 = 16.0;

#[derive(Default)]
pub struct ScrubBarPanel;

impl ScrubBarPanel {
    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut ViewerState) {
        let (response, painter) =
            ui.allocate_painter(Vec2::new(ui.available_width(), BAR_HEIGHT), Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 3.0, Color32::from_rgb(30, 30, 40));
        if let Some(progress) = state.session.progress(&state.clock) {
            let p = progress.clamp(0.0, 1.0) as f32;
            let filled = Rect::from_min_max(rect.min, Pos2::new(rect.left() + p * rect.width(), rect.bottom()));
            painter.rect_filled(filled, 3.0, Color32::from_rgb(70, 110, 170));
            painter.circle_filled(
                Pos2::new(filled.right(), rect.center().y),
                BAR_HEIGHT * 0.5,
                Color32::from_rgb(200, 210, 230),
            );
        }
        painter.rect_stroke(rect, 3.0, Stroke::new(1.0, Color32::from_gray(80)), StrokeKind::Outside);

        if response.is_pointer_button_down_on() {
            if !state.clock.is_scrubbing() {
                state.clock.begin_scrub();
            }
            if let Some(pos) = response.interact_pointer_pos() {
                let fraction = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
                state.jump_to_fraction(fraction as f64);
            }
        } else if state.clock.is_scrubbing() {
            state.clock.end_scrub();
        }
    }
}
