//! Timeline graph: one line per loaded sensor, value and time axes, the
//! playback cursor and zoom interactions.
//!
//! - Mouse wheel zooms in/out around the pointer.
//! - Dragging selects a range to zoom into; short drags and clicks jump the
//!   cursor instead.

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Vec2};

use crate::data::state::ViewerState;
use crate::data::ticks::{generate_time_ticks, generate_value_ticks, max_tick_count_for_length};

const VALUE_AXIS_WIDTH: f32 = 56.0;
const TIME_AXIS_HEIGHT: f32 = 22.0;
const LINE_WIDTH: f32 = 1.5;
const AXIS_COLOR: Color32 = Color32::from_gray(140);
const GRID_COLOR: Color32 = Color32::from_gray(50);
const CURSOR_COLOR: Color32 = Color32::from_rgb(255, 100, 100);
const SELECTION_COLOR: Color32 = Color32::from_rgb(100, 150, 255);
/// Scroll distance (points) of one wheel notch; one zoom step per notch.
const WHEEL_STEP: f32 = 50.0;

pub struct TimelinePanel {
    pub min_tick_spacing: f32,
    pub min_drag_distance: f32,
    /// Pointer x where the current drag started, relative to the graph.
    drag_origin: Option<f32>,
    drag_current: Option<f32>,
    /// Scroll not yet turned into zoom steps.
    scroll_accum: f32,
}

impl TimelinePanel {
    pub fn new(min_tick_spacing: f32, min_drag_distance: f32) -> Self {
        Self {
            min_tick_spacing,
            min_drag_distance,
            drag_origin: None,
            drag_current: None,
            scroll_accum: 0.0,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut ViewerState) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let full = response.rect;
        let graph = Rect::from_min_max(
            Pos2::new(full.left() + VALUE_AXIS_WIDTH, full.top()),
            Pos2::new(full.right(), full.bottom() - TIME_AXIS_HEIGHT),
        );
        if graph.width() <= 0.0 || graph.height() <= 0.0 {
            return;
        }

        painter.rect_filled(graph, 0.0, Color32::from_rgb(24, 24, 30));
        self.draw_value_axis(&painter, graph, state);
        self.draw_time_axis(&painter, graph, state);

        let clipped = painter.with_clip_rect(graph);
        let (w, h) = (graph.width() as f64, graph.height() as f64);
        for slot in state.session.loaded_slots() {
            let points: Vec<Pos2> = state
                .session
                .graph_points(slot.index(), &state.viewport, w, h)
                .into_iter()
                .map(|[x, y]| graph.min + Vec2::new(x as f32, y as f32))
                .collect();
            if points.len() >= 2 {
                clipped.add(Shape::line(points, Stroke::new(LINE_WIDTH, slot.color())));
            }
        }

        if let Some(progress) = state.session.progress(&state.clock) {
            let x = state.viewport.to_viewport_x(progress, w);
            if x.is_finite() && (0.0..=w).contains(&x) {
                let x = graph.left() + x as f32;
                clipped.line_segment(
                    [Pos2::new(x, graph.top()), Pos2::new(x, graph.bottom())],
                    Stroke::new(2.0, CURSOR_COLOR),
                );
            }
        }

        painter.rect_stroke(graph, 0.0, Stroke::new(1.0, AXIS_COLOR), StrokeKind::Outside);

        self.handle_input(ui, &response, &clipped, graph, state);
    }

    fn draw_value_axis(&self, painter: &egui::Painter, graph: Rect, state: &ViewerState) {
        let count = max_tick_count_for_length(graph.height() as f64, self.min_tick_spacing as f64);
        for tick in generate_value_ticks(state.session.observed_max(), count) {
            let y = graph.bottom() - tick.pos as f32 * graph.height();
            painter.line_segment(
                [Pos2::new(graph.left(), y), Pos2::new(graph.right(), y)],
                Stroke::new(1.0, GRID_COLOR),
            );
            painter.text(
                Pos2::new(graph.left() - 4.0, y),
                Align2::RIGHT_CENTER,
                tick.label,
                FontId::monospace(10.0),
                AXIS_COLOR,
            );
        }
    }

    fn draw_time_axis(&self, painter: &egui::Painter, graph: Rect, state: &ViewerState) {
        if !state.session.has_data() {
            return;
        }
        let (start, end) = state.viewport.visible_range();
        let count = max_tick_count_for_length(graph.width() as f64, self.min_tick_spacing as f64);
        let ticks = generate_time_ticks(state.session.duration(), count, start, end);
        let last = ticks.len().saturating_sub(1);
        for (i, tick) in ticks.into_iter().enumerate() {
            let x = graph.left() + tick.pos as f32 * graph.width();
            painter.line_segment(
                [Pos2::new(x, graph.bottom()), Pos2::new(x, graph.bottom() + 4.0)],
                Stroke::new(1.0, AXIS_COLOR),
            );
            let align = match i {
                0 if last > 0 => Align2::LEFT_TOP,
                i if i == last => Align2::RIGHT_TOP,
                _ => Align2::CENTER_TOP,
            };
            painter.text(
                Pos2::new(x, graph.bottom() + 6.0),
                align,
                tick.label,
                FontId::monospace(10.0),
                AXIS_COLOR,
            );
        }
    }

    fn handle_input(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        painter: &egui::Painter,
        graph: Rect,
        state: &mut ViewerState,
    ) {
        let w = graph.width() as f64;
        let rel_x = |pos: Pos2| (pos.x - graph.left()).clamp(0.0, graph.width());

        if let (true, Some(pos)) = (response.hovered(), response.hover_pos()) {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            let center = rel_x(pos) as f64 / w;
            let steps = wheel_steps(&mut self.scroll_accum, scroll);
            for _ in 0..steps.unsigned_abs() {
                if steps > 0 {
                    state.viewport.zoom_in(center);
                } else {
                    state.viewport.zoom_out(center);
                }
            }
        } else {
            self.scroll_accum = 0.0;
        }

        if response.drag_started() {
            self.drag_origin = ui.input(|i| i.pointer.press_origin()).map(rel_x);
        }

        let current = response.interact_pointer_pos().map(rel_x);
        if response.dragged() && current.is_some() {
            self.drag_current = current;
        }
        if let (Some(origin), Some(current)) = (self.drag_origin, self.drag_current) {
            if response.dragged() && (current - origin).abs() >= self.min_drag_distance {
                for x in [origin, current] {
                    let x = graph.left() + x;
                    painter.line_segment(
                        [Pos2::new(x, graph.top()), Pos2::new(x, graph.bottom())],
                        Stroke::new(1.0, SELECTION_COLOR),
                    );
                }
            }
        }

        if response.drag_stopped() {
            if let (Some(origin), Some(current)) = (self.drag_origin.take(), self.drag_current.take().or(current)) {
                if (current - origin).abs() >= self.min_drag_distance {
                    let left = state.viewport.to_data_fraction_x(origin as f64, w);
                    let right = state.viewport.to_data_fraction_x(current as f64, w);
                    state.report_on_error(|s| s.viewport.zoom_to_range(left, right));
                } else {
                    let fraction = state.viewport.to_data_fraction_x(current as f64, w);
                    state.jump_to_fraction(fraction);
                }
            }
        } else if response.clicked() {
            if let Some(x) = current {
                let fraction = state.viewport.to_data_fraction_x(x as f64, w);
                state.jump_to_fraction(fraction);
            }
        }
    }
}

/// Add `delta` to the pending scroll and return the whole wheel notches it now
/// holds (positive zooms in). The remainder stays pending, so a trackpad's
/// small deltas zoom once per notch's worth of movement.
fn wheel_steps(accum: &mut f32, delta: f32) -> i32 {
    if !delta.is_finite() {
        return 0;
    }
    if delta != 0.0 && accum.signum() != delta.signum() {
        *accum = 0.0;
    }
    *accum += delta;
    let steps = (*accum / WHEEL_STEP).trunc();
    *accum -= steps * WHEEL_STEP;
    steps as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_notch_is_one_step() {
        let mut accum = 0.0;
        assert_eq!(wheel_steps(&mut accum, WHEEL_STEP), 1);
        assert_eq!(wheel_steps(&mut accum, -WHEEL_STEP), -1);
        assert_eq!(wheel_steps(&mut accum, 0.0), 0);
    }

    #[test]
    fn small_deltas_accumulate() {
        let mut accum = 0.0;
        let steps: i32 = (0..25).map(|_| wheel_steps(&mut accum, 4.0)).sum();
        assert_eq!(steps, 2);
        assert_eq!(accum, 0.0);
    }

    #[test]
    fn direction_change_drops_the_remainder() {
        let mut accum = 0.0;
        assert_eq!(wheel_steps(&mut accum, 40.0), 0);
        assert_eq!(wheel_steps(&mut accum, -20.0), 0);
        assert_eq!(wheel_steps(&mut accum, -30.0), -1);
    }
}
