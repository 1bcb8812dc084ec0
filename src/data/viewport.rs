//! Horizontal viewport over the normalized `[0, 1]` time domain.
//!
//! `zoom_factor` is how many times the full range is magnified and
//! `pan_offset` is the data fraction at the left edge. The timeline graph and
//! its axis labels share one `Viewport`.

use crate::error::{Result, ViewerError};

/// Narrower drag ranges than this are rejected by [`Viewport::zoom_to_range`].
pub const MIN_ZOOM_SPAN: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom_factor: f64,
    pan_offset: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom_factor: 1.0,
            pan_offset: 0.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn pan_offset(&self) -> f64 {
        self.pan_offset
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom_factor != 1.0 || self.pan_offset != 0.0
    }

    /// Visible data fractions `(start, end)`.
    pub fn visible_range(&self) -> (f64, f64) {
        (self.pan_offset, self.pan_offset + 1.0 / self.zoom_factor)
    }

    /// Data fraction → pixel offset from the left edge of a `width`-pixel strip.
    pub fn to_viewport_x(&self, data_fraction_x: f64, width: f64) -> f64 {
        (data_fraction_x - self.pan_offset) * self.zoom_factor * width
    }

    /// Inverse of [`to_viewport_x`](Self::to_viewport_x).
    pub fn to_data_fraction_x(&self, pixel_x: f64, width: f64) -> f64 {
        pixel_x / width / self.zoom_factor + self.pan_offset
    }

    /// Multiply the zoom by `factor`, keeping the data under `center_fraction`
    /// (a fraction of the viewport width) in place.
    pub fn zoom(&mut self, center_fraction: f64, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 || !center_fraction.is_finite() {
            return;
        }
        let old_zoom = self.zoom_factor;
        let new_zoom = old_zoom * factor;
        let scaled_center = center_fraction / old_zoom;
        self.zoom_factor = new_zoom;
        self.pan_offset += scaled_center * (1.0 - old_zoom / new_zoom);
        self.clamp();
    }

    pub fn zoom_in(&mut self, center_fraction: f64) {
        self.zoom(center_fraction, 2.0);
    }

    pub fn zoom_out(&mut self, center_fraction: f64) {
        self.zoom(center_fraction, 0.5);
    }

    /// Show exactly the data range between the two fractions (drag-to-zoom).
    pub fn zoom_to_range(&mut self, left: f64, right: f64) -> Result<()> {
        let span = (right - left).abs();
        if !span.is_finite() || span < MIN_ZOOM_SPAN {
            return Err(ViewerError::DegenerateZoomRange { left, right });
        }
        self.pan_offset = left.min(right);
        self.zoom_factor = 1.0 / span;
        self.clamp();
        Ok(())
    }

    pub fn reset_zoom(&mut self) {
        self.zoom_factor = 1.0;
        self.pan_offset = 0.0;
    }

    // Keeps the visible range inside [0, 1].
    fn clamp(&mut self) {
        if self.zoom_factor < 1.0 {
            self.zoom_factor = 1.0;
        }
        let max_offset = 1.0 - 1.0 / self.zoom_factor;
        self.pan_offset = self.pan_offset.clamp(0.0, max_offset.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_range_inside_unit_interval() {
        let mut v = Viewport::new();
        v.zoom_in(1.0);
        let (start, end) = v.visible_range();
        assert!(start >= 0.0 && end <= 1.0 + 1e-12);
        assert_eq!(start, 0.5);
    }
}
