//! Color gradients for the sensor indicators.
//!
//! A gradient is a list of `(key, color)` stops. Keys are either absolute data
//! values or fractions of the session's observed maximum; both are turned into
//! an offset in `[0, 1]` before interpolating.

use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ViewerError};

/// Hue span used when no gradient is configured: green (120°) → red (0°).
const FALLBACK_HUE_SPAN: f32 = 120.0;
/// Exponent that stretches the low end of the fallback scale.
const FALLBACK_GAMMA: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientKey {
    /// A data value.
    Absolute(f64),
    /// A fraction of the observed maximum, written as `"50%"`.
    Relative(f64),
}

impl GradientKey {
    /// Offset in `[0, 1]`-space for a given observed maximum.
    pub fn offset(&self, observed_max: f64) -> f64 {
        match *self {
            GradientKey::Absolute(v) => v / observed_max,
            GradientKey::Relative(f) => f,
        }
    }
}

impl FromStr for GradientKey {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (number, relative) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest.trim(), true),
            None => (trimmed, false),
        };
        let value: f64 = number
            .parse()
            .map_err(|_| ViewerError::InvalidGradientKey(s.to_string()))?;
        if !value.is_finite() {
            return Err(ViewerError::InvalidGradientKey(s.to_string()));
        }
        Ok(if relative {
            GradientKey::Relative(value / 100.0)
        } else {
            GradientKey::Absolute(value)
        })
    }
}

impl fmt::Display for GradientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradientKey::Absolute(v) => write!(f, "{v}"),
            GradientKey::Relative(v) => write!(f, "{}%", v * 100.0),
        }
    }
}

impl Serialize for GradientKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct GradientKeyVisitor;

impl Visitor<'_> for GradientKeyVisitor {
    type Value = GradientKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a percentage string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<GradientKey, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<GradientKey, E> {
        Ok(GradientKey::Absolute(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<GradientKey, E> {
        Ok(GradientKey::Absolute(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<GradientKey, E> {
        Ok(GradientKey::Absolute(v as f64))
    }
}

impl<'de> Deserialize<'de> for GradientKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(GradientKeyVisitor)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Parse `#RRGGBB` or `#AARRGGBB`.
pub fn parse_hex_color(s: &str) -> Result<Color32> {
    let err = || ViewerError::InvalidColor(s.to_string());
    let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
    if !hex.is_ascii() {
        return Err(err());
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
    match hex.len() {
        6 => Ok(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Color32::from_rgba_unmultiplied(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
        _ => Err(err()),
    }
}

/// Format as `#AARRGGBB`.
pub fn to_hex_color(c: Color32) -> String {
    let [r, g, b, a] = c.to_srgba_unmultiplied();
    format!("#{a:02X}{r:02X}{g:02X}{b:02X}")
}

/// HSV → color, hue in degrees. Channels are linear intensities (scRGB), the
/// same space the indicator palette was defined in, so mid hues come out
/// brighter than an sRGB conversion would give.
pub fn from_hsv(h: f32, s: f32, v: f32) -> Color32 {
    let h_i = (h / 60.0).floor() as i32;
    let f = h / 60.0 - h_i as f32;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let rgba = match h_i {
        0 | 6 => egui::Rgba::from_rgb(v, t, p),
        1 => egui::Rgba::from_rgb(q, v, p),
        2 => egui::Rgba::from_rgb(p, v, t),
        3 => egui::Rgba::from_rgb(p, q, v),
        4 => egui::Rgba::from_rgb(t, p, v),
        5 => egui::Rgba::from_rgb(v, p, q),
        _ => return Color32::BLACK,
    };
    rgba.into()
}

/// Default graph color of sensor slot `index`.
pub fn default_sensor_color(index: usize) -> Color32 {
    from_hsv(180.0 + index as f32 * 15.0, 1.0, 1.0)
}

fn lerp_color(a: Color32, b: Color32, t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    let [ar, ag, ab, aa] = a.to_srgba_unmultiplied();
    let [br, bg, bb, ba] = b.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(mix(ar, br), mix(ag, bg), mix(ab, bb), mix(aa, ba))
}

// ─────────────────────────────────────────────────────────────────────────────
// ColorGradient
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub key: GradientKey,
    pub color: Color32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorGradient {
    stops: Vec<GradientStop>,
}

impl ColorGradient {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn push(&mut self, key: GradientKey, color: Color32) {
        self.stops.push(GradientStop { key, color });
    }

    /// Piecewise-linear color for `value`, `None` without stops.
    ///
    /// Values below the first or above the last stop take that stop's color.
    /// A non-positive or non-finite maximum maps every value to the lowest stop.
    pub fn color_at(&self, value: f64, observed_max: f64) -> Option<Color32> {
        let mut stops: Vec<(f64, Color32)> = self
            .stops
            .iter()
            .map(|s| (s.key.offset(observed_max), s.color))
            .filter(|(offset, _)| offset.is_finite())
            .collect();
        if stops.is_empty() {
            return self.stops.first().map(|s| s.color);
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));

        let t = value / observed_max;
        if !observed_max.is_finite() || observed_max <= 0.0 || !t.is_finite() {
            return Some(stops[0].1);
        }

        let (first, last) = (stops[0], stops[stops.len() - 1]);
        if t <= first.0 {
            return Some(first.1);
        }
        if t >= last.0 {
            return Some(last.1);
        }
        for pair in stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.0 {
                let span = hi.0 - lo.0;
                if span == 0.0 {
                    return Some(hi.1);
                }
                return Some(lerp_color(lo.1, hi.1, (t - lo.0) / span));
            }
        }
        Some(last.1)
    }

    /// Indicator color: the gradient when configured, otherwise a green → red
    /// hue ramp over `(value / max)^0.3`.
    pub fn indicator_color(&self, value: f64, observed_max: f64) -> Color32 {
        if let Some(c) = self.color_at(value, observed_max) {
            return c;
        }
        let mut factor = (value / observed_max).powf(FALLBACK_GAMMA);
        if !factor.is_finite() {
            factor = 0.0;
        }
        let factor = factor.clamp(0.0, 1.0) as f32;
        from_hsv((1.0 - factor) * FALLBACK_HUE_SPAN, 1.0, 1.0)
    }
}
