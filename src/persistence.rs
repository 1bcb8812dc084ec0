//! Settings persistence: save and load viewer sessions.
//!
//! The settings document is read leniently (JSON, unquoted keys, YAML block
//! syntax, `#` comments and comma-less Hjson all parse) and written back as
//! pretty JSON, which is also valid Hjson:
//!
//! ```text
//! {
//!   Sensors: { "0": { FileName: "a.csv", Color: "#FF00FFFF" } },
//!   ColorGradient: { "0": "#FF00FF00", "50%": "#FFFFFF00", "100%": "#FFFF0000" },
//!   Property: "PM2_5_ug_m3"
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::gradient::{parse_hex_color, to_hex_color, ColorGradient, GradientKey};
use crate::data::sensor::SensorField;
use crate::data::session::Session;
use crate::error::{Result, ViewerError};

// ---------- Serializable mirror types ----------

/// Serializable state of one sensor slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorSettingsSerde {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<PathBuf>,
    /// `#RRGGBB` or `#AARRGGBB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Whole settings document. Map keys are kept as strings so slot indices
/// and gradient keys parse the same from quoted and bare keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SettingsSerde {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sensors: BTreeMap<String, SensorSettingsSerde>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub color_gradient: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl SettingsSerde {
    /// Snapshot of the session's slots, gradient and selected field.
    pub fn capture(session: &Session) -> Self {
        let sensors = session
            .slots()
            .iter()
            .map(|slot| {
                let entry = SensorSettingsSerde {
                    file_name: slot.file_name().map(Path::to_path_buf),
                    color: Some(to_hex_color(slot.color())),
                };
                (slot.index().to_string(), entry)
            })
            .collect();
        let color_gradient = session
            .gradient()
            .stops()
            .iter()
            .map(|stop| (stop.key.to_string(), to_hex_color(stop.color)))
            .collect();
        Self {
            sensors,
            color_gradient,
            property: Some(session.field().ident().to_string()),
        }
    }

    /// Parse the gradient section. Empty when the document has none.
    pub fn gradient(&self) -> Result<ColorGradient> {
        let mut gradient = ColorGradient::default();
        for (key, color) in &self.color_gradient {
            gradient.push(key.parse::<GradientKey>()?, parse_hex_color(color)?);
        }
        Ok(gradient)
    }

    /// Apply onto a session.
    ///
    /// Colors, gradient and field are applied first, then every listed file
    /// is (re)loaded. A failing file does not stop the others; the first
    /// failure is returned.
    pub fn apply_to(self, session: &mut Session) -> Result<()> {
        let gradient = self.gradient()?;
        if !gradient.is_empty() {
            session.set_gradient(gradient);
        }

        if let Some(name) = &self.property {
            match SensorField::from_name(name) {
                Ok(field) => session.select_field(field),
                Err(e) => tracing::warn!("ignoring property: {e}"),
            }
        }

        let mut first_error = None;
        for (key, sensor) in self.sensors {
            let Ok(index) = key.trim().parse::<usize>() else {
                tracing::warn!(key = %key, "ignoring sensor entry with non-numeric key");
                continue;
            };
            let result = Self::apply_sensor(session, index, sensor);
            if let Err(e) = result {
                tracing::warn!(index, "sensor settings not applied: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn apply_sensor(session: &mut Session, index: usize, sensor: SensorSettingsSerde) -> Result<()> {
        if let Some(color) = &sensor.color {
            session.set_color(index, parse_hex_color(color)?)?;
        }
        if let Some(path) = &sensor.file_name {
            session.load_sensor(index, path)?;
        }
        Ok(())
    }
}

// ---------- Text / file helpers ----------

/// Parse a settings document.
///
/// Hjson files with members on separate lines and no commas are not valid
/// YAML flow mappings; those are read with the Hjson parser instead. When
/// both fail the YAML error is reported.
pub fn settings_from_str(text: &str) -> Result<SettingsSerde> {
    if text.trim().is_empty() {
        return Ok(SettingsSerde::default());
    }
    match serde_yaml::from_str(text) {
        Ok(settings) => Ok(settings),
        Err(yaml_err) => deser_hjson::from_str(text).map_err(|hjson_err| {
            tracing::debug!(%hjson_err, "settings are not Hjson either");
            ViewerError::SettingsParse(yaml_err)
        }),
    }
}

/// Serialize settings to pretty JSON.
pub fn settings_to_string(settings: &SettingsSerde) -> Result<String> {
    Ok(serde_json::to_string_pretty(settings)?)
}

/// Save settings to the given path.
pub fn save_settings_to_path(settings: &SettingsSerde, path: &Path) -> Result<()> {
    let txt = settings_to_string(settings)?;
    std::fs::write(path, txt).map_err(|e| ViewerError::io(path, e))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}

/// Load settings from the given path.
pub fn load_settings_from_path(path: &Path) -> Result<SettingsSerde> {
    let txt = std::fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
    let settings = settings_from_str(&txt)?;
    tracing::info!(path = %path.display(), sensors = settings.sensors.len(), "loaded settings");
    Ok(settings)
}
