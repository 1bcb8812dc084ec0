use std::io::Write;
use std::path::PathBuf;

use egui::Color32;
use smartfilter_viewer::data::gradient::{ColorGradient, GradientKey};
use smartfilter_viewer::data::sensor::SensorField;
use smartfilter_viewer::data::session::Session;
use smartfilter_viewer::persistence::*;
use smartfilter_viewer::ViewerError;

// Minimal valid log with a single PM2.5 reading
fn write_log(dir: &tempfile::TempDir, name: &str, pm25: f64) -> PathBuf {
    let path = dir.path().join(name);
    let mut header = vec!["OADateTime".to_string()];
    header.extend(SensorField::ALL.iter().map(|f| f.ident().to_string()));
    let mut row = vec!["43831".to_string()];
    row.extend(
        SensorField::ALL
            .iter()
            .map(|&f| if f == SensorField::Pm2_5 { pm25.to_string() } else { "0".to_string() }),
    );
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", header.join(";")).unwrap();
    writeln!(file, "{}", row.join(";")).unwrap();
    path
}

#[test]
fn reads_relaxed_document() {
    let text = r##"# saved by hand
{
  Sensors: { "0": { FileName: "a.csv", Color: "#FF00FFFF" }, 3: { Color: "#112233" } },
  ColorGradient: { 0: "#FF00FF00", "50%": "#FFFFFF00", "100%": "#FFFF0000" },
  Property: "PM2_5_ug_m3"
}
"##;
    let s = settings_from_str(text).unwrap();
    assert_eq!(s.sensors.len(), 2);
    assert_eq!(s.sensors["0"].file_name, Some(PathBuf::from("a.csv")));
    assert_eq!(s.sensors["3"].file_name, None);
    assert_eq!(s.property.as_deref(), Some("PM2_5_ug_m3"));

    let gradient = s.gradient().unwrap();
    assert_eq!(gradient.stops().len(), 3);
    assert!(gradient
        .stops()
        .iter()
        .any(|stop| stop.key == GradientKey::Relative(0.5) && stop.color == Color32::from_rgb(255, 255, 0)));
}

#[test]
fn reads_hjson_without_commas() {
    let text = r##"{
  Sensors:
  {
    "0":
    {
      FileName: C:\logs\a.csv
      Color: "#FF00FFFF"
    }
    4:
    {
      Color: "#FF112233"
    }
  }
  ColorGradient:
  {
    "0": "#FF00FF00"
    "100%": "#FFFF0000"
  }
  // last selected field
  Property: PM10_ug_m3
}
"##;
    let s = settings_from_str(text).unwrap();
    assert_eq!(s.sensors.len(), 2);
    assert_eq!(s.sensors["0"].file_name, Some(PathBuf::from(r"C:\logs\a.csv")));
    assert_eq!(s.sensors["0"].color.as_deref(), Some("#FF00FFFF"));
    assert_eq!(s.sensors["4"].color.as_deref(), Some("#FF112233"));
    assert_eq!(s.color_gradient.len(), 2);
    assert_eq!(s.property.as_deref(), Some("PM10_ug_m3"));
}

#[test]
fn empty_document_is_default() {
    assert_eq!(settings_from_str("").unwrap(), SettingsSerde::default());
    assert_eq!(settings_from_str("{}").unwrap(), SettingsSerde::default());
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = settings_from_str("{ Sensors: [").unwrap_err();
    assert!(matches!(err, ViewerError::SettingsParse(_)));
}

#[test]
fn writes_pretty_json_without_absent_values() {
    let mut s = SettingsSerde::default();
    s.sensors.insert(
        "1".into(),
        SensorSettingsSerde {
            file_name: None,
            color: Some("#FF0000FF".into()),
        },
    );
    let json = settings_to_string(&s).unwrap();
    assert!(json.contains("\"Sensors\""));
    assert!(json.contains("\"Color\": \"#FF0000FF\""));
    assert!(!json.contains("FileName"));
    assert!(!json.contains("ColorGradient"));
    assert!(!json.contains("Property"));
    assert_eq!(settings_from_str(&json).unwrap(), s);
}

#[test]
fn capture_save_load_apply_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(&dir, "s2.csv", 42.0);

    let mut session = Session::new();
    session.load_sensor(2, &log).unwrap();
    session.set_color(2, Color32::from_rgb(1, 2, 3)).unwrap();
    session.select_field(SensorField::Pm10);
    let mut gradient = ColorGradient::default();
    gradient.push(GradientKey::Absolute(10.0), Color32::BLUE);
    gradient.push(GradientKey::Relative(1.0), Color32::RED);
    session.set_gradient(gradient.clone());

    let path = dir.path().join("settings.json");
    save_settings_to_path(&SettingsSerde::capture(&session), &path).unwrap();

    let mut restored = Session::new();
    load_settings_from_path(&path).unwrap().apply_to(&mut restored).unwrap();
    assert_eq!(restored.field(), SensorField::Pm10);
    assert_eq!(restored.slot(2).unwrap().file_name(), Some(log.as_path()));
    assert_eq!(restored.slot(2).unwrap().color(), Color32::from_rgb(1, 2, 3));
    assert!(restored.slot(2).unwrap().has_data());
    assert_eq!(restored.gradient().stops().len(), 2);
    for stop in gradient.stops() {
        assert!(restored.gradient().stops().contains(stop));
    }
}

#[test]
fn empty_gradient_keeps_previous_one() {
    let mut session = Session::new();
    let mut gradient = ColorGradient::default();
    gradient.push(GradientKey::Relative(0.0), Color32::GREEN);
    session.set_gradient(gradient.clone());

    SettingsSerde::default().apply_to(&mut session).unwrap();
    assert_eq!(session.gradient(), &gradient);
}

#[test]
fn unknown_property_is_ignored() {
    let mut session = Session::new();
    session.select_field(SensorField::TemperatureC);
    let s = SettingsSerde {
        property: Some("NoSuchField".into()),
        ..Default::default()
    };
    s.apply_to(&mut session).unwrap();
    assert_eq!(session.field(), SensorField::TemperatureC);
}

#[test]
fn property_accepts_display_name() {
    let mut session = Session::new();
    let s = settings_from_str(r#"{ "Property": "PM10(ug/m3)" }"#).unwrap();
    s.apply_to(&mut session).unwrap();
    assert_eq!(session.field(), SensorField::Pm10);
}

#[test]
fn bad_entries_do_not_stop_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_log(&dir, "good.csv", 5.0);
    let mut s = SettingsSerde::default();
    s.sensors.insert(
        "12".into(),
        SensorSettingsSerde {
            file_name: None,
            color: Some("#FF000000".into()),
        },
    );
    s.sensors.insert(
        "4".into(),
        SensorSettingsSerde {
            file_name: Some(good.clone()),
            color: None,
        },
    );

    let mut session = Session::new();
    let err = s.apply_to(&mut session).unwrap_err();
    assert!(matches!(err, ViewerError::SensorIndexOutOfRange { index: 12, .. }));
    assert!(session.slot(4).unwrap().has_data());
}
