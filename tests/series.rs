use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use smartfilter_viewer::data::sensor::{SensorField, SensorRecord, FIELD_COUNT};
use smartfilter_viewer::data::series::TimeSeries;

fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn at(secs: i64) -> NaiveDateTime {
    t0() + TimeDelta::seconds(secs)
}

// Helper: series with one PM2.5 value per (seconds, value) pair
fn mk_series(points: &[(i64, f64)]) -> TimeSeries {
    points
        .iter()
        .map(|&(secs, v)| {
            let mut values = [0.0; FIELD_COUNT];
            values[SensorField::Pm2_5.index()] = v;
            values[SensorField::Pm10.index()] = v * 2.0;
            SensorRecord::from_timestamp(at(secs), values)
        })
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn exact_match_returns_integer_index() {
    let s = mk_series(&[(0, 1.0), (10, 2.0), (20, 3.0), (30, 4.0)]);
    for (i, secs) in [0, 10, 20, 30].into_iter().enumerate() {
        assert_eq!(s.find_lerp_index(at(secs)), i as f64);
    }
}

#[test]
fn between_records_uses_elapsed_time_ratio() {
    let s = mk_series(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
    assert_eq!(s.find_lerp_index(at(15)), 1.5);
    assert!((s.find_lerp_index(at(2)) - 0.2).abs() < 1e-9);
    let half_second = t0() + TimeDelta::milliseconds(10_500);
    assert!((s.find_lerp_index(half_second) - 1.05).abs() < 1e-9);
}

#[test]
fn uneven_spacing_interpolates_within_the_gap() {
    let s = mk_series(&[(0, 0.0), (1, 0.0), (101, 0.0)]);
    assert!((s.find_lerp_index(at(26)) - 1.25).abs() < 1e-9);
}

#[test]
fn out_of_range_queries_clamp() {
    let s = mk_series(&[(0, 1.0), (10, 2.0), (20, 3.0)]);
    assert_eq!(s.find_lerp_index(at(-100)), 0.0);
    assert_eq!(s.find_lerp_index(at(1_000)), 2.0);
}

#[test]
fn single_record_always_returns_zero() {
    let s = mk_series(&[(5, 7.0)]);
    assert_eq!(s.find_lerp_index(at(0)), 0.0);
    assert_eq!(s.find_lerp_index(at(5)), 0.0);
    assert_eq!(s.find_lerp_index(at(50)), 0.0);
    assert_eq!(s.value_at(at(50), SensorField::Pm2_5), Some(7.0));
}

#[test]
fn empty_series_returns_zero_and_no_value() {
    let s = TimeSeries::default();
    assert_eq!(s.find_lerp_index(at(0)), 0.0);
    assert_eq!(s.value_at(at(0), SensorField::Pm2_5), None);
    assert_eq!(s.start_time(), None);
    assert_eq!(s.max_value(SensorField::Pm2_5), None);
}

#[test]
fn integer_index_returns_stored_value_verbatim() {
    let stored = 0.1 + 0.2;
    let s = mk_series(&[(0, 1.0), (10, stored), (20, 3.0)]);
    assert_eq!(s.get_lerp_value(1.0, SensorField::Pm2_5), stored);
}

#[test]
fn fractional_index_interpolates_linearly() {
    let s = mk_series(&[(0, 10.0), (10, 20.0)]);
    assert_eq!(s.get_lerp_value(0.5, SensorField::Pm2_5), 15.0);
    assert_eq!(s.get_lerp_value(0.25, SensorField::Pm10), 25.0);
    assert_eq!(s.value_at(at(5), SensorField::Pm2_5), Some(15.0));
}

#[test]
fn max_and_range_helpers() {
    let s = mk_series(&[(0, 1.0), (10, 9.0), (20, 3.0), (30, 4.0)]);
    assert_eq!(s.max_value(SensorField::Pm2_5), Some(9.0));
    assert_eq!(s.max_value(SensorField::Pm10), Some(18.0));
    assert_eq!(s.start_time(), Some(at(0)));
    assert_eq!(s.end_time(), Some(at(30)));
    assert!(s.is_sorted());

    assert_eq!(s.index_range(at(5), at(15)), Some(0..=2));
    assert_eq!(s.index_range(at(10), at(20)), Some(1..=2));
    assert_eq!(s.index_range(at(-50), at(500)), Some(0..=3));
}

#[test]
fn unsorted_input_is_detected() {
    let s = mk_series(&[(10, 1.0), (0, 2.0)]);
    assert!(!s.is_sorted());
}

#[test]
fn any_above_looks_at_window_after_floor() {
    let s = mk_series(&[(0, 1.0), (1, 1.0), (2, 1.0), (3, 50.0), (4, 1.0)]);
    assert!(s.any_above(0.7, SensorField::Pm2_5, 40.0, 5));
    assert!(!s.any_above(0.7, SensorField::Pm2_5, 40.0, 2));
    assert!(!s.any_above(3.5, SensorField::Pm2_5, 100.0, 5));
}
