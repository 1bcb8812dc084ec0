use chrono::TimeDelta;
use smartfilter_viewer::data::ticks::*;

fn labels(ticks: &[TickInfo]) -> Vec<&str> {
    ticks.iter().map(|t| t.label.as_str()).collect()
}

fn positions(ticks: &[TickInfo]) -> Vec<f64> {
    ticks.iter().map(|t| t.pos).collect()
}

#[test]
fn value_ticks_round_spacing_to_hundreds() {
    let ticks = generate_value_ticks(1000.0, 5);
    assert_eq!(labels(&ticks), ["0", "200", "400", "600", "800", "1000"]);
    let expected = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
    for (p, e) in positions(&ticks).into_iter().zip(expected) {
        assert!((p - e).abs() < 1e-12);
    }
}

#[test]
fn value_ticks_drop_a_tick_crowding_the_maximum() {
    let ticks = generate_value_ticks(950.0, 5);
    assert_eq!(labels(&ticks), ["0", "200", "400", "600", "800", "950"]);

    let ticks = generate_value_ticks(870.0, 5);
    assert_eq!(labels(&ticks), ["0", "200", "400", "600", "870"]);
}

#[test]
fn small_maximum_only_gets_bounds() {
    let ticks = generate_value_ticks(50.0, 5);
    assert_eq!(labels(&ticks), ["0", "50"]);
    assert_eq!(positions(&ticks), [0.0, 1.0]);

    let ticks = generate_value_ticks(12.5, 3);
    assert_eq!(labels(&ticks), ["0", "12.5"]);
}

#[test]
fn degenerate_value_ticks() {
    for max in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert_eq!(generate_value_ticks(max, 5), vec![TickInfo::new(0.0, "0")]);
    }
    // A zero count behaves like a single tick slot.
    assert_eq!(labels(&generate_value_ticks(1000.0, 0)), ["0", "1000"]);
}

#[test]
fn single_time_tick_shows_total() {
    let ticks = generate_time_ticks(TimeDelta::hours(1), 1, 0.0, 1.0);
    assert_eq!(ticks, vec![TickInfo::new(1.0, "01:00:00")]);
    assert_eq!(generate_time_ticks(TimeDelta::minutes(5), 0, 0.0, 1.0).len(), 1);
}

#[test]
fn time_ticks_span_the_visible_range() {
    let ticks = generate_time_ticks(TimeDelta::hours(1), 3, 0.0, 1.0);
    assert_eq!(labels(&ticks), ["00:00:00", "00:30:00", "01:00:00"]);
    assert_eq!(positions(&ticks), [0.0, 0.5, 1.0]);

    let zoomed = generate_time_ticks(TimeDelta::hours(1), 3, 0.5, 1.0);
    assert_eq!(labels(&zoomed), ["00:30:00", "00:45:00", "01:00:00"]);
}

#[test]
fn signed_hms_formatting() {
    assert_eq!(format_signed_hms(TimeDelta::zero()), "00:00:00");
    assert_eq!(format_signed_hms(TimeDelta::seconds(3_723)), "01:02:03");
    assert_eq!(format_signed_hms(TimeDelta::seconds(-90)), "-00:01:30");
    assert_eq!(format_signed_hms(TimeDelta::hours(25)), "01:00:00");
}

#[test]
fn tick_capacity_from_length() {
    assert_eq!(max_tick_count_for_length(500.0, 100.0), 6);
    assert_eq!(max_tick_count_for_length(99.0, 100.0), 1);
    assert_eq!(max_tick_count_for_length(0.0, 100.0), 1);
    assert_eq!(max_tick_count_for_length(500.0, 0.0), 1);
}
