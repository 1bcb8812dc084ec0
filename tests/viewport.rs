use smartfilter_viewer::data::viewport::Viewport;
use smartfilter_viewer::ViewerError;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn default_shows_everything() {
    let v = Viewport::new();
    assert_eq!(v.zoom_factor(), 1.0);
    assert_eq!(v.pan_offset(), 0.0);
    assert_eq!(v.visible_range(), (0.0, 1.0));
    assert!(!v.is_zoomed());
    assert_eq!(v.to_viewport_x(0.5, 800.0), 400.0);
}

#[test]
fn transform_round_trips() {
    let mut v = Viewport::new();
    v.zoom_to_range(0.3, 0.55).unwrap();
    for f in [0.0, 0.3, 0.42, 0.55, 1.0] {
        let px = v.to_viewport_x(f, 1234.0);
        assert!(approx(v.to_data_fraction_x(px, 1234.0), f));
    }
}

#[test]
fn zoom_to_range_then_reset() {
    let mut v = Viewport::new();
    v.zoom_to_range(0.2, 0.4).unwrap();
    assert!(approx(v.zoom_factor(), 5.0));
    assert!(approx(v.pan_offset(), 0.2));
    let (start, end) = v.visible_range();
    assert!(approx(start, 0.2) && approx(end, 0.4));
    assert!(approx(v.to_viewport_x(0.2, 100.0), 0.0));
    assert!(approx(v.to_viewport_x(0.4, 100.0), 100.0));

    v.reset_zoom();
    assert_eq!(v.zoom_factor(), 1.0);
    assert_eq!(v.pan_offset(), 0.0);
}

#[test]
fn zoom_to_range_accepts_reversed_drag() {
    let mut v = Viewport::new();
    v.zoom_to_range(0.4, 0.2).unwrap();
    assert!(approx(v.pan_offset(), 0.2));
    assert!(approx(v.zoom_factor(), 5.0));
}

#[test]
fn degenerate_range_is_rejected_and_viewport_unchanged() {
    let mut v = Viewport::new();
    v.zoom_to_range(0.1, 0.6).unwrap();
    let before = v;
    let err = v.zoom_to_range(0.3, 0.3).unwrap_err();
    assert!(matches!(err, ViewerError::DegenerateZoomRange { .. }));
    assert!(v.zoom_to_range(0.3, f64::NAN).is_err());
    assert_eq!(v, before);
}

#[test]
fn range_past_the_end_is_clamped() {
    let mut v = Viewport::new();
    v.zoom_to_range(0.9, 1.2).unwrap();
    let (start, end) = v.visible_range();
    assert!(approx(start, 0.7));
    assert!(approx(end, 1.0));
}

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut v = Viewport::new();
    let width = 1000.0;
    let cursor_px = 250.0;
    let under_cursor = v.to_data_fraction_x(cursor_px, width);

    v.zoom_in(cursor_px / width);
    assert_eq!(v.zoom_factor(), 2.0);
    assert!(approx(v.to_data_fraction_x(cursor_px, width), under_cursor));

    v.zoom_in(cursor_px / width);
    assert!(approx(v.to_data_fraction_x(cursor_px, width), under_cursor));
}

#[test]
fn zooming_out_never_goes_below_full_view() {
    let mut v = Viewport::new();
    v.zoom_in(0.8);
    v.zoom_out(0.1);
    v.zoom_out(0.1);
    assert_eq!(v.zoom_factor(), 1.0);
    assert_eq!(v.pan_offset(), 0.0);
    assert!(!v.is_zoomed());
}

#[test]
fn invariant_holds_after_any_zoom() {
    let mut v = Viewport::new();
    for (center, factor) in [(0.9, 3.0), (0.1, 0.7), (1.0, 10.0), (0.0, 0.2), (0.5, 1.5)] {
        v.zoom(center, factor);
        let (start, end) = v.visible_range();
        assert!(v.zoom_factor() >= 1.0);
        assert!(start >= 0.0);
        assert!(end <= 1.0 + 1e-12);
    }
}
