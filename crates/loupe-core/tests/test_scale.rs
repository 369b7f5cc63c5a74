use approx::assert_relative_eq;

use loupe_core::geometry::Size;
use loupe_core::scale::{compute_metrics, magnified_size, scale_factors, ZoomMode};

const NATURAL: Size = Size {
    width: 800.0,
    height: 500.0,
};
const DISPLAY: Size = Size {
    width: 400.0,
    height: 250.0,
};

#[test]
fn test_scale_is_natural_over_display() {
    let scale = scale_factors(NATURAL, DISPLAY).unwrap();
    assert_relative_eq!(scale.x, 2.0);
    assert_relative_eq!(scale.y, 2.0);
}

#[test]
fn test_doubling_natural_width_doubles_scale_x() {
    let base = scale_factors(NATURAL, DISPLAY).unwrap();
    let doubled = scale_factors(Size::new(1600.0, 500.0), DISPLAY).unwrap();
    assert_relative_eq!(doubled.x, base.x * 2.0);
    assert_relative_eq!(doubled.y, base.y);
}

#[test]
fn test_zero_display_has_no_scale() {
    assert!(scale_factors(NATURAL, Size::new(0.0, 250.0)).is_none());
    assert!(scale_factors(NATURAL, Size::new(400.0, -1.0)).is_none());
}

#[test]
fn test_unloaded_image_has_no_scale() {
    assert!(scale_factors(Size::ZERO, DISPLAY).is_none());
    assert!(compute_metrics(Size::ZERO, DISPLAY, ZoomMode::Scale(2.0), None).is_none());
}

#[test]
fn test_fixed_width_metrics() {
    let m = compute_metrics(NATURAL, DISPLAY, ZoomMode::FixedWidth(500.0), None).unwrap();
    assert_relative_eq!(m.scale.x, 2.0);
    assert_relative_eq!(m.scale.y, 2.0);
    assert_relative_eq!(m.magnified.width, 500.0);
    assert_relative_eq!(m.magnified.height, 250.0);
    assert_relative_eq!(m.lens.width, 250.0);
    // Lens height follows the display height, not the zoom width.
    assert_relative_eq!(m.lens.height, 125.0);
}

#[test]
fn test_scale_mode_magnified_size() {
    let m = compute_metrics(NATURAL, DISPLAY, ZoomMode::Scale(1.5), None).unwrap();
    assert_relative_eq!(m.magnified.width, 600.0);
    assert_relative_eq!(m.magnified.height, 375.0);
    assert_relative_eq!(m.lens.width, 300.0);
    assert_relative_eq!(m.lens.height, 187.5);
}

#[test]
fn test_scale_mode_lens_equals_display_times_factor_over_scale() {
    let natural = Size::new(1234.0, 777.0);
    let m = compute_metrics(natural, DISPLAY, ZoomMode::Scale(2.5), None).unwrap();
    assert_relative_eq!(m.lens.width, DISPLAY.width * 2.5 / m.scale.x, epsilon = 1e-9);
    assert_relative_eq!(m.lens.height, DISPLAY.height * 2.5 / m.scale.y, epsilon = 1e-9);
}

#[test]
fn test_auto_fit_uses_measured_box() {
    let measured = Size::new(300.0, 200.0);
    let m = compute_metrics(NATURAL, DISPLAY, ZoomMode::AutoFit, Some(measured)).unwrap();
    assert_eq!(m.magnified, measured);
    assert_relative_eq!(m.lens.width, 150.0);
    assert_relative_eq!(m.lens.height, 100.0);
}

#[test]
fn test_auto_fit_without_measurement_falls_back_to_display() {
    assert_eq!(magnified_size(ZoomMode::AutoFit, DISPLAY, Some(Size::ZERO)), DISPLAY);
    assert_eq!(magnified_size(ZoomMode::AutoFit, DISPLAY, None), DISPLAY);
}

#[test]
fn test_metrics_are_idempotent() {
    let a = compute_metrics(NATURAL, DISPLAY, ZoomMode::Scale(1.5), None);
    let b = compute_metrics(NATURAL, DISPLAY, ZoomMode::Scale(1.5), None);
    assert_eq!(a, b);
}

#[test]
fn test_zoom_mode_display() {
    assert_eq!(format!("{}", ZoomMode::AutoFit), "Auto Fit");
    assert!(format!("{}", ZoomMode::FixedWidth(500.0)).contains("500"));
    assert!(format!("{}", ZoomMode::Scale(1.5)).contains("1.5"));
}
