#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// clamp
// =============================================================

#[test]
fn clamp_inside_range_is_identity() {
    assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
}

#[test]
fn clamp_below_min_saturates_low() {
    assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
}

#[test]
fn clamp_above_max_saturates_high() {
    assert_eq!(clamp(42.0, 0.0, 10.0), 10.0);
}

#[test]
fn clamp_inverted_range_returns_min() {
    assert_eq!(clamp(5.0, 0.0, -20.0), 0.0);
    assert_eq!(clamp(-50.0, 0.0, -20.0), 0.0);
}

#[test]
fn clamp_at_bounds() {
    assert_eq!(clamp(0.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_edges_and_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert!(point_approx_eq(r.center(), Point::new(60.0, 45.0)));
}

#[test]
fn rect_clamped_to_keeps_size() {
    let r = Rect::new(-30.0, 390.0, 100.0, 100.0).clamped_to(Size::new(400.0, 400.0));
    assert_eq!(r, Rect::new(0.0, 300.0, 100.0, 100.0));
}

#[test]
fn rect_clamped_to_inside_is_unchanged() {
    let r = Rect::new(50.0, 60.0, 100.0, 100.0);
    assert_eq!(r.clamped_to(Size::new(400.0, 400.0)), r);
}

#[test]
fn rect_wider_than_page_pins_to_origin() {
    let r = Rect::new(30.0, 30.0, 500.0, 80.0).clamped_to(Size::new(400.0, 400.0));
    assert_eq!(r.x, 0.0);
    assert_eq!(r.y, 30.0);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_default_is_one() {
    assert_eq!(Zoom::default().factor(), 1.0);
}

#[test]
fn zoom_new_clamps_factor() {
    assert_eq!(Zoom::new(3.0, 0.6, 1.6).factor(), 1.6);
    assert_eq!(Zoom::new(0.1, 0.6, 1.6).factor(), 0.6);
}

#[test]
fn zoom_steps_do_not_drift() {
    let mut zoom = Zoom::new(1.0, 0.6, 1.6);
    for _ in 0..6 {
        zoom.step_in(0.1);
    }
    assert_eq!(zoom.factor(), 1.6);
    for _ in 0..3 {
        zoom.step_out(0.1);
    }
    assert_eq!(zoom.factor(), 1.3);
}

#[test]
fn zoom_step_out_stops_at_min() {
    let mut zoom = Zoom::new(0.7, 0.6, 1.6);
    zoom.step_out(0.1);
    zoom.step_out(0.1);
    assert_eq!(zoom.factor(), 0.6);
}

#[test]
fn zoom_ignores_non_finite() {
    let mut zoom = Zoom::new(1.2, 0.6, 1.6);
    zoom.set(f64::NAN);
    assert_eq!(zoom.factor(), 1.2);
}

#[test]
fn zoom_percent_rounds() {
    assert_eq!(Zoom::new(1.1, 0.6, 1.6).percent(), 110);
}

// =============================================================
// PageSurface
// =============================================================

#[test]
fn to_local_identity_zoom_subtracts_origin() {
    let surface = PageSurface::new(100.0, 50.0, 400.0, 400.0);
    let local = surface.to_local(Point::new(150.0, 80.0), Zoom::default());
    assert!(point_approx_eq(local, Point::new(50.0, 30.0)));
}

#[test]
fn to_local_divides_by_zoom() {
    let zoom = Zoom::new(1.5, 0.6, 1.6);
    let surface = PageSurface::new(10.0, 10.0, 600.0, 600.0);
    let local = surface.to_local(Point::new(160.0, 310.0), zoom);
    assert!(point_approx_eq(local, Point::new(100.0, 200.0)));
}

#[test]
fn to_local_left_of_origin_is_negative() {
    let surface = PageSurface::new(100.0, 100.0, 400.0, 400.0);
    let local = surface.to_local(Point::new(50.0, 60.0), Zoom::default());
    assert!(point_approx_eq(local, Point::new(-50.0, -40.0)));
}

#[test]
fn page_size_removes_zoom() {
    let zoom = Zoom::new(0.8, 0.6, 1.6);
    let surface = PageSurface::new(0.0, 0.0, 320.0, 480.0);
    let size = surface.page_size(zoom);
    assert!(approx_eq(size.width, 400.0));
    assert!(approx_eq(size.height, 600.0));
}
