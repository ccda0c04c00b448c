// Host-side tests for element boxes, viewport sizing and quad placement.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod smudge {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod layout {
        include!("../src/core/layout.rs");
    }
}

use glam::Vec2;
use smudge::layout::*;

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[test]
fn normalize_maps_box_corners() {
    let r = Rect::new(100.0, 50.0, 200.0, 100.0);
    assert_eq!(r.normalize(100.0, 50.0), Some(Vec2::new(0.0, 0.0)));
    assert_eq!(r.normalize(300.0, 150.0), Some(Vec2::new(1.0, 1.0)));
    assert_eq!(r.normalize(200.0, 100.0), Some(Vec2::new(0.5, 0.5)));
}

#[test]
fn normalize_clamps_outside_points() {
    let r = Rect::new(100.0, 50.0, 200.0, 100.0);
    assert_eq!(r.normalize(0.0, 500.0), Some(Vec2::new(0.0, 1.0)));
}

#[test]
fn empty_box_has_no_mapping() {
    let r = Rect::new(10.0, 10.0, 0.0, 50.0);
    assert_eq!(r.normalize(10.0, 10.0), None);
    assert_eq!(r.aspect(), 1.0);
}

#[test]
fn aspect_is_height_over_width() {
    assert_eq!(Rect::new(0.0, 0.0, 400.0, 200.0).aspect(), 0.5);
}

#[test]
fn contains_includes_edges() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(0.0, 10.0));
    assert!(!r.contains(10.5, 5.0));
}

#[test]
fn pixel_ratio_is_capped() {
    assert_eq!(Viewport::new(800.0, 600.0, 3.0).pixel_ratio, 1.5);
    assert_eq!(Viewport::new(800.0, 600.0, 1.0).pixel_ratio, 1.0);
    // low-density screens keep their own ratio
    assert_eq!(Viewport::new(800.0, 600.0, 0.75).pixel_ratio, 0.75);
    assert_eq!(Viewport::new(800.0, 600.0, 0.0).pixel_ratio, 1.0);
}

#[test]
fn backing_size_scales_by_ratio() {
    assert_eq!(Viewport::new(800.0, 600.0, 2.0).backing_size(), (1200, 900));
    assert_eq!(Viewport::new(0.0, 0.0, 1.0).backing_size(), (1, 1));
}

#[test]
fn full_viewport_box_covers_clip_space() {
    let vp = Viewport::new(800.0, 600.0, 1.0);
    let q = QuadTransform::from_rect(&Rect::new(0.0, 0.0, 800.0, 600.0), &vp);
    assert!(approx(q.center, Vec2::ZERO));
    assert!(approx(q.half_extent, Vec2::ONE));
}

#[test]
fn top_left_quarter_maps_to_upper_left() {
    let vp = Viewport::new(800.0, 600.0, 1.0);
    let q = QuadTransform::from_rect(&Rect::new(0.0, 0.0, 400.0, 300.0), &vp);
    assert!(approx(q.center, Vec2::new(-0.5, 0.5)));
    assert!(approx(q.half_extent, Vec2::new(0.5, 0.5)));
    assert_eq!(q.to_array(), [q.center.x, q.center.y, 0.5, 0.5]);
}

#[test]
fn local_point_rejects_outside_points() {
    let r = Rect::new(100.0, 50.0, 200.0, 100.0);
    assert_eq!(r.local_point(200.0, 100.0), Some(Vec2::new(0.5, 0.5)));
    assert_eq!(r.local_point(100.0, 150.0), Some(Vec2::new(0.0, 1.0)));
    assert_eq!(r.local_point(99.0, 100.0), None);
    assert_eq!(r.local_point(200.0, 151.0), None);
    assert_eq!(Rect::new(0.0, 0.0, 0.0, 0.0).local_point(0.0, 0.0), None);
}

#[test]
fn client_size_excludes_scrollbar() {
    let vp = Viewport::from_client(Vec2::new(1265.0, 800.0), Vec2::new(1280.0, 800.0), 1.0);
    assert_eq!(vp.size(), Vec2::new(1265.0, 800.0));

    // quad edges land on the element's box in canvas pixels
    let q = QuadTransform::from_rect(&Rect::new(1000.0, 100.0, 200.0, 100.0), &vp);
    let left_px = (q.center.x - q.half_extent.x + 1.0) * 0.5 * vp.width;
    let right_px = (q.center.x + q.half_extent.x + 1.0) * 0.5 * vp.width;
    assert!((left_px - 1000.0).abs() < 1e-2);
    assert!((right_px - 1200.0).abs() < 1e-2);
}

#[test]
fn unknown_client_size_falls_back_to_inner() {
    let vp = Viewport::from_client(Vec2::ZERO, Vec2::new(1280.0, 720.0), 2.0);
    assert_eq!(vp.size(), Vec2::new(1280.0, 720.0));
    assert_eq!(vp.backing_size(), (1920, 1080));
}
