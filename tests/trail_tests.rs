// Host-side tests for the cursor trail field.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod smudge {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod trail {
        include!("../src/core/trail.rs");
    }
}

use glam::Vec2;
use smudge::constants::*;
use smudge::trail::*;

fn pixel(field: &TrailField, x: u32, y: u32) -> [u8; 4] {
    let (w, _) = field.size();
    let i = ((y * w + x) * 4) as usize;
    let p = field.pixels();
    [p[i], p[i + 1], p[i + 2], p[i + 3]]
}

fn is_cleared(field: &TrailField) -> bool {
    field.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255])
}

#[test]
fn first_point_has_no_motion() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.5, 0.5);
    let p = field.points()[0];
    assert_eq!(p.velocity, Vec2::ZERO);
    assert_eq!(p.force, 0.0);
    assert_eq!(p.age, 0);
}

#[test]
fn second_point_carries_direction_and_force() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.5, 0.5);
    field.add_point(0.6, 0.5);
    let p = field.points()[1];
    assert!((p.velocity.x - 1.0).abs() < 1e-5);
    assert!(p.velocity.y.abs() < 1e-5);
    // 10000 * 0.01 saturates
    assert_eq!(p.force, 1.0);
}

#[test]
fn small_moves_give_proportional_force() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.5, 0.5);
    field.add_point(0.5, 0.505);
    let p = field.points()[1];
    assert!((p.force - 0.25).abs() < 1e-3);
    assert!((p.velocity.y - 1.0).abs() < 1e-5);
}

#[test]
fn repeated_position_does_not_produce_nan() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.3, 0.3);
    field.add_point(0.3, 0.3);
    let p = field.points()[1];
    assert_eq!(p.velocity, Vec2::ZERO);
    assert_eq!(p.force, 0.0);
    field.update();
    assert!(field.points().iter().all(|p| p.velocity.is_finite()));
}

#[test]
fn moving_sample_paints_direction_color() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.5, 0.5);
    field.add_point(0.6, 0.5);
    // peak of the envelope
    for _ in 0..15 {
        field.update();
    }
    let [r, g, b, a] = pixel(&field, 36, 30);
    assert!((r as i32 - 51).abs() <= 1, "red {}", r);
    assert!((g as i32 - 26).abs() <= 1, "green {}", g);
    assert!((b as i32 - 51).abs() <= 1, "blue {}", b);
    assert_eq!(a, 255);
    // far corner untouched
    assert_eq!(pixel(&field, 0, 0), [0, 0, 0, 255]);
}

#[test]
fn samples_expire_after_max_age() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.5, 0.5);
    field.add_point(0.6, 0.5);
    for _ in 0..TRAIL_MAX_AGE {
        field.update();
    }
    assert_eq!(field.points().len(), 2);

    field.update();
    assert!(field.points().is_empty());
    assert!(is_cleared(&field));
    assert!(field.has_residual());

    field.update();
    assert!(!field.has_residual());
    assert!(is_cleared(&field));
}

#[test]
fn idle_field_is_not_redrawn() {
    let mut field = TrailField::new(1.0);
    assert!(field.take_dirty());
    assert!(!field.take_dirty());
    field.update();
    assert!(!field.take_dirty());
    field.add_point(0.1, 0.1);
    field.update();
    assert!(field.take_dirty());
}

#[test]
fn reset_clears_points_and_raster() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.2, 0.2);
    field.add_point(0.4, 0.4);
    for _ in 0..10 {
        field.update();
    }
    assert!(!is_cleared(&field));

    field.reset();
    assert!(field.points().is_empty());
    assert!(is_cleared(&field));
    assert!(!field.has_residual());

    // next sample starts a new stroke
    field.add_point(0.9, 0.9);
    assert_eq!(field.points()[0].force, 0.0);
}

#[test]
fn resize_follows_aspect_and_breaks_the_stroke() {
    let mut field = TrailField::new(1.0);
    assert_eq!(field.size(), (TRAIL_WIDTH, TRAIL_WIDTH));
    field.add_point(0.5, 0.5);

    field.resize(2.0);
    assert_eq!(field.size(), (TRAIL_WIDTH, 2 * TRAIL_WIDTH));
    assert_eq!(field.pixels().len(), (TRAIL_WIDTH * 2 * TRAIL_WIDTH * 4) as usize);
    assert!(is_cleared(&field));

    field.add_point(0.9, 0.9);
    assert_eq!(field.points().last().map(|p| p.force), Some(0.0));
}

#[test]
fn raster_height_handles_degenerate_aspect() {
    assert_eq!(TrailField::new(0.5).size(), (60, 30));
    assert_eq!(TrailField::new(0.0).size(), (60, 60));
    assert_eq!(TrailField::new(f32::NAN).size(), (60, 60));
    assert_eq!(TrailField::new(0.001).size(), (60, 1));
}

#[test]
fn envelope_rises_then_falls() {
    assert_eq!(intensity(0), 0.0);
    assert!((intensity(15) - 1.0).abs() < 1e-6);
    assert!(intensity(TRAIL_MAX_AGE).abs() < 1e-6);

    for age in 1..15 {
        assert!(intensity(age) > intensity(age - 1));
    }
    for age in 16..=TRAIL_MAX_AGE {
        assert!(intensity(age) < intensity(age - 1));
    }
    for age in 0..=TRAIL_MAX_AGE + 5 {
        let s = intensity(age);
        assert!((0.0..=1.0).contains(&s));
    }
}

#[test]
fn update_after_reset_leaves_nothing_pending() {
    let mut field = TrailField::new(1.0);
    field.add_point(0.2, 0.2);
    field.add_point(0.4, 0.4);
    for _ in 0..10 {
        field.update();
    }
    field.reset();
    assert!(field.take_dirty());

    field.update();
    assert!(!field.has_residual());
    assert!(is_cleared(&field));
    assert!(!field.take_dirty());
}
