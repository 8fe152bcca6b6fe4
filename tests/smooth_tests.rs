// Host-side tests for the smooth scroll engine and pointer smoothing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod ease {
    include!("../src/core/ease.rs");
}
mod smooth {
    include!("../src/core/smooth.rs");
}
mod pointer {
    include!("../src/core/pointer.rs");
}

use glam::Vec2;
use pointer::PointerSmoother;
use smooth::SmoothScroll;

fn engine(limit: f64) -> SmoothScroll {
    let mut s = SmoothScroll::default();
    s.set_limit(limit);
    s
}

fn run_frames(s: &mut SmoothScroll, frames: usize) {
    for _ in 0..frames {
        s.advance(1.0 / 60.0);
    }
}

#[test]
fn wheel_eases_toward_target_and_settles() {
    let mut s = engine(5000.0);
    assert!(s.on_wheel(600.0));
    assert_eq!(s.target(), 600.0);

    s.advance(0.2);
    let early = s.offset();
    assert!(early > 0.0 && early < 600.0);
    // exponential-out: most of the way there quickly
    assert!(early > 300.0, "offset after 0.2s was {}", early);

    run_frames(&mut s, 90);
    assert_eq!(s.offset(), 600.0);
    assert!(!s.is_animating());
    assert_eq!(s.advance(0.016), None);
}

#[test]
fn offset_never_overshoots() {
    let mut s = engine(5000.0);
    s.on_wheel(1000.0);
    let mut prev = 0.0;
    for _ in 0..100 {
        if let Some(off) = s.advance(1.0 / 60.0) {
            assert!(off >= prev && off <= 1000.0);
            prev = off;
        }
    }
}

#[test]
fn target_is_clamped_to_scroll_range() {
    let mut s = engine(300.0);
    s.on_wheel(1000.0);
    assert_eq!(s.target(), 300.0);
    s.on_wheel(-5000.0);
    assert_eq!(s.target(), 0.0);

    s.scroll_to(250.0, true);
    s.set_limit(200.0);
    assert_eq!(s.target(), 200.0);
}

#[test]
fn wheel_deltas_accumulate_on_the_target() {
    let mut s = engine(5000.0);
    s.on_wheel(100.0);
    s.advance(0.05);
    s.on_wheel(100.0);
    assert_eq!(s.target(), 200.0);
}

#[test]
fn stopped_engine_ignores_wheel_but_can_jump() {
    let mut s = engine(5000.0);
    s.on_wheel(400.0);
    s.advance(0.2);
    let here = s.offset();
    s.stop();
    assert!(s.is_stopped());
    assert!(!s.is_animating());
    assert_eq!(s.target(), here);

    assert!(!s.on_wheel(500.0));
    assert_eq!(s.advance(0.1), None);
    assert_eq!(s.offset(), here);

    s.scroll_to(0.0, true);
    assert_eq!(s.offset(), 0.0);

    s.start();
    assert!(s.on_wheel(50.0));
}

#[test]
fn native_scroll_resyncs_only_when_idle() {
    let mut s = engine(5000.0);
    s.sync_native(800.0);
    assert_eq!(s.offset(), 800.0);
    assert_eq!(s.target(), 800.0);

    s.on_wheel(100.0);
    s.sync_native(10.0);
    assert_eq!(s.target(), 900.0);
}

#[test]
fn smooth_scroll_to_animates() {
    let mut s = engine(5000.0);
    s.scroll_to(1200.0, false);
    assert!(s.is_animating());
    run_frames(&mut s, 120);
    assert_eq!(s.offset(), 1200.0);
}

#[test]
fn non_finite_input_is_ignored() {
    let mut s = engine(5000.0);
    assert!(!s.on_wheel(f64::NAN));
    s.scroll_to(f64::INFINITY, true);
    assert_eq!(s.offset(), 0.0);
    s.set_limit(f64::NAN);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn pointer_moves_a_fixed_fraction_per_frame() {
    let mut p = PointerSmoother::default();
    assert_eq!(p.position(), Vec2::splat(0.5));
    assert_eq!(p.active(), 0.0);

    p.on_move(Vec2::new(1.0, 0.5));
    p.step();
    assert!((p.position().x - 0.525).abs() < 1e-6);
    assert!((p.active() - 0.05).abs() < 1e-6);

    for _ in 0..300 {
        p.step();
    }
    assert!((p.position().x - 1.0).abs() < 1e-3);
    assert!((p.active() - 1.0).abs() < 1e-3);

    p.on_leave();
    for _ in 0..300 {
        p.step();
    }
    assert!(p.active() < 1e-3);
    // position is kept where the pointer left
    assert!((p.position().x - 1.0).abs() < 1e-3);
}

#[test]
fn pointer_targets_are_clamped_to_canvas() {
    let mut p = PointerSmoother::default();
    p.on_move(Vec2::new(-2.0, 4.0));
    for _ in 0..400 {
        p.step();
    }
    assert!(p.position().x >= 0.0 && p.position().x < 1e-3);
    assert!(p.position().y <= 1.0 && p.position().y > 1.0 - 1e-3);

    p.on_move(Vec2::new(f32::NAN, 0.5));
    p.step();
    assert!(p.position().is_finite());
}
