// Host-side tests for canvas sizing on high-density displays.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod density {
    include!("../src/density.rs");
}

use density::CanvasSize;

#[test]
fn backing_store_scales_with_pixel_ratio() {
    let size = CanvasSize::new(800.0, 600.0, 2.0);
    assert_eq!((size.css_width, size.css_height), (800.0, 600.0));
    assert_eq!((size.backing_width(), size.backing_height()), (1600, 1200));
}

#[test]
fn fractional_ratios_round_to_whole_pixels() {
    let size = CanvasSize::new(1280.0, 719.0, 1.5);
    assert_eq!((size.backing_width(), size.backing_height()), (1920, 1079));
}

#[test]
fn standard_density_keeps_css_size() {
    let size = CanvasSize::new(640.0, 480.0, 1.0);
    assert_eq!((size.backing_width(), size.backing_height()), (640, 480));
}

#[test]
fn bogus_ratio_falls_back_to_one() {
    for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        assert_eq!(CanvasSize::new(100.0, 50.0, ratio).pixel_ratio, 1.0);
    }
}

#[test]
fn bogus_sizes_clamp_to_zero() {
    let size = CanvasSize::new(-10.0, f64::NAN, 2.0);
    assert_eq!((size.css_width, size.css_height), (0.0, 0.0));
    assert_eq!((size.backing_width(), size.backing_height()), (0, 0));
}
