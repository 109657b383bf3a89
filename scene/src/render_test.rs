#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_viewport_is_empty_at_unit_zoom() {
    let vp = Viewport::new(2.0);
    assert_eq!(vp.pixel_size(), (0, 0));
    assert_eq!(vp.zoom, 1.0);
    assert_eq!(vp.pixel_scale(), 2.0);
}

#[test]
fn pixel_size_scales_by_dpr_not_zoom() {
    let mut vp = Viewport::new(2.0);
    vp.resize(400.0, 300.0, 1.5);
    assert_eq!(vp.pixel_size(), (800, 600));
    assert_eq!(vp.pixel_scale(), 3.0);
}

#[test]
fn pixel_size_rounds_fractional_ratios() {
    let mut vp = Viewport::new(1.25);
    vp.resize(101.0, 3.0, 1.0);
    assert_eq!(vp.pixel_size(), (126, 4));
}

#[test]
fn resize_clamps_negative_sizes() {
    let mut vp = Viewport::new(1.0);
    vp.resize(-50.0, 20.0, 1.0);
    assert_eq!(vp.width, 0.0);
    assert_eq!(vp.pixel_size(), (0, 20));
}

#[test]
fn invalid_factors_fall_back_to_one() {
    let mut vp = Viewport::new(0.0);
    assert_eq!(vp.dpr, 1.0);
    vp.resize(10.0, 10.0, f64::NAN);
    assert_eq!(vp.zoom, 1.0);
    vp.resize(10.0, 10.0, -2.0);
    assert_eq!(vp.zoom, 1.0);
}
