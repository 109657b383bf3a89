use scene::{EngineCore, SceneEngine};

use super::*;

#[test]
fn attach_adopts_viewport_size() {
    let mut vp = Viewport::new(2.0);
    vp.resize(100.0, 50.0, 1.0);
    let mut surface = HeadlessSurface::new();
    surface.attach(&vp).unwrap();
    assert_eq!(surface.pixel_size(), (200, 100));
}

#[test]
fn resize_tracks_pixel_size() {
    let mut vp = Viewport::new(1.0);
    let mut surface = HeadlessSurface::new();
    surface.attach(&vp).unwrap();
    vp.resize(640.0, 480.0, 3.0);
    surface.resize(&vp);
    assert_eq!(surface.pixel_size(), (640, 480));
}

#[test]
fn present_counts_frames_and_shapes() {
    let mut engine = EngineCore::new();
    engine.execute_raw(&serde_json::json!({
        "type": "createRectangle", "x": 0, "y": 0, "width": 1, "height": 1, "color": "#fff"
    }));
    let vp = Viewport::new(1.0);
    let mut surface = HeadlessSurface::new();
    surface.present(&engine.tick(), &vp).unwrap();
    surface.present(&engine.tick(), &vp).unwrap();
    assert_eq!(surface.frames(), 2);
    assert_eq!(surface.last_shape_count(), 1);
}

#[test]
fn render_errors_describe_cause() {
    assert_eq!(
        RenderError::Unavailable("no 2d context".into()).to_string(),
        "render target unavailable: no 2d context"
    );
    assert_eq!(RenderError::Draw("oops".into()).to_string(), "frame draw failed: oops");
}
