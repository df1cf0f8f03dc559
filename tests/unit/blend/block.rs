use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::image::pixel::{PixelAccess, PixelAccessMut};
use crate::ops::convert::convert_into;

fn ctx() -> Context {
    Context::new(Some(2)).unwrap()
}

fn solid<'a>(w: usize, h: usize, format: PixelFormat, px: &[u8]) -> Block<'a> {
    let data: Vec<u8> = std::iter::repeat_n(px, w * h).flatten().copied().collect();
    Block::from_vec(w, h, format, data).unwrap()
}

#[test]
fn params_defaults_and_builders() {
    let p = BlendParams::default();
    assert_eq!(p.mode, BlendMode::Normal);
    assert_eq!(p.alpha_mode, AlphaMode::Normal);
    assert_eq!(p.opacity, 1.0);
    assert!(p.invalidate);

    let p = BlendParams::new(BlendMode::Screen)
        .at(3, -2)
        .with_alpha_mode(AlphaMode::Max)
        .with_opacity(0.25)
        .with_invalidate(false);
    assert_eq!((p.x, p.y), (3, -2));
    assert_eq!(p.mode, BlendMode::Screen);
    assert_eq!(p.alpha_mode, AlphaMode::Max);
    assert!(!p.invalidate);
}

#[test]
fn params_deserialize_with_defaults() {
    let p: BlendParams =
        serde_json::from_str(r#"{"mode":"color-dodge","opacity":0.5,"x":4}"#).unwrap();
    assert_eq!(p.mode, BlendMode::ColorDodge);
    assert_eq!(p.opacity, 0.5);
    assert_eq!(p.x, 4);
    assert_eq!(p.alpha_mode, AlphaMode::Normal);
}

#[test]
fn opacity_out_of_range_is_rejected() {
    let ctx = ctx();
    let top = solid(2, 2, PixelFormat::RGBA8, &[1, 2, 3, 255]);
    let mut back = solid(2, 2, PixelFormat::RGBA8, &[0, 0, 0, 255]);
    for bad in [-0.1, 1.5, f32::NAN] {
        let err = blend(&ctx, &top, &mut back, &BlendParams::default().with_opacity(bad));
        assert!(matches!(err, Err(PigmentError::Validation(_))), "{bad}");
    }
    assert!(back.data().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn zero_opacity_is_a_silent_noop() {
    let ctx = ctx();
    let calls = AtomicUsize::new(0);
    let top = solid(2, 2, PixelFormat::RGBA8, &[1, 2, 3, 255]);
    let mut back = solid(2, 2, PixelFormat::RGBA8, &[9, 9, 9, 255]);
    back.set_invalidate_callback(|_| {
        calls.fetch_add(1, Ordering::SeqCst);
    });
    blend(&ctx, &top, &mut back, &BlendParams::default().with_opacity(0.0)).unwrap();
    assert!(back.data().chunks_exact(4).all(|p| p == [9, 9, 9, 255]));
    drop(back);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn offset_source_is_clipped_to_the_backdrop() {
    let ctx = ctx();
    let top = solid(3, 3, PixelFormat::RGBA8, &[255, 255, 255, 255]);
    let seen = std::sync::Mutex::new(Vec::new());
    let mut back = solid(4, 4, PixelFormat::RGBA8, &[0, 0, 0, 255]);
    back.set_invalidate_callback(|r| seen.lock().unwrap().push(*r));

    blend(&ctx, &top, &mut back, &BlendParams::default().at(2, -1)).unwrap();

    for y in 0..4 {
        for x in 0..4 {
            let px = back.pixel_value(x, y).unwrap();
            let expect = if x >= 2 && y < 2 { 255 } else { 0 };
            assert_eq!(px.bytes()[0], expect, "({x}, {y})");
        }
    }
    drop(back);
    assert_eq!(*seen.lock().unwrap(), vec![Rect::new(2, 0, 2, 2)]);
}

#[test]
fn disjoint_blocks_do_nothing() {
    let ctx = ctx();
    let top = solid(2, 2, PixelFormat::RGBA8, &[255, 0, 0, 255]);
    let mut back = solid(2, 2, PixelFormat::RGBA8, &[0, 0, 0, 255]);
    blend(&ctx, &top, &mut back, &BlendParams::default().at(5, 5)).unwrap();
    blend(&ctx, &top, &mut back, &BlendParams::default().at(-2, 0)).unwrap();
    assert!(back.data().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn blend_rect_aligns_blocks_at_origin() {
    let ctx = ctx();
    let top = solid(3, 3, PixelFormat::RGBA8, &[200, 0, 0, 255]);
    let mut back = solid(4, 4, PixelFormat::RGBA8, &[0, 0, 0, 255]);
    let params = BlendParams::default().at(100, 100);
    blend_rect(&ctx, &top, &mut back, Rect::new(1, 1, 10, 10), &params).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..3).contains(&x) && (1..3).contains(&y);
            let r = back.pixel_value(x, y).unwrap().bytes()[0];
            assert_eq!(r, if inside { 200 } else { 0 }, "({x}, {y})");
        }
    }
}

#[test]
fn cross_layout_source_is_bridged_first() {
    let ctx = ctx();
    let bgra = solid(2, 2, PixelFormat::BGRA8, &[30, 20, 10, 255]);
    let rgba = solid(2, 2, PixelFormat::RGBA8, &[10, 20, 30, 255]);
    let params = BlendParams::new(BlendMode::Screen).with_opacity(0.5);

    let mut a = solid(2, 2, PixelFormat::RGBA8, &[100, 100, 100, 255]);
    let mut b = solid(2, 2, PixelFormat::RGBA8, &[100, 100, 100, 255]);
    blend(&ctx, &bgra, &mut a, &params).unwrap();
    blend(&ctx, &rgba, &mut b, &params).unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn placement_at_coordinate_limits_is_a_no_op() {
    let ctx = ctx();
    let top = solid(4, 4, PixelFormat::RGBA8, &[9, 9, 9, 255]);
    let mut back = solid(4, 4, PixelFormat::RGBA8, &[1, 2, 3, 255]);
    for (x, y) in [(i32::MAX, 0), (0, i32::MAX), (i32::MIN, 0), (i32::MAX - 2, i32::MIN)] {
        blend(&ctx, &top, &mut back, &BlendParams::new(BlendMode::Normal).at(x, y)).unwrap();
    }
    assert_eq!(back.data(), solid(4, 4, PixelFormat::RGBA8, &[1, 2, 3, 255]).data());
}

#[test]
fn same_format_with_other_profile_is_bridged() {
    let ctx = ctx();
    let p3 = Arc::new(ColorProfile::display_p3());
    let top = solid(3, 2, PixelFormat::RGBA8, &[200, 40, 40, 255])
        .with_profile(p3)
        .unwrap();
    let params = BlendParams::new(BlendMode::Multiply).with_opacity(0.75);

    let mut in_srgb = Block::new(3, 2, PixelFormat::RGBA8).unwrap();
    convert_into(&ctx, &top, &mut in_srgb, PerformanceOptions::scalar()).unwrap();
    assert_ne!(in_srgb.data(), top.data());

    let mut bridged = solid(3, 2, PixelFormat::RGBA8, &[120, 160, 200, 255]);
    let mut reference = solid(3, 2, PixelFormat::RGBA8, &[120, 160, 200, 255]);
    let mut untagged = solid(3, 2, PixelFormat::RGBA8, &[120, 160, 200, 255]);
    blend(&ctx, &top, &mut bridged, &params).unwrap();
    blend(&ctx, &in_srgb, &mut reference, &params).unwrap();
    blend(&ctx, &solid(3, 2, PixelFormat::RGBA8, &[200, 40, 40, 255]), &mut untagged, &params)
        .unwrap();
    assert_eq!(bridged.data(), reference.data());
    assert_ne!(bridged.data(), untagged.data());
}

#[test]
fn wide_samples_use_the_generic_path() {
    let ctx = ctx();
    let top = Block::new(2, 1, PixelFormat::RGBAF).unwrap();
    let mut back = Block::new(2, 1, PixelFormat::RGBAF).unwrap();
    {
        let mut p = back.pixel_proxy(0, 0).unwrap();
        p.set_color_norm(0, 0.5);
        p.set_alpha_norm(1.0);
    }
    blend(&ctx, &top, &mut back, &BlendParams::new(BlendMode::Multiply)).unwrap();
    let px = back.pixel(0, 0).unwrap();
    assert!((px.color_norm(0) - 0.5).abs() < 1e-6);
    assert!((px.alpha_norm() - 1.0).abs() < 1e-6);
}
