use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

#[test]
fn new_block_is_zeroed_with_stride() {
    let b = Block::new(3, 2, PixelFormat::RGBA16).unwrap();
    assert_eq!(b.stride(), 24);
    assert_eq!(b.data().len(), 48);
    assert!(b.data().iter().all(|&v| v == 0));
    assert!(b.is_owned());
    assert_eq!(b.rect(), Rect::new(0, 0, 3, 2));
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(Block::new(0, 4, PixelFormat::RGBA8).is_err());
    assert!(Block::new(4, 0, PixelFormat::RGBA8).is_err());
}

#[test]
fn buffer_size_must_match() {
    let err = Block::from_vec(2, 2, PixelFormat::RGBA8, vec![0; 15]).unwrap_err();
    assert!(matches!(err, PigmentError::Validation(_)));
    let mut raw = vec![0u8; 12];
    assert!(Block::from_external(2, 2, PixelFormat::RGB8, &mut raw[..11]).is_err());
}

#[test]
fn external_block_writes_into_caller_memory() {
    let mut raw = vec![0u8; 8];
    {
        let mut b = Block::from_external(2, 1, PixelFormat::RGBA8, &mut raw).unwrap();
        assert!(!b.is_owned());
        b.set_pixel(1, 0, &PixelValue::rgba8(9, 8, 7, 6)).unwrap();
    }
    assert_eq!(raw, vec![0, 0, 0, 0, 9, 8, 7, 6]);
}

#[test]
fn proxy_and_value_access() {
    let mut b = Block::new(2, 2, PixelFormat::BGRA8).unwrap();
    {
        let mut p = b.pixel_proxy(1, 1).unwrap();
        p.set_color_sample::<u8>(0, 200);
    }
    assert_eq!(b.row(1).unwrap(), &[0, 0, 0, 0, 0, 0, 200, 0]);
    let v = b.pixel_value(1, 1).unwrap();
    assert_eq!(v.color_sample::<u8>(0), 200);
    assert!(b.pixel(2, 0).is_none());
    assert!(b.set_pixel(0, 5, &v).is_err());
}

#[test]
fn set_pixel_rejects_other_format() {
    let mut b = Block::new(1, 1, PixelFormat::RGBA8).unwrap();
    let px = PixelValue::new(PixelFormat::RGBA16);
    assert!(matches!(b.set_pixel(0, 0, &px), Err(PigmentError::Format(_))));
}

#[test]
fn profile_must_match_model() {
    let b = Block::new(1, 1, PixelFormat::GA8).unwrap();
    assert!(b.with_profile(Arc::new(ColorProfile::srgb())).is_err());

    let b = Block::new(1, 1, PixelFormat::HSLA8).unwrap();
    let b = b.with_profile(Arc::new(ColorProfile::display_p3())).unwrap();
    assert_eq!(b.profile().unwrap().name(), "display-p3");
}

#[test]
fn invalidate_calls_registered_callback() {
    let hits = AtomicUsize::new(0);
    let mut b = Block::new(4, 4, PixelFormat::RGBA8).unwrap();
    b.invalidate(Rect::new(0, 0, 1, 1));
    b.set_invalidate_callback(|r: &Rect| {
        assert_eq!(*r, Rect::new(1, 2, 3, 1));
        hits.fetch_add(1, Ordering::SeqCst);
    });
    b.invalidate(Rect::new(1, 2, 3, 1));
    b.clear_invalidate_callback();
    b.invalidate(Rect::new(1, 2, 3, 1));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn rows_iterate_scanlines() {
    let data: Vec<u8> = (0..12).collect();
    let b = Block::from_vec(2, 2, PixelFormat::RGB8, data).unwrap();
    let rows: Vec<&[u8]> = b.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], &[6, 7, 8, 9, 10, 11]);
}

#[test]
fn row_lookup_past_the_end_is_none() {
    let mut b = Block::new(2, 3, PixelFormat::RGB8).unwrap();
    assert_eq!(b.row(2).map(<[u8]>::len), Some(6));
    for y in [3, usize::MAX / 2, usize::MAX] {
        assert!(b.row(y).is_none());
        assert!(b.row_mut(y).is_none());
    }
}
