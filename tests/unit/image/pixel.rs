use super::*;

#[test]
fn value_reads_logical_channels_through_layout() {
    let px = PixelValue::from_bytes(PixelFormat::BGRA8, &[10, 20, 30, 40]).unwrap();
    assert_eq!(px.color_sample::<u8>(0), 30);
    assert_eq!(px.color_sample::<u8>(2), 10);
    assert_eq!(px.alpha_sample::<u8>(), 40);
}

#[test]
fn formats_without_alpha_read_opaque() {
    let px = PixelValue::from_bytes(PixelFormat::RGB8, &[1, 2, 3]).unwrap();
    assert_eq!(px.alpha_sample::<u8>(), 255);
    assert_eq!(px.alpha_norm(), 1.0);

    let mut px = px;
    px.set_alpha_norm(0.0);
    assert_eq!(px.bytes(), &[1, 2, 3]);
}

#[test]
fn from_norm_rounds_into_storage() {
    let px = PixelValue::from_norm(PixelFormat::RGBA16, &[1.0, 0.5, 0.0], 1.0).unwrap();
    assert_eq!(px.color_sample::<u16>(0), 65535);
    assert_eq!(px.color_sample::<u16>(1), 32768);
    assert_eq!(px.alpha_sample::<u16>(), 65535);
}

#[test]
fn from_bytes_rejects_wrong_size() {
    let err = PixelValue::from_bytes(PixelFormat::RGBA8, &[1, 2, 3]).unwrap_err();
    assert!(matches!(err, PigmentError::Validation(_)));
}

#[test]
fn proxy_writes_through_to_buffer() {
    let mut buf = [0u8; 4];
    {
        let mut proxy = PixelProxy::new(PixelFormat::ARGB8, &mut buf);
        proxy.set_color_sample::<u8>(0, 200);
        proxy.set_alpha_sample::<u8>(99);
    }
    assert_eq!(buf, [99, 200, 0, 0]);
}

#[test]
fn assign_requires_matching_format() {
    let mut buf = [0u8; 4];
    let mut proxy = PixelProxy::new(PixelFormat::RGBA8, &mut buf);
    proxy.assign(&PixelValue::rgba8(1, 2, 3, 4)).unwrap();
    assert_eq!(proxy.bytes(), &[1, 2, 3, 4]);

    let other = PixelValue::new(PixelFormat::BGRA8);
    assert!(proxy.assign(&other).is_err());
}

#[test]
fn ref_to_value_detaches() {
    let buf = [5u8, 6, 7, 8];
    let v = PixelRef::new(PixelFormat::RGBA8, &buf).to_value();
    assert_eq!(v, PixelValue::rgba8(5, 6, 7, 8));
}
