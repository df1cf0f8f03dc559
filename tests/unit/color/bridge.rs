use super::*;
use crate::color::profile::ProfileRegistry;
use crate::image::pixel::PixelValue;

fn reg() -> ProfileRegistry {
    ProfileRegistry::new()
}

#[test]
fn diagnosis_flags() {
    let r = reg();
    let srgb = r.get("srgb").unwrap();
    let bgra16 = PixelFormat::BGRA8.with_sample_type(SampleType::U16);
    let d = Diagnosis::new(PixelFormat::RGBA8, &srgb, bgra16, &srgb);
    assert!(!d.same_format);
    assert!(!d.same_type);
    assert!(d.same_model);
    assert!(!d.same_layout);
    assert!(d.same_profile);
}

#[test]
fn connection_formats_per_model() {
    assert_eq!(connection_format(ColorModel::Hsv), PixelFormat::RGBAF);
    assert_eq!(connection_format(ColorModel::Cmyk), PixelFormat::CMYKA16);
    assert_eq!(connection_format(ColorModel::Grey), PixelFormat::GAF);
}

#[test]
fn identical_format_and_profile_is_raw_copy() {
    let r = reg();
    let srgb = r.get("srgb").unwrap();
    let c = PixelConverter::new(PixelFormat::RGBA8, &srgb, PixelFormat::RGBA8, &srgb).unwrap();
    assert!(c.is_raw_copy());
    assert!(!c.has_transform());
}

#[test]
fn hsl_to_rgb_shares_profile_and_skips_transform() {
    let r = reg();
    let srgb = r.default_for(ColorModel::Hsl).unwrap();
    let c = PixelConverter::new(PixelFormat::HSLAF, &srgb, PixelFormat::RGBA8, &srgb).unwrap();
    assert!(!c.has_transform());

    let src = PixelValue::from_norm(PixelFormat::HSLAF, &[0.0, 1.0, 0.5], 0.5).unwrap();
    let mut dst = PixelValue::new(PixelFormat::RGBA8);
    c.convert(&src, &mut dst, true);
    assert_eq!(dst.bytes(), &[255, 0, 0, 128]);
}

#[test]
fn drop_without_alpha_keeps_destination_alpha() {
    let r = reg();
    let srgb = r.get("srgb").unwrap();
    let c = PixelConverter::new(PixelFormat::RGBA8, &srgb, PixelFormat::RGBA16, &srgb).unwrap();
    let src = PixelValue::rgba8(255, 255, 255, 0);
    let mut dst = PixelValue::from_norm(PixelFormat::RGBA16, &[0.0; 3], 1.0).unwrap();
    c.convert(&src, &mut dst, false);
    assert_eq!(dst.alpha_sample::<u16>(), 65535);
    assert_eq!(dst.color_sample::<u16>(1), 65535);
}

#[test]
fn grey_to_rgb_goes_through_transform() {
    let r = reg();
    let grey = r.default_for(ColorModel::Grey).unwrap();
    let srgb = r.default_for(ColorModel::Rgb).unwrap();
    let c = PixelConverter::new(PixelFormat::GA8, &grey, PixelFormat::RGBA8, &srgb).unwrap();
    assert!(c.has_transform());

    for g in [0u8, 64, 128, 200, 255] {
        let src = PixelValue::from_bytes(PixelFormat::GA8, &[g, 255]).unwrap();
        let mut dst = PixelValue::new(PixelFormat::RGBA8);
        c.convert(&src, &mut dst, true);
        for ch in 0..3 {
            let v = dst.color_sample::<u8>(ch);
            assert!(v.abs_diff(g) <= 1, "grey {g} -> channel {ch} = {v}");
        }
        assert_eq!(dst.alpha_sample::<u8>(), 255);
    }
}

#[test]
fn profile_must_support_model() {
    let r = reg();
    let lab = r.get("lab-d65").unwrap();
    let srgb = r.get("srgb").unwrap();
    let err = PixelConverter::new(PixelFormat::RGBA8, &lab, PixelFormat::RGBA8, &srgb).unwrap_err();
    assert!(matches!(err, PigmentError::Conversion(_)));
}

#[test]
fn convert_run_handles_layout_swap() {
    let r = reg();
    let srgb = r.get("srgb").unwrap();
    let c = PixelConverter::new(PixelFormat::RGBA8, &srgb, PixelFormat::ABGR8, &srgb).unwrap();
    let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let mut dst = [0u8; 8];
    c.convert_run(&src, &mut dst);
    assert_eq!(dst, [4, 3, 2, 1, 8, 7, 6, 5]);
}
