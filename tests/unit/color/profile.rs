use super::*;

fn close(a: &[f64], b: &[f64], eps: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < eps)
}

#[test]
fn srgb_white_maps_to_d65() {
    let xyz = ColorProfile::srgb().to_xyz(&[1.0, 1.0, 1.0]);
    assert!(close(&xyz, &D65_WHITE, 1e-3));
}

#[test]
fn transfer_curves_invert() {
    for tf in [TransferFn::Linear, TransferFn::Srgb, TransferFn::Gamma(2.2)] {
        for i in 0..=20 {
            let v = f64::from(i) / 20.0;
            assert!((tf.encode(tf.decode(v)) - v).abs() < 1e-9, "{tf:?} {v}");
        }
    }
}

#[test]
fn rgb_profiles_round_trip_through_xyz() {
    for p in [ColorProfile::srgb(), ColorProfile::display_p3(), ColorProfile::adobe_rgb()] {
        let rgb = [0.2, 0.5, 0.8];
        let back = p.from_xyz(p.to_xyz(&rgb));
        assert!(close(&back, &rgb, 1e-9), "{}", p.name());
    }
}

#[test]
fn lab_of_white_is_100() {
    let lab = xyz_to_lab(D65_WHITE, D65_WHITE);
    assert!(close(&lab, &[100.0, 0.0, 0.0], 1e-9));
    let xyz = lab_to_xyz([50.0, 20.0, -30.0], D65_WHITE);
    assert!(close(&xyz_to_lab(xyz, D65_WHITE), &[50.0, 20.0, -30.0], 1e-9));
}

#[test]
fn singular_matrix_is_rejected() {
    let err = ColorProfile::rgb_matrix("flat", [[0.0; 3]; 3], TransferFn::Linear).unwrap_err();
    assert!(matches!(err, PigmentError::Validation(_)));
}

#[test]
fn registry_defaults_are_shared_instances() {
    let reg = ProfileRegistry::new();
    let rgb = reg.default_for(ColorModel::Rgb).unwrap();
    let hsl = reg.default_for(ColorModel::Hsl).unwrap();
    assert!(Arc::ptr_eq(&rgb, &hsl));
    assert_eq!(rgb.name(), "srgb");
    assert_eq!(reg.default_for(ColorModel::Grey).unwrap().name(), "gray-srgb");
}

#[test]
fn set_default_checks_model_support() {
    let mut reg = ProfileRegistry::new();
    reg.set_default(ColorModel::Rgb, "display-p3").unwrap();
    assert_eq!(reg.default_for(ColorModel::Rgb).unwrap().name(), "display-p3");
    assert!(reg.set_default(ColorModel::Rgb, "lab-d65").is_err());
    assert!(reg.set_default(ColorModel::Rgb, "missing").is_err());
}

#[test]
fn same_profile_accepts_equal_descriptions() {
    let a = Arc::new(ColorProfile::srgb());
    let b = Arc::new(ColorProfile::srgb());
    assert!(same_profile(&a, &b));
    assert!(!same_profile(&a, &Arc::new(ColorProfile::linear_srgb())));
}

#[test]
fn transform_srgb_to_linear_decodes() {
    let t = ProfileTransform::new(
        Arc::new(ColorProfile::srgb()),
        Arc::new(ColorProfile::linear_srgb()),
    );
    let out = t.apply(&[0.5, 0.5, 0.5]);
    let expected = TransferFn::Srgb.decode(0.5);
    assert!(close(&out, &[expected; 3], 1e-9));
}
