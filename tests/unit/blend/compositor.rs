use super::*;

const M: f64 = 255.0;

#[test]
fn transparent_source_keeps_backdrop() {
    let t = AlphaTerms::new(AlphaMode::Normal, 200.0, 0.0, M);
    assert_eq!(t.var, 0.0);
    assert_eq!(t.result, 200.0);
    assert_eq!(composite(77.0, 10.0, 250.0, t.back, t.var, M), 77.0);
}

#[test]
fn fully_transparent_pair_has_zero_var() {
    let t = AlphaTerms::new(AlphaMode::Normal, 0.0, 0.0, M);
    assert_eq!(t.var, 0.0);
    assert_eq!(t.result, 0.0);
}

#[test]
fn opaque_source_over_transparent_backdrop_is_source() {
    let t = AlphaTerms::new(AlphaMode::Normal, 0.0, M, M);
    assert_eq!(t.var, M);
    // With no backdrop coverage the blend function is irrelevant.
    assert_eq!(composite(12.0, 99.0, 3.0, t.back, t.var, M), 99.0);
}

#[test]
fn opaque_pair_yields_blend_result() {
    let t = AlphaTerms::new(AlphaMode::Normal, M, M, M);
    assert_eq!(composite(12.0, 99.0, 42.0, t.back, t.var, M), 42.0);
}

#[test]
fn alpha_mode_only_changes_result_alpha() {
    let a = AlphaTerms::new(AlphaMode::Normal, 100.0, 50.0, M);
    let b = AlphaTerms::new(AlphaMode::Mul, 100.0, 50.0, M);
    assert_eq!(a.var, b.var);
    assert_ne!(a.result, b.result);
}
