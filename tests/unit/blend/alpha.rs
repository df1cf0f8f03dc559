use super::*;

const M: f64 = 255.0;

#[test]
fn normal_is_union_of_coverage() {
    assert_eq!(blend_alpha(AlphaMode::Normal, 0.0, 0.0, M), 0.0);
    assert_eq!(blend_alpha(AlphaMode::Normal, M, 0.0, M), M);
    assert_eq!(blend_alpha(AlphaMode::Normal, 0.0, 100.0, M), 100.0);
    assert_eq!(blend_alpha(AlphaMode::Normal, M, M, M), M);
}

#[test]
fn erase_removes_source_coverage() {
    assert_eq!(blend_alpha(AlphaMode::Erase, M, M, M), 0.0);
    assert_eq!(blend_alpha(AlphaMode::Erase, 200.0, 0.0, M), 200.0);
}

#[test]
fn saturating_arithmetic_modes() {
    assert_eq!(blend_alpha(AlphaMode::Sub, 10.0, 20.0, M), 0.0);
    assert_eq!(blend_alpha(AlphaMode::Sub, 30.0, 20.0, M), 10.0);
    assert_eq!(blend_alpha(AlphaMode::Add, 200.0, 100.0, M), M);
    assert_eq!(blend_alpha(AlphaMode::Mul, M, 51.0, M), 51.0);
}

#[test]
fn selection_modes() {
    assert_eq!(blend_alpha(AlphaMode::Top, 1.0, 2.0, M), 2.0);
    assert_eq!(blend_alpha(AlphaMode::Back, 1.0, 2.0, M), 1.0);
    assert_eq!(blend_alpha(AlphaMode::Min, 1.0, 2.0, M), 1.0);
    assert_eq!(blend_alpha(AlphaMode::Max, 1.0, 2.0, M), 2.0);
}

#[test]
fn every_mode_stays_in_range() {
    for mode in AlphaMode::ALL {
        for b in (0..=255).step_by(15) {
            for s in (0..=255).step_by(15) {
                let v = blend_alpha(mode, f64::from(b), f64::from(s), M);
                assert!((0.0..=M).contains(&v), "{mode} {b} {s}");
            }
        }
    }
}
