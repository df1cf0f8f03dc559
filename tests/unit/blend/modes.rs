use super::*;

#[test]
fn names_round_trip_through_from_str() {
    for m in BlendMode::ALL {
        assert_eq!(m.name().parse::<BlendMode>().unwrap(), m);
    }
    for m in AlphaMode::ALL {
        assert_eq!(m.to_string().parse::<AlphaMode>().unwrap(), m);
    }
    assert!("nope".parse::<BlendMode>().is_err());
}

#[test]
fn serde_names_match_display() {
    let json = serde_json::to_string(&BlendMode::ColorBurn).unwrap();
    assert_eq!(json, "\"color-burn\"");
    let m: AlphaMode = serde_json::from_str("\"max\"").unwrap();
    assert_eq!(m, AlphaMode::Max);
}

#[test]
fn non_separable_set() {
    let ns: Vec<_> = BlendMode::ALL
        .into_iter()
        .filter(|m| m.is_non_separable())
        .collect();
    assert_eq!(
        ns,
        vec![
            BlendMode::Dissolve,
            BlendMode::DarkerColor,
            BlendMode::LighterColor,
            BlendMode::Hue,
            BlendMode::Saturation,
            BlendMode::Color,
            BlendMode::Luminosity,
        ]
    );
}
