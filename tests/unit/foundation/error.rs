use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PigmentError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PigmentError::format("x")
            .to_string()
            .contains("format error:")
    );
    assert!(
        PigmentError::conversion("x")
            .to_string()
            .contains("conversion error:")
    );
    assert!(PigmentError::pool("x").to_string().contains("pool error:"));
    assert!(
        PigmentError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PigmentError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
