use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(BoothError::decode("x").to_string().contains("decode error:"));
    assert!(BoothError::encode("x").to_string().contains("encode error:"));
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn photo_count_mismatch_names_layout_and_counts() {
    let err = BoothError::PhotoCountMismatch {
        layout: LayoutKind::TwoByTwo,
        expected: 4,
        actual: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("two-by-two"));
    assert!(msg.contains("needs 4"));
    assert!(msg.contains("got 3"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
