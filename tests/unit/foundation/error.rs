use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlyphFxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        GlyphFxError::unsupported("x")
            .to_string()
            .contains("unsupported capability:")
    );
    assert!(
        GlyphFxError::exhausted("x")
            .to_string()
            .contains("resource exhausted:")
    );
    assert!(GlyphFxError::render("x").to_string().contains("render error:"));
    assert!(
        GlyphFxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlyphFxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn exhaustion_and_capability_errors_are_recoverable() {
    assert!(GlyphFxError::exhausted("cache").is_recoverable());
    assert!(GlyphFxError::unsupported("shader").is_recoverable());
    assert!(!GlyphFxError::validation("bad size").is_recoverable());
}
