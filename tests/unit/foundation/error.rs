use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LoomError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LoomError::storage("x").to_string().contains("storage error:"));
    assert!(LoomError::render("x").to_string().contains("render error:"));
    assert!(LoomError::export("x").to_string().contains("export error:"));
    assert!(LoomError::host("x").to_string().contains("host error:"));
    assert!(
        LoomError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LoomError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: LoomError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, LoomError::Serde(_)));
}
