use super::*;

fn striped() -> WeavePattern {
    let mut grid = [[false; WEAVE_WIDTH]; WEAVE_HEIGHT];
    for x in (0..WEAVE_WIDTH).step_by(3) {
        grid[5][x] = true;
    }
    grid[0][0] = true;
    WeavePattern::from_generated(0x00AB_CDEF, grid, 5)
}

#[test]
fn signature_is_eight_uppercase_hex_digits() {
    assert_eq!(striped().signature(), "00ABCDEF");
}

#[test]
fn accessors_report_cells() {
    let p = striped();
    assert!(p.is_on(0, 0));
    assert!(p.is_on(3, 5));
    assert!(!p.is_on(1, 5));
    assert!(!p.is_on(WEAVE_WIDTH, 0));
    assert_eq!(p.on_cells(), 11);
    assert_eq!(p.to_ascii().lines().count(), WEAVE_HEIGHT);
}

#[test]
fn wire_form_uses_stored_field_names() {
    let v = serde_json::to_value(striped()).unwrap();
    assert_eq!(v["seed"], 0x00AB_CDEF);
    assert_eq!(v["W"], 28);
    assert_eq!(v["H"], 18);
    assert_eq!(v["stripeRow"], 5);
    assert_eq!(v["grid"].as_array().unwrap().len(), WEAVE_HEIGHT);
    assert_eq!(v["grid"][5][3], 1);
    assert_eq!(v["grid"][5][4], 0);
}

#[test]
fn decoding_restores_the_same_pattern() {
    let p = striped();
    let json = serde_json::to_string(&p).unwrap();
    let back: WeavePattern = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    assert_eq!(back.checksum(), p.checksum());
}

#[test]
fn decoding_rejects_wrong_shapes_and_values() {
    let mut v = serde_json::to_value(striped()).unwrap();
    v["W"] = 27.into();
    assert!(serde_json::from_value::<WeavePattern>(v).is_err());

    let mut v = serde_json::to_value(striped()).unwrap();
    v["grid"][2] = serde_json::json!([0, 1]);
    assert!(serde_json::from_value::<WeavePattern>(v).is_err());

    let mut v = serde_json::to_value(striped()).unwrap();
    v["grid"][0][0] = 2.into();
    assert!(serde_json::from_value::<WeavePattern>(v).is_err());

    let mut v = serde_json::to_value(striped()).unwrap();
    v["stripeRow"] = 18.into();
    assert!(serde_json::from_value::<WeavePattern>(v).is_err());
}

#[test]
fn missing_stripe_row_defaults_to_zero() {
    let mut v = serde_json::to_value(striped()).unwrap();
    v.as_object_mut().unwrap().remove("stripeRow");
    let p: WeavePattern = serde_json::from_value(v).unwrap();
    assert_eq!(p.stripe_row(), 0);
}
