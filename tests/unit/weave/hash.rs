use super::*;

#[test]
fn hash_of_empty_string_is_zero() {
    assert_eq!(seed_hash(""), 0);
}

#[test]
fn hash_matches_known_values() {
    assert_eq!(seed_hash("a"), 97);
    assert_eq!(seed_hash("abc"), 96354);
    // Wraps modulo 2^32.
    assert_eq!(seed_hash("zzzzzzzzzzzzzzzzzzzz"), 1_718_487_168);
}

#[test]
fn hash_walks_utf16_units_not_bytes() {
    // 'é' is one unit, the spool emoji is a surrogate pair.
    assert_eq!(seed_hash("é🧵"), 1_996_832);
}

#[test]
fn hash_is_order_sensitive() {
    assert_ne!(seed_hash("ab"), seed_hash("ba"));
}

#[test]
fn number_format_matches_seed_key_spelling() {
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(1.0), "1");
    assert_eq!(format_number(0.4), "0.4");
    assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_number(0.000001), "0.000001");
    assert_eq!(format_number(1e-7), "1e-7");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(2.5e22), "2.5e+22");
}

#[test]
fn seed_key_joins_profile_with_commas() {
    assert_eq!(
        seed_key("2024-01-01", "hello", &[0.0, 1.0, 0.4]),
        "loom:v1:2024-01-01:hello:0,1,0.4"
    );
    assert_eq!(
        seed_key("2024-01-01", "hello", &[]),
        "loom:v1:2024-01-01:hello:"
    );
}
