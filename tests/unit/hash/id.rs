use super::*;
use crate::hash::convert::single_precision;

const FIXTURES: &[(&str, f64)] = &[
    ("hello", 6.0705627102400005616e-17),
    ("cube", -4.08461912519e+15),
    ("sphere", 2.79018604383e+15),
    ("plane", 3.66557617593e-11),
    // "plane" in Bulgarian
    ("равнина", -1.3192631212399999468e-25),
    // "girl" in German
    ("mädchen", 6.2361298211599995797e+25),
];

#[test]
fn known_names_hash_to_fixture_ids() {
    for &(name, expected) in FIXTURES {
        assert_eq!(
            name_to_id(name),
            single_precision(expected),
            "{name} hash does not line up"
        );
    }
}

#[test]
fn hash_is_deterministic_and_finite() {
    for name in ["", "a", "bunny", "with comma, and \"quotes\"", "has_escape\\chars", "x*?[]"] {
        let a = name_to_id(name);
        let b = name_to_id(name.to_string());
        assert_eq!(a.to_bits(), b.to_bits());
        assert!(a.is_finite());
        assert!(a.is_normal(), "{name} produced a non-normal ID");
    }
}

#[test]
fn bytes_and_str_hash_identically() {
    assert_eq!(name_to_id("bunny").to_bits(), name_to_id(b"bunny").to_bits());
}

#[test]
fn exponent_zero_and_max_are_repaired() {
    // Raw murmur3: "" -> 0x00000000, "jm" -> 0x002fd97d, "q" -> 0xff8209e8.
    assert_eq!(name_to_id("").to_bits(), 0x0080_0000);
    assert_eq!(name_to_id("jm").to_bits(), 0x00af_d97d);
    assert_eq!(name_to_id("q").to_bits(), 0xff02_09e8);
    assert!(name_to_id("").is_normal());
    assert!(name_to_id("q").is_finite());
}

#[test]
fn clamped_variant_matches_current() {
    for name in ["", "jm", "ol", "q", "jn", "hello", "bunny", "set", "mädchen"] {
        assert_eq!(
            name_to_id_with(name, HashVersion::Murmur3Clamped).to_bits(),
            name_to_id(name).to_bits(),
            "{name}"
        );
    }
}

#[test]
fn djb2_legacy_differs_from_current() {
    let legacy = name_to_id_with("hello", HashVersion::Djb2Legacy);
    assert_eq!(legacy.to_bits(), 0x0f92_30a8);
    assert_ne!(legacy.to_bits(), name_to_id("hello").to_bits());
    assert!(name_to_id_with("", HashVersion::Djb2Legacy).is_normal());
}

#[test]
fn current_version_is_default() {
    assert_eq!(HashVersion::default(), HashVersion::CURRENT);
    assert_eq!(HashVersion::CURRENT.metadata_name(), "MurmurHash3_32");
}

#[test]
fn version_serde_names_are_snake_case() {
    let json = serde_json::to_string(&HashVersion::Djb2Legacy).unwrap();
    assert_eq!(json, "\"djb2_legacy\"");
    let back: HashVersion = serde_json::from_str("\"murmur3_clamped\"").unwrap();
    assert_eq!(back, HashVersion::Murmur3Clamped);
}
