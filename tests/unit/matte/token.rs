use super::*;

#[test]
fn raw_names_are_escaped() {
    let t = Token::from_raw("bunny*");
    assert_eq!(t.matte(), "bunny\\*");
    assert_eq!(t.raw(), "bunny*");
    assert!(!t.has_wildcards());
    assert_eq!(t.id().to_bits(), name_to_id("bunny*").to_bits());
}

#[test]
fn matte_text_keeps_wildcards() {
    let t = Token::from_matte("bunny*");
    assert!(t.has_wildcards());
    assert_eq!(t.raw(), "bunny*");
}

#[test]
fn literals_resolve_to_their_value() {
    let bunny = name_to_id("bunny");
    let t = Token::from_matte("<3.36000126251e-27>");
    assert!(t.is_id_literal());
    assert_eq!(t.id().to_bits(), bunny.to_bits());

    let canonical = Token::from_id(bunny);
    assert_eq!(canonical.matte(), "<3.3600013e-27>");
    assert_eq!(canonical.id().to_bits(), bunny.to_bits());
}

#[test]
fn names_hash_through_the_engine() {
    let t = Token::from_raw("heroflower");
    assert!(!t.is_id_literal());
    assert_eq!(t.id().to_bits(), name_to_id("heroflower").to_bits());
    assert_eq!(Token::from_raw("<not a number>").id_literal(), None);
}

#[test]
fn display_is_matte_text() {
    assert_eq!(Token::from_raw("a[1]").to_string(), "a\\[1\\]");
}
