use super::*;
use crate::hash::id::name_to_id;

fn index_of(names: &[&str]) -> ManifestIndex {
    ManifestIndex::from_pairs(names.iter().map(|n| (*n, name_to_id(n))))
}

#[test]
fn well_formed_manifest_is_clean() {
    let report = validate_manifest(&index_of(&["bunny", "heroflower", "set", "mädchen"]));
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn mismatched_ids_are_errors() {
    let index = ManifestIndex::from_pairs([("bunny", name_to_id("bunny")), ("set", 1.0)]);
    let report = validate_manifest(&index);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("set (3f800000, 5ecc6fe8)"));
    assert!(report.collisions.is_empty());
}

#[test]
fn shared_ids_are_collisions() {
    let report = validate_manifest(&index_of(&["obj5041", "obj13556", "bunny"]));
    assert!(report.errors.is_empty());
    assert_eq!(report.collisions, vec!["colliding: obj13556 obj5041".to_string()]);
}

#[test]
fn legacy_manifests_validate_against_their_version() {
    let index = ManifestIndex::from_pairs(
        ["hello", "bunny"]
            .into_iter()
            .map(|n| (n, name_to_id_with(n, HashVersion::Djb2Legacy))),
    );
    assert!(!validate_manifest(&index).errors.is_empty());
    assert!(validate_manifest_with(&index, HashVersion::Djb2Legacy).is_clean());
}
