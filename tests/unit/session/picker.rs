use std::collections::BTreeMap;

use super::*;

fn metadata(manifest: &str) -> BTreeMap<String, String> {
    [
        ("exr/cryptomatte/d593dd7/name", "CryptoAsset"),
        ("exr/cryptomatte/d593dd7/hash", "MurmurHash3_32"),
        ("exr/cryptomatte/d593dd7/conversion", "uint32_to_float32"),
        ("exr/cryptomatte/d593dd7/manifest", manifest),
        ("exr/cryptomatte/1b2c3d4/name", "CryptoObject"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn asset_session() -> CryptomatteSession {
    let config = SessionConfig {
        layer_name: Some("CryptoAsset".to_string()),
        lock_layer: false,
    };
    CryptomatteSession::from_metadata(
        &metadata(r#"{"bunny": "13851a76", "set": "5ecc6fe8", "heroflower": "6b2b718d"}"#),
        None,
        config,
    )
}

#[test]
fn configured_layer_is_selected() {
    let session = asset_session();
    assert_eq!(session.selection(), Some("d593dd7"));
    assert_eq!(session.selected_layer().unwrap().name, "CryptoAsset");
    assert_eq!(session.layer_names(), ["CryptoObject", "CryptoAsset"]);
}

#[test]
fn unknown_layer_falls_back_unless_locked() {
    let md = metadata("{}");
    let loose = CryptomatteSession::from_metadata(
        &md,
        None,
        SessionConfig {
            layer_name: Some("CryptoMaterial".to_string()),
            lock_layer: false,
        },
    );
    assert_eq!(loose.selection(), Some("1b2c3d4"));

    let locked = CryptomatteSession::from_metadata(
        &md,
        None,
        SessionConfig {
            layer_name: Some("CryptoMaterial".to_string()),
            lock_layer: true,
        },
    );
    assert_eq!(locked.selection(), None);
    assert!(locked.parse_manifest().is_err());
    assert_eq!(locked.id_to_name(1.0), None);
}

#[test]
fn default_config_picks_first_layer() {
    let session =
        CryptomatteSession::from_metadata(&metadata("{}"), None, SessionConfig::default());
    assert_eq!(session.selection(), Some("1b2c3d4"));
}

#[test]
fn set_selection_switches_and_resets_cache() {
    let mut session = asset_session();
    session.parse_manifest().unwrap();
    assert!(session.cache().is_warm());

    assert!(session.set_selection("CryptoObject"));
    assert!(!session.cache().is_warm());
    assert_eq!(session.selection(), Some("1b2c3d4"));
    assert!(session.manifest_source().is_none());
    // no manifest on this layer
    assert!(session.parse_manifest().unwrap().is_empty());

    assert!(!session.set_selection("Nope"));
    assert_eq!(session.selection(), None);
}

#[test]
fn picks_resolve_to_names_or_literals() {
    let session = asset_session();
    assert_eq!(session.token_for_pick(0.0), None);
    assert_eq!(
        session.token_for_pick(name_to_id("bunny")),
        Some(Token::from_raw("bunny"))
    );
    assert_eq!(session.token_for_pick(1.5), Some(Token::from_matte("<1.5>")));
}

#[test]
fn picks_without_manifest_are_literals() {
    let session = CryptomatteSession::from_metadata(
        &metadata("{}"),
        None,
        SessionConfig {
            layer_name: Some("CryptoAsset".to_string()),
            lock_layer: false,
        },
    );
    let token = session.token_for_pick(name_to_id("bunny")).unwrap();
    assert_eq!(token.matte(), "<3.3600013e-27>");
}

#[test]
fn cold_and_warm_sessions_agree() {
    let session = asset_session();
    let ids = [name_to_id("bunny"), name_to_id("set"), 2.0];
    let cold: Vec<_> = ids
        .iter()
        .map(|&id| {
            session.invalidate();
            session.id_to_name(id)
        })
        .collect();
    let warm: Vec<_> = ids.iter().map(|&id| session.id_to_name(id)).collect();
    assert_eq!(cold, warm);
}

#[test]
fn repeated_picks_reuse_the_selected_source() {
    let session = asset_session();
    let Some(ManifestSource::Inline(json)) = session.manifest_source() else {
        panic!("inline manifest expected");
    };
    let first = session.parse_manifest().unwrap();
    for _ in 0..3 {
        session.token_for_pick(name_to_id("bunny"));
    }
    let Some(ManifestSource::Inline(again)) = session.manifest_source() else {
        panic!("inline manifest expected");
    };
    assert!(Arc::ptr_eq(json, again));
    assert!(Arc::ptr_eq(&first, &session.parse_manifest().unwrap()));
}

#[test]
fn manifest_test_reports_clean_fixture() {
    let report = asset_session().test_manifest().unwrap();
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn bogus_manifest_degrades() {
    let session = CryptomatteSession::from_metadata(
        &metadata("{not json"),
        None,
        SessionConfig {
            layer_name: Some("CryptoAsset".to_string()),
            lock_layer: false,
        },
    );
    assert!(session.parse_manifest().is_err());
    assert!(session.test_manifest().is_err());
    let token = session.token_for_pick(name_to_id("set")).unwrap();
    assert!(token.is_id_literal());
}

#[test]
fn sidecar_manifest_resolves_from_base_path() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("manifests")).unwrap();
    std::fs::write(
        dir.path().join("manifests/object.json"),
        r#"{"heroflower": "6b2b718d"}"#,
    )
    .unwrap();

    let md: BTreeMap<String, String> = [
        ("cryptomatte/ae93ba3/name", "CryptoObject"),
        ("cryptomatte/ae93ba3/manif_file", "manifests/object.json"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let session = CryptomatteSession::from_metadata(
        &md,
        Some(dir.path().join("beauty.exr")),
        SessionConfig::default(),
    );
    assert_eq!(
        session.id_to_name(name_to_id("heroflower")).as_deref(),
        Some("heroflower")
    );
    assert!(session.test_manifest().unwrap().is_clean());
}

#[test]
fn config_deserializes_with_defaults() {
    let config: SessionConfig = serde_json::from_str(r#"{"layer_name": "CryptoObject"}"#).unwrap();
    assert_eq!(config.layer_name.as_deref(), Some("CryptoObject"));
    assert!(!config.lock_layer);
}
