//! アセット監査テスト

use chair_configurator::assets::{audit, verify_on_disk};
use chair_configurator::error::ConfiguratorError;
use configurator_common::{AssetResolver, Catalog, CatalogEntry};
use tempfile::tempdir;

fn catalog() -> Catalog {
    Catalog::from_entries(vec![
        CatalogEntry::new("Amy-2", "krzesla"),
        CatalogEntry::new("Ava", "hooker"),
        CatalogEntry::new("", "krzesla"),
    ])
}

/// モデル有無と孤立ファイルの検出
#[test]
fn test_audit_reports_missing_and_orphaned() {
    let dir = tempdir().expect("Failed to create temp dir");
    let chairs = dir.path().join("chairs");
    std::fs::create_dir_all(&chairs).unwrap();
    std::fs::write(chairs.join("Amy-2.glb"), b"glTF").unwrap();
    std::fs::write(chairs.join("Old-1.GLB"), b"glTF").unwrap();
    std::fs::write(chairs.join("notes.txt"), b"memo").unwrap();

    let report = audit(&AssetResolver::default(), &catalog(), dir.path()).expect("監査失敗");

    assert_eq!(report.present, vec!["Amy-2"]);
    assert_eq!(report.missing, vec!["Ava", "unnamed"]);
    assert_eq!(report.orphaned, vec!["Old-1"]);
    assert!(!report.is_complete());
}

/// アセットフォルダが無い場合
#[test]
fn test_audit_missing_assets_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = audit(&AssetResolver::default(), &catalog(), dir.path());
    assert!(matches!(result, Err(ConfiguratorError::SourceUnavailable(_))));
}

/// 選択エントリのモデル確認
#[test]
fn test_verify_on_disk() {
    let dir = tempdir().expect("Failed to create temp dir");
    let chairs = dir.path().join("models");
    std::fs::create_dir_all(&chairs).unwrap();
    std::fs::write(chairs.join("Ava.gltf"), b"{}").unwrap();

    let resolver = AssetResolver::new("models", "gltf", "Ava");

    let found = verify_on_disk(&resolver, &CatalogEntry::new("Ava", "hooker"), dir.path());
    assert_eq!(found.expect("モデルが見つからない"), chairs.join("Ava.gltf"));

    let missing = verify_on_disk(&resolver, &CatalogEntry::new("Amy-2", "krzesla"), dir.path());
    assert!(matches!(
        missing,
        Err(ConfiguratorError::Common(configurator_common::Error::AssetNotFound(_)))
    ));

    let unnamed = verify_on_disk(&resolver, &CatalogEntry::new("", "krzesla"), dir.path());
    assert!(unnamed.is_err());
}
