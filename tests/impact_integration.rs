//! Impact resolution against the built-in catalog and catalog files

use std::cmp::Ordering;
use std::fs;

use tempfile::TempDir;
use updateflow::catalog::{load_catalog, Catalog, CatalogError};
use updateflow::impact::{total_device_count, workflows_for_version, UploadType};
use updateflow::version::{compare_versions, compare_versions_sign, max_version};

fn names(catalog: &Catalog, app: &str, upload_type: UploadType, version: &str) -> Vec<String> {
    workflows_for_version(catalog, app, upload_type, version)
        .into_iter()
        .map(|item| item.workflow.name)
        .collect()
}

// ─── Version Ordering ───────────────────────────────────────────────────────

#[test]
fn test_version_comparisons() {
    assert_eq!(compare_versions_sign("23.01", "22.01"), 1);
    assert_eq!(compare_versions_sign("19.00", "21.07"), -1);
    assert_eq!(compare_versions_sign("8.10.16", "8.9.12"), 1);
    assert_eq!(compare_versions("3.0", "3"), Ordering::Equal);
}

#[test]
fn test_latest_version_ignores_input_order() {
    let mut versions = vec!["19.00", "23.01", "21.07", "22.01"];
    for _ in 0..versions.len() {
        versions.rotate_left(1);
        assert_eq!(max_version(versions.iter().copied()), Some("23.01"));
    }
}

#[test]
fn test_catalog_latest_versions() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.latest_version("7-Zip"), Some("23.01"));
    assert_eq!(catalog.latest_version("1Password"), Some("8.10.16"));
    assert_eq!(catalog.latest_version("UnknownApp"), None);
}

// ─── Impact Resolution ──────────────────────────────────────────────────────

#[test]
fn test_latest_upload_includes_rolling_and_pinned_at_or_below() {
    let catalog = Catalog::builtin();
    let impacted = workflows_for_version(&catalog, "7-Zip", UploadType::Latest, "23.01");

    let app = catalog.application("7-Zip").unwrap();
    assert_eq!(impacted.len(), app.workflows.len());
    assert!(impacted.iter().any(|item| item.version_mode == "Specific (v23.01)"));
    assert_eq!(
        impacted
            .iter()
            .filter(|item| item.version_mode == "Latest Version")
            .count(),
        5
    );
}

#[test]
fn test_specific_upload_skips_rolling_workflows() {
    let catalog = Catalog::builtin();
    assert_eq!(
        names(&catalog, "7-Zip", UploadType::Specific, "21.07"),
        vec!["Security Compliance Update", "Legacy Systems Maintenance"]
    );
}

#[test]
fn test_unknown_app_is_empty() {
    let catalog = Catalog::builtin();
    assert!(workflows_for_version(&catalog, "UnknownApp", UploadType::Latest, "1.0").is_empty());
}

#[test]
fn test_device_totals() {
    let catalog = Catalog::builtin();
    assert_eq!(total_device_count(&[]), 0);

    let impacted = workflows_for_version(&catalog, "7-Zip", UploadType::Specific, "21.07");
    assert_eq!(total_device_count(&impacted), 2145 + 98);
}

// ─── Catalog Files ──────────────────────────────────────────────────────────

#[test]
fn test_yaml_catalog_drives_impact() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.yaml");
    fs::write(
        &path,
        r#"
applications:
  - name: Firefox
    availableVersions: ["121.0", "120.0.1", "119.0"]
    workflows:
      - name: Browser Baseline
        version: v1.0
        type: Regular
        versionReference: latest
        devices: 40
      - name: Kiosk Image
        version: v2.0
        type: Onboarding
        versionReference: "120.0.1"
        devices: 7
"#,
    )
    .unwrap();

    let catalog = load_catalog(Some(path.as_path())).unwrap();
    assert_eq!(catalog.latest_version("Firefox"), Some("121.0"));
    assert_eq!(
        names(&catalog, "Firefox", UploadType::Specific, "120.0.1"),
        vec!["Kiosk Image"]
    );
    assert_eq!(
        names(&catalog, "Firefox", UploadType::Specific, "120.0"),
        Vec::<String>::new()
    );
}

#[test]
fn test_missing_catalog_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_catalog(Some(temp_dir.path().join("nope.toml").as_path())).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}
