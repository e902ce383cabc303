//! Catalog file loading
//!
//! A catalog file replaces the built-in table. The format is picked from the
//! file extension: `.toml`, `.json`, `.yaml` or `.yml`.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::Catalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported catalog format '{0}' (expected toml, json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("failed to parse catalog file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("duplicate application '{0}' in catalog")]
    DuplicateApplication(String),
}

/// Load the configured catalog, falling back to the built-in data set
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => load_catalog_file(path),
        None => {
            debug!("Using built-in catalog");
            Ok(Catalog::builtin())
        }
    }
}

/// Load and validate a catalog file
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parse_error = |message: String| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let catalog: Catalog = match extension.as_str() {
        "toml" => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
        "json" => serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
        "yaml" | "yml" => {
            serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
        }
        other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
    };

    validate(&catalog)?;

    info!(
        path = %path.display(),
        applications = catalog.len(),
        "Loaded catalog file"
    );
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen: Vec<&str> = Vec::new();
    for app in &catalog.applications {
        if seen.contains(&app.name.as_str()) {
            return Err(CatalogError::DuplicateApplication(app.name.clone()));
        }
        seen.push(app.name.as_str());

        // Pinned references outside the upload history are allowed but suspicious
        for wf in app.unknown_references() {
            warn!(
                app = %app.name,
                workflow = %wf.name,
                reference = %wf.version_reference,
                "Workflow references a version that was never uploaded"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VersionReference;
    use tempfile::TempDir;

    const TOML_CATALOG: &str = r#"
[[applications]]
name = "Firefox"
availableVersions = ["128.0", "127.0.2"]

[[applications.workflows]]
name = "Browser Baseline"
version = "v1.0"
type = "Regular"
versionReference = "latest"
devices = 40

[[applications.workflows]]
name = "Kiosk"
version = "v0.3"
type = "Onboarding"
versionReference = "127.0.2"
devices = 5
"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_catalog_without_path_is_builtin() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_load_toml_catalog() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "catalog.toml", TOML_CATALOG);

        let catalog = load_catalog(Some(path.as_path())).unwrap();
        let app = catalog.application("Firefox").unwrap();
        assert_eq!(app.available_versions.len(), 2);
        assert_eq!(app.workflows[0].version_reference, VersionReference::Latest);
        assert_eq!(app.workflows[1].version_reference.pinned(), Some("127.0.2"));
        assert_eq!(app.workflows[1].kind, "Onboarding");
    }

    #[test]
    fn test_load_json_catalog_roundtrips_builtin() {
        let dir = TempDir::new().unwrap();
        let json = serde_json::to_string_pretty(&Catalog::builtin()).unwrap();
        let path = write(&dir, "catalog.json", &json);

        let catalog = load_catalog_file(&path).unwrap();
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_load_yaml_catalog() {
        let dir = TempDir::new().unwrap();
        let yaml = "applications:\n  - name: Slack\n    availableVersions: ['4.41.97']\n    workflows: []\n";
        let path = write(&dir, "catalog.yml", yaml);

        let catalog = load_catalog_file(&path).unwrap();
        assert_eq!(catalog.latest_version("Slack"), Some("4.41.97"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "catalog.ini", "");

        let err = load_catalog_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(ref ext) if ext == "ini"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{ not json");

        let err = load_catalog_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_duplicate_application_rejected() {
        let dir = TempDir::new().unwrap();
        let json = r#"{"applications":[{"name":"A"},{"name":"A"}]}"#;
        let path = write(&dir, "dupes.json", json);

        let err = load_catalog_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateApplication(ref name) if name == "A"));
    }
}
