//! Application and workflow catalog.
//!
//! The catalog is the read-only data source for the update flow: every known
//! application, the versions uploaded for it, and the device workflows that
//! reference it. The built-in table is used unless a catalog file is configured.

mod builtin;
mod loader;

pub use loader::{load_catalog, load_catalog_file, CatalogError};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::max_version;

/// Sentinel used by workflows that track the rolling latest version
pub const LATEST_SENTINEL: &str = "latest";

/// Which application version a workflow installs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersionReference {
    /// Always installs whatever version is currently marked latest
    Latest,
    /// Pinned to one uploaded version
    Specific(String),
}

impl VersionReference {
    pub fn is_latest(&self) -> bool {
        matches!(self, VersionReference::Latest)
    }

    /// The pinned version, if any
    pub fn pinned(&self) -> Option<&str> {
        match self {
            VersionReference::Latest => None,
            VersionReference::Specific(v) => Some(v),
        }
    }

    /// Display text for the version mode column
    pub fn mode_display(&self) -> String {
        match self {
            VersionReference::Latest => "Latest Version".to_string(),
            VersionReference::Specific(v) => format!("Specific (v{})", v),
        }
    }
}

impl From<String> for VersionReference {
    fn from(value: String) -> Self {
        if value == LATEST_SENTINEL {
            VersionReference::Latest
        } else {
            VersionReference::Specific(value)
        }
    }
}

impl From<&str> for VersionReference {
    fn from(value: &str) -> Self {
        VersionReference::from(value.to_string())
    }
}

impl From<VersionReference> for String {
    fn from(value: VersionReference) -> Self {
        match value {
            VersionReference::Latest => LATEST_SENTINEL.to_string(),
            VersionReference::Specific(v) => v,
        }
    }
}

impl fmt::Display for VersionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionReference::Latest => f.write_str(LATEST_SENTINEL),
            VersionReference::Specific(v) => f.write_str(v),
        }
    }
}

/// A device workflow that installs an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub name: String,
    /// Workflow version label (e.g. "v3.2"), unrelated to the app version
    pub version: String,
    /// Category tag such as "Onboarding" or "Regular"
    #[serde(rename = "type")]
    pub kind: String,
    pub version_reference: VersionReference,
    /// Number of devices the workflow is assigned to
    pub devices: u64,
}

/// An application with its upload history and dependent workflows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub name: String,
    /// Uploaded versions, conventionally newest first
    #[serde(default)]
    pub available_versions: Vec<String>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

impl Application {
    /// Highest uploaded version, or `None` if nothing was uploaded yet
    pub fn latest_version(&self) -> Option<&str> {
        max_version(self.available_versions.iter().map(String::as_str))
    }

    /// Pinned references that do not match any uploaded version
    pub fn unknown_references(&self) -> Vec<&Workflow> {
        self.workflows
            .iter()
            .filter(|wf| {
                wf.version_reference
                    .pinned()
                    .is_some_and(|v| !self.available_versions.iter().any(|known| known == v))
            })
            .collect()
    }
}

/// The set of known applications, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub applications: Vec<Application>,
}

impl Catalog {
    pub fn new(applications: Vec<Application>) -> Self {
        Self { applications }
    }

    /// The hard-coded prototype data set
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    pub fn application(&self, name: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.name == name)
    }

    /// Highest uploaded version for `app`; `None` for unknown apps or empty histories
    pub fn latest_version(&self, app: &str) -> Option<&str> {
        self.application(app).and_then(Application::latest_version)
    }

    pub fn names(&self) -> Vec<&str> {
        self.applications.iter().map(|app| app.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_reference_from_string() {
        assert_eq!(VersionReference::from("latest"), VersionReference::Latest);
        assert_eq!(
            VersionReference::from("22.01"),
            VersionReference::Specific("22.01".to_string())
        );
    }

    #[test]
    fn test_version_reference_mode_display() {
        assert_eq!(VersionReference::Latest.mode_display(), "Latest Version");
        assert_eq!(
            VersionReference::from("21.07").mode_display(),
            "Specific (v21.07)"
        );
    }

    #[test]
    fn test_version_reference_serde_as_plain_string() {
        let json = serde_json::to_string(&VersionReference::Latest).unwrap();
        assert_eq!(json, "\"latest\"");

        let parsed: VersionReference = serde_json::from_str("\"8.9.12\"").unwrap();
        assert_eq!(parsed.pinned(), Some("8.9.12"));
    }

    #[test]
    fn test_latest_version_for_builtin_apps() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.latest_version("7-Zip"), Some("23.01"));
        assert_eq!(catalog.latest_version("1Password"), Some("8.10.16"));
    }

    #[test]
    fn test_latest_version_unknown_app() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.latest_version("UnknownApp"), None);
    }

    #[test]
    fn test_latest_version_empty_history() {
        let catalog = Catalog::new(vec![Application {
            name: "Fresh".to_string(),
            available_versions: Vec::new(),
            workflows: Vec::new(),
        }]);
        assert_eq!(catalog.latest_version("Fresh"), None);
    }

    #[test]
    fn test_latest_version_ignores_input_order() {
        let catalog = Catalog::new(vec![Application {
            name: "7-Zip".to_string(),
            available_versions: vec![
                "19.00".to_string(),
                "23.01".to_string(),
                "21.07".to_string(),
                "22.01".to_string(),
            ],
            workflows: Vec::new(),
        }]);
        assert_eq!(catalog.latest_version("7-Zip"), Some("23.01"));
    }

    #[test]
    fn test_builtin_references_are_known_versions() {
        let catalog = Catalog::builtin();
        for app in &catalog.applications {
            assert!(app.unknown_references().is_empty(), "{}", app.name);
        }
    }

    #[test]
    fn test_unknown_references_detected() {
        let app = Application {
            name: "Test".to_string(),
            available_versions: vec!["1.0".to_string()],
            workflows: vec![Workflow {
                name: "Pinned".to_string(),
                version: "v1".to_string(),
                kind: "Regular".to_string(),
                version_reference: VersionReference::from("0.9"),
                devices: 3,
            }],
        };
        assert_eq!(app.unknown_references().len(), 1);
    }
}
