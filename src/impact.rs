//! Workflow impact resolution for application version uploads.
//!
//! Given an upload (the version and whether it becomes the new latest), decide
//! which of the application's workflows would change the app version they
//! install.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::catalog::{Catalog, Workflow};
use crate::version::compare_versions;

/// How an uploaded version is registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadType {
    /// The upload becomes the new latest version
    #[default]
    Latest,
    /// The upload is kept as a specific, non-canonical version
    Specific,
}

impl UploadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadType::Latest => "latest",
            UploadType::Specific => "specific",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadType::Latest => "Mark as latest",
            UploadType::Specific => "Specific version",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            UploadType::Latest => UploadType::Specific,
            UploadType::Specific => UploadType::Latest,
        }
    }
}

impl fmt::Display for UploadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(UploadType::Latest),
            "specific" => Ok(UploadType::Specific),
            other => Err(format!(
                "unknown upload type '{}' (expected latest or specific)",
                other
            )),
        }
    }
}

/// A workflow affected by an upload, with its version mode label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactedWorkflow {
    #[serde(flatten)]
    pub workflow: Workflow,
    /// "Latest Version" or "Specific (v<reference>)"
    pub version_mode: String,
}

impl ImpactedWorkflow {
    fn new(workflow: &Workflow) -> Self {
        Self {
            workflow: workflow.clone(),
            version_mode: workflow.version_reference.mode_display(),
        }
    }
}

/// Workflows of `app` impacted by uploading `upload_version` as `upload_type`.
///
/// Unknown applications yield an empty list. Source order is preserved.
pub fn workflows_for_version(
    catalog: &Catalog,
    app: &str,
    upload_type: UploadType,
    upload_version: &str,
) -> Vec<ImpactedWorkflow> {
    debug!(app, upload_type = %upload_type, upload_version, "Resolving impacted workflows");

    let Some(application) = catalog.application(app) else {
        debug!(app, "No workflows found for app");
        return Vec::new();
    };

    let result: Vec<ImpactedWorkflow> = application
        .workflows
        .iter()
        .filter(|wf| is_impacted(wf, upload_type, upload_version))
        .map(ImpactedWorkflow::new)
        .collect();

    debug!(
        app,
        total = application.workflows.len(),
        impacted = result.len(),
        "Resolved impacted workflows"
    );
    result
}

fn is_impacted(workflow: &Workflow, upload_type: UploadType, upload_version: &str) -> bool {
    let included = match workflow.version_reference.pinned() {
        // Rolling workflows only move when the upload becomes the new latest
        None => upload_type == UploadType::Latest,
        Some(pinned) => compare_versions(pinned, upload_version) != Ordering::Greater,
    };

    debug!(
        workflow = %workflow.name,
        reference = %workflow.version_reference,
        included,
        "Evaluated workflow"
    );
    included
}

/// Total devices across the given workflows
pub fn total_device_count(workflows: &[ImpactedWorkflow]) -> u64 {
    workflows.iter().map(|wf| wf.workflow.devices).sum()
}
