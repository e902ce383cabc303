//! Pages of the update flow and how to move between them.
//!
//! `config` holds the static routing table, `controller` the state machine
//! that applies it to user events.

pub mod config;
pub mod controller;

pub use config::{success_page_for, Action, NavConfig, NavTarget, Resolver, Step};
pub use controller::{NavEvent, NavigationError, Navigator, Outcome, Transition};

use serde::Serialize;
use std::fmt;

/// How workflow-assigned devices should pick up a new app version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateMethod {
    PublishWorkflows,
    UpdateAppOnly,
    DoNothing,
}

/// Display metadata for an update method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub success_title: &'static str,
    pub success_message: &'static str,
}

const PUBLISH_WORKFLOWS_INFO: MethodInfo = MethodInfo {
    label: "Publish New Workflow Versions",
    description: "Create and publish new versions of all impacted workflows with the updated app. The entire workflow will re-run on devices, reapplying all steps including scripts, profiles, and applications.",
    success_title: "Workflows Published Successfully",
    success_message: "New workflow versions have been created. The complete workflows will re-run on all assigned devices.",
};

const UPDATE_APP_ONLY_INFO: MethodInfo = MethodInfo {
    label: "Update App Only on Devices",
    description: "Update only the application on devices without creating new workflow versions. No workflow steps will re-run, only the app will be updated using the app deployment engine.",
    success_title: "Update Initiated Successfully",
    success_message: "The app is now being deployed to workflow-assigned devices. The app will be updated without re-running the entire workflows.",
};

const DO_NOTHING_INFO: MethodInfo = MethodInfo {
    label: "Do Nothing for Workflow Assignments",
    description: "Do not update the app on workflow-assigned devices. Workflows will continue using the current app version. You can manually update workflows or trigger this flow later from the app details page.",
    success_title: "Selection Saved",
    success_message: "No updates will be deployed to workflow-assigned devices. Workflows will continue using their current app versions.",
};

impl UpdateMethod {
    /// Used when the stored method is missing or unrecognized
    pub const FALLBACK: UpdateMethod = UpdateMethod::UpdateAppOnly;

    pub fn all() -> &'static [UpdateMethod] {
        &[
            UpdateMethod::PublishWorkflows,
            UpdateMethod::UpdateAppOnly,
            UpdateMethod::DoNothing,
        ]
    }

    /// Identifier stored in the session
    pub fn id(&self) -> &'static str {
        match self {
            UpdateMethod::PublishWorkflows => "publish-workflows",
            UpdateMethod::UpdateAppOnly => "update-app-only",
            UpdateMethod::DoNothing => "do-nothing",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.id() == id)
    }

    pub fn info(&self) -> &'static MethodInfo {
        match self {
            UpdateMethod::PublishWorkflows => &PUBLISH_WORKFLOWS_INFO,
            UpdateMethod::UpdateAppOnly => &UPDATE_APP_ONLY_INFO,
            UpdateMethod::DoNothing => &DO_NOTHING_INFO,
        }
    }

    /// Page identifier of this method's success page
    pub fn success_file(&self) -> &'static str {
        match self {
            UpdateMethod::PublishWorkflows => "wireframe-modal-step2.1.html",
            UpdateMethod::UpdateAppOnly => "wireframe-modal-step2.2.html",
            UpdateMethod::DoNothing => "wireframe-modal-step2.3.html",
        }
    }
}

impl fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A page of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Application list; the only page without a modal
    ListView,
    /// Impacted workflows and method selection
    Step1,
    /// Shown instead of step1 when nothing is impacted
    Step1Empty,
    /// Review before publishing
    Step2,
    Success(UpdateMethod),
    Error,
}

impl Page {
    pub fn all() -> Vec<Page> {
        let mut pages = vec![Page::ListView, Page::Step1, Page::Step1Empty, Page::Step2];
        pages.extend(UpdateMethod::all().iter().copied().map(Page::Success));
        pages.push(Page::Error);
        pages
    }

    /// Logical name, for pages that have one
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Page::ListView => Some("listView"),
            Page::Step1 => Some("step1"),
            Page::Step1Empty => Some("step1Empty"),
            Page::Step2 => Some("step2"),
            Page::Error => Some("error"),
            Page::Success(_) => None,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.key() == Some(key))
    }

    /// Opaque page identifier handed to the presentation layer
    pub fn file_name(&self) -> &'static str {
        match self {
            Page::ListView => "wireframe-index.html",
            Page::Step1 => "wireframe-modal-step1.html",
            Page::Step1Empty => "wireframe-modal-step1-empty.html",
            Page::Step2 => "wireframe-modal-step2.html",
            Page::Success(method) => method.success_file(),
            Page::Error => "wireframe-modal-error.html",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.file_name() == name)
    }

    /// Whether the page is drawn as a modal over the list view
    pub fn is_modal(&self) -> bool {
        !matches!(self, Page::ListView)
    }

    /// Which row of the button table applies to this page
    pub fn step(&self) -> Step {
        match self {
            Page::ListView => Step::ListView,
            Page::Step1 => Step::Step1,
            Page::Step1Empty => Step::Step1Empty,
            Page::Step2 => Step::Step2,
            Page::Success(_) => Step::Success,
            Page::Error => Step::Error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::ListView => "Applications",
            Page::Step1 => "Update Workflow Assignments",
            Page::Step1Empty => "No Impacted Workflows",
            Page::Step2 => "Review Selection",
            Page::Success(method) => method.info().success_title,
            Page::Error => "Update Failed",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
