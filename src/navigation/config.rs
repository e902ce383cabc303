//! Static routing table for the update flow.
//!
//! Every button on every page maps to a target. Most targets are fixed pages;
//! a few depend on what the user chose earlier and are resolved against the
//! selection state at the moment of navigation.

use std::fmt;
use std::str::FromStr;

use super::{Page, UpdateMethod};
use crate::selection::SelectionState;

/// Row of the button table. Success pages share one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ListView,
    Step1,
    Step1Empty,
    Step2,
    Success,
    Error,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ListView => "listView",
            Step::Step1 => "step1",
            Step::Step1Empty => "step1Empty",
            Step::Step2 => "step2",
            Step::Success => "success",
            Step::Error => "error",
        }
    }

    pub fn all() -> &'static [Step] {
        &[
            Step::ListView,
            Step::Step1,
            Step::Step1Empty,
            Step::Step2,
            Step::Success,
            Step::Error,
        ]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::all()
            .iter()
            .copied()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| format!("unknown step '{}'", s))
    }
}

/// A button on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open the update flow for the selected upload
    Start,
    Cancel,
    Next,
    Back,
    Publish,
    Done,
    Retry,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Cancel => "cancel",
            Action::Next => "next",
            Action::Back => "back",
            Action::Publish => "publish",
            Action::Done => "done",
            Action::Retry => "retry",
        }
    }

    pub fn all() -> &'static [Action] {
        &[
            Action::Start,
            Action::Cancel,
            Action::Next,
            Action::Back,
            Action::Publish,
            Action::Done,
            Action::Retry,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Start => "Review Update",
            Action::Cancel => "Cancel",
            Action::Next => "Next",
            Action::Back => "Back",
            Action::Publish => "Publish",
            Action::Done => "Done",
            Action::Retry => "Retry",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| format!("unknown action '{}'", s))
    }
}

/// Computes a destination from the current selection
pub type Resolver = fn(&SelectionState) -> Page;

/// Where a button leads
#[derive(Clone, Copy)]
pub enum NavTarget {
    Page(Page),
    Resolve(Resolver),
}

impl NavTarget {
    pub fn resolve(&self, selection: &SelectionState) -> Page {
        match self {
            NavTarget::Page(page) => *page,
            NavTarget::Resolve(resolver) => resolver(selection),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, NavTarget::Resolve(_))
    }
}

impl fmt::Debug for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavTarget::Page(page) => f.debug_tuple("Page").field(page).finish(),
            NavTarget::Resolve(_) => f.write_str("Resolve(..)"),
        }
    }
}

/// Success page for a stored method id, falling back to update-app-only
pub fn success_page_for(method: Option<&str>) -> Page {
    let method = method
        .and_then(UpdateMethod::from_id)
        .unwrap_or(UpdateMethod::FALLBACK);
    Page::Success(method)
}

fn success_page(selection: &SelectionState) -> Page {
    success_page_for(selection.selected_method.as_deref())
}

/// Step1 when the upload impacts at least one workflow, the empty state otherwise
fn review_entry_page(selection: &SelectionState) -> Page {
    match selection.impacted_count {
        Some(0) => Page::Step1Empty,
        _ => Page::Step1,
    }
}

/// Button-to-target table
#[derive(Debug, Clone)]
pub struct NavConfig {
    routes: Vec<(Step, Action, NavTarget)>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            routes: vec![
                (
                    Step::ListView,
                    Action::Start,
                    NavTarget::Resolve(review_entry_page),
                ),
                (Step::Step1, Action::Cancel, NavTarget::Page(Page::ListView)),
                (Step::Step1, Action::Next, NavTarget::Page(Page::Step2)),
                (
                    Step::Step1Empty,
                    Action::Cancel,
                    NavTarget::Page(Page::ListView),
                ),
                (Step::Step2, Action::Back, NavTarget::Page(Page::Step1)),
                (Step::Step2, Action::Publish, NavTarget::Resolve(success_page)),
                (Step::Success, Action::Done, NavTarget::Page(Page::ListView)),
                (Step::Error, Action::Cancel, NavTarget::Page(Page::ListView)),
                (Step::Error, Action::Retry, NavTarget::Page(Page::Step2)),
            ],
        }
    }
}

impl NavConfig {
    pub fn target(&self, step: Step, action: Action) -> Option<&NavTarget> {
        self.routes
            .iter()
            .find(|(s, a, _)| *s == step && *a == action)
            .map(|(_, _, target)| target)
    }

    /// Buttons available on a step, in display order
    pub fn actions(&self, step: Step) -> Vec<Action> {
        self.routes
            .iter()
            .filter(|(s, _, _)| *s == step)
            .map(|(_, action, _)| *action)
            .collect()
    }

    /// Destination of a button, resolving dynamic targets against `selection`
    pub fn resolve(
        &self,
        step: Step,
        action: Action,
        selection: &SelectionState,
    ) -> Option<Page> {
        self.target(step, action).map(|t| t.resolve(selection))
    }

    /// Where closing a modal leads
    pub fn close_target(&self) -> Page {
        Page::ListView
    }

    /// Success page for the method stored in `selection`
    pub fn success_page(&self, selection: &SelectionState) -> Page {
        success_page(selection)
    }
}
