//! End-to-end navigation through the update flow
//!
//! Drives the state machine the way the front end does and carries the
//! selection between pages through a session store.

use std::time::{Duration, Instant};

use tempfile::TempDir;
use updateflow::catalog::Catalog;
use updateflow::impact::{workflows_for_version, UploadType};
use updateflow::navigation::{
    success_page_for, Action, NavConfig, NavEvent, NavigationError, Navigator, Outcome, Page,
    Step, UpdateMethod,
};
use updateflow::selection::SelectionState;
use updateflow::session::SessionStore;

/// Navigator for an upload, as the list view would set it up
fn navigator_for(app: &str, upload_type: UploadType, version: &str) -> Navigator {
    let catalog = Catalog::builtin();
    let impacted = workflows_for_version(&catalog, app, upload_type, version).len();
    let mut selection = SelectionState::default();
    selection.set_upload(app, upload_type, version, impacted);
    Navigator::new(NavConfig::default(), selection)
}

/// Handle an event, then let the fade finish
fn settle(nav: &mut Navigator, event: NavEvent) -> Result<Outcome, NavigationError> {
    let now = Instant::now();
    let outcome = nav.handle_at(event, now)?;
    nav.tick(now + Duration::from_secs(1));
    Ok(outcome)
}

#[test]
fn test_each_method_reaches_its_success_page() {
    for method in UpdateMethod::all() {
        let mut nav = navigator_for("7-Zip", UploadType::Latest, "23.01");
        settle(&mut nav, NavEvent::Action(Action::Start)).unwrap();
        settle(&mut nav, NavEvent::SelectOption(*method)).unwrap();
        settle(&mut nav, NavEvent::Action(Action::Next)).unwrap();
        settle(&mut nav, NavEvent::Action(Action::Publish)).unwrap();

        assert_eq!(nav.current_state(), Page::Success(*method));
        assert_eq!(nav.current_state().file_name(), method.success_file());

        settle(&mut nav, NavEvent::Action(Action::Done)).unwrap();
        assert_eq!(nav.current_state(), Page::ListView);
    }
}

#[test]
fn test_selection_survives_a_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = SessionStore::start(temp_dir.path());

    let mut nav = navigator_for("7-Zip", UploadType::Latest, "23.01");
    settle(&mut nav, NavEvent::Action(Action::Start)).unwrap();
    settle(&mut nav, NavEvent::SelectOption(UpdateMethod::PublishWorkflows)).unwrap();
    nav.selection().persist(&mut store).unwrap();

    // The next page starts from whatever the store holds
    let reopened = SessionStore::open(temp_dir.path(), store.id).unwrap();
    let carried = SelectionState::from_store(&reopened);
    assert_eq!(&carried, nav.selection());
    assert_eq!(
        NavConfig::default().success_page(&carried),
        Page::Success(UpdateMethod::PublishWorkflows)
    );

    store.end().unwrap();
    assert!(SessionStore::list(temp_dir.path()).unwrap().is_empty());
}

#[test]
fn test_success_page_fallback() {
    let fallback = Page::Success(UpdateMethod::UpdateAppOnly);
    assert_eq!(success_page_for(None), fallback);
    assert_eq!(success_page_for(Some("bogus")), fallback);
    assert_eq!(
        success_page_for(Some("publish-workflows")),
        Page::Success(UpdateMethod::PublishWorkflows)
    );
}

#[test]
fn test_no_impacted_workflows_goes_to_empty_page() {
    let mut nav = navigator_for("1Password", UploadType::Specific, "8.8.0");
    settle(&mut nav, NavEvent::Action(Action::Start)).unwrap();
    assert_eq!(nav.current_state(), Page::Step1Empty);

    settle(&mut nav, NavEvent::Escape).unwrap();
    assert_eq!(nav.current_state(), Page::ListView);
}

#[test]
fn test_error_page_retry_and_cancel() {
    let mut nav = navigator_for("7-Zip", UploadType::Latest, "23.01");
    settle(&mut nav, NavEvent::Navigate("error".to_string())).unwrap();
    assert_eq!(nav.current_state(), Page::Error);

    settle(&mut nav, NavEvent::Action(Action::Retry)).unwrap();
    assert_eq!(nav.current_state(), Page::Step2);

    settle(&mut nav, NavEvent::Navigate("wireframe-modal-error.html".to_string())).unwrap();
    settle(&mut nav, NavEvent::Action(Action::Cancel)).unwrap();
    assert_eq!(nav.current_state(), Page::ListView);
}

#[test]
fn test_interrupting_a_fade_abandons_it() {
    let mut nav = navigator_for("7-Zip", UploadType::Latest, "23.01");
    settle(&mut nav, NavEvent::Action(Action::Start)).unwrap();
    settle(&mut nav, NavEvent::SelectOption(UpdateMethod::DoNothing)).unwrap();

    let now = Instant::now();
    nav.handle_at(NavEvent::Action(Action::Next), now).unwrap();
    nav.handle_at(NavEvent::Action(Action::Cancel), now).unwrap();
    assert_eq!(nav.pending().map(|t| t.to), Some(Page::ListView));

    nav.tick(now + Duration::from_secs(1));
    assert_eq!(nav.current_state(), Page::ListView);
}

#[test]
fn test_resolve_target_without_navigating() {
    let nav = navigator_for("7-Zip", UploadType::Latest, "23.01");
    assert_eq!(nav.resolve_target(Step::ListView, Action::Start), Some(Page::Step1));
    assert_eq!(nav.resolve_target(Step::Step1, Action::Next), Some(Page::Step2));
    assert_eq!(nav.resolve_target(Step::Step1, Action::Publish), None);
    assert_eq!(nav.current_state(), Page::ListView);
}
