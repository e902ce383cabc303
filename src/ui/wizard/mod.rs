//! The update review wizard: list view plus the modal pages of the flow

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListState, Paragraph},
    Frame,
};
use tracing::debug;

use crate::catalog::{Application, Catalog};
use crate::impact::{workflows_for_version, ImpactedWorkflow, UploadType};
use crate::navigation::{Action, NavEvent, NavigationError, Navigator, Outcome, Page, UpdateMethod};
use crate::ui::dialogs::{centered_rect, contains};
use crate::ui::keybindings::Command;

mod pages;


/// Wizard state shared by all pages
pub struct UpdateWizard {
    catalog: Catalog,
    navigator: Navigator,
    /// Highlighted application on the list view
    pub(crate) app_state: ListState,
    /// Index into the highlighted application's `available_versions`
    pub(crate) version_index: usize,
    pub(crate) upload_type: UploadType,
    /// Highlighted radio option on step1
    pub(crate) option_state: ListState,
    /// Where the modal was last drawn; used to tell outside clicks apart
    pub(crate) modal_area: Option<Rect>,
    /// Page the cursors were last synced for
    synced_page: Page,
}

impl UpdateWizard {
    /// Build the wizard, restoring any upload the navigator's selection names
    pub fn new(catalog: Catalog, navigator: Navigator) -> Self {
        let mut app_state = ListState::default();
        let mut version_index = 0;
        let mut upload_type = UploadType::default();

        let selection = navigator.selection();
        let restored = selection
            .selected_app
            .as_deref()
            .and_then(|name| catalog.applications.iter().position(|a| a.name == name));

        match restored {
            Some(i) => {
                app_state.select(Some(i));
                let app = &catalog.applications[i];
                version_index = selection
                    .upload_version
                    .as_deref()
                    .and_then(|v| app.available_versions.iter().position(|known| known == v))
                    .unwrap_or_else(|| latest_index(app));
                upload_type = selection.upload_type.unwrap_or_default();
            }
            None if !catalog.is_empty() => {
                app_state.select(Some(0));
                version_index = latest_index(&catalog.applications[0]);
            }
            None => {}
        }

        let synced_page = navigator.current_state();
        let mut wizard = Self {
            catalog,
            navigator,
            app_state,
            version_index,
            upload_type,
            option_state: ListState::default(),
            modal_area: None,
            synced_page,
        };
        wizard.refresh_upload();
        wizard.sync_cursors();
        wizard
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn current_page(&self) -> Page {
        self.navigator.current_state()
    }

    /// Application highlighted on the list view
    pub fn selected_application(&self) -> Option<&Application> {
        self.app_state
            .selected()
            .and_then(|i| self.catalog.applications.get(i))
    }

    /// Version that would be uploaded for the highlighted application
    pub fn upload_version(&self) -> Option<&str> {
        self.selected_application()
            .and_then(|app| app.available_versions.get(self.version_index))
            .map(String::as_str)
    }

    /// Workflows impacted by the upload recorded in the selection
    pub fn impacted(&self) -> Vec<ImpactedWorkflow> {
        let selection = self.navigator.selection();
        match (&selection.selected_app, &selection.upload_version) {
            (Some(app), Some(version)) => workflows_for_version(
                &self.catalog,
                app,
                selection.upload_type.unwrap_or_default(),
                version,
            ),
            _ => Vec::new(),
        }
    }

    /// Method chosen on step1, falling back when none or an unknown one is stored
    pub fn chosen_method(&self) -> UpdateMethod {
        self.navigator
            .selection()
            .method()
            .unwrap_or(UpdateMethod::FALLBACK)
    }

    /// Run a key command against the current page
    pub fn apply(&mut self, command: Command) -> Result<Outcome, NavigationError> {
        let page = self.current_page();
        let outcome = match command {
            // Handled by the app loop
            Command::Quit | Command::ToggleHelp => Ok(Outcome::Stay),
            Command::MoveUp | Command::MoveDown => {
                let forward = command == Command::MoveDown;
                match page {
                    Page::ListView => self.move_app(forward),
                    Page::Step1 => self.move_option(forward),
                    _ => {}
                }
                Ok(Outcome::Stay)
            }
            Command::PrevVersion | Command::NextVersion => {
                if page == Page::ListView {
                    // Versions are listed newest first
                    self.step_version(command == Command::PrevVersion);
                }
                Ok(Outcome::Stay)
            }
            Command::ToggleUploadType => {
                if page == Page::ListView {
                    self.upload_type = self.upload_type.toggled();
                    self.refresh_upload();
                }
                Ok(Outcome::Stay)
            }
            Command::SelectOption => match self.highlighted_option() {
                Some(method) if page == Page::Step1 => {
                    self.navigator.handle(NavEvent::SelectOption(method))
                }
                _ => Ok(Outcome::Stay),
            },
            Command::Primary => match self.primary_action() {
                Some(action) => self.navigator.handle(NavEvent::Action(action)),
                None => Ok(Outcome::Stay),
            },
            Command::Press(action) => {
                if self.navigator.available_actions().contains(&action) {
                    self.navigator.handle(NavEvent::Action(action))
                } else {
                    Ok(Outcome::Stay)
                }
            }
            Command::Close => self.navigator.handle(NavEvent::Escape),
            Command::SimulateFailure => {
                if page == Page::Step2 {
                    self.navigator.handle(NavEvent::Navigate(
                        Page::Error.file_name().to_string(),
                    ))
                } else {
                    Ok(Outcome::Stay)
                }
            }
        };
        self.sync_cursors();
        outcome
    }

    /// Mouse click at a terminal cell
    pub fn click(&mut self, column: u16, row: u16) -> Result<Outcome, NavigationError> {
        if !self.current_page().is_modal() {
            return Ok(Outcome::Stay);
        }
        let event = match self.modal_area {
            Some(area) if contains(area, column, row) => NavEvent::DialogClick,
            _ => NavEvent::OutsideClick,
        };
        let outcome = self.navigator.handle(event);
        self.sync_cursors();
        outcome
    }

    /// Land a pending transition whose fade has elapsed
    pub fn tick(&mut self, now: Instant) -> Option<Page> {
        let entered = self.navigator.tick(now);
        self.sync_cursors();
        entered
    }

    /// The page's default button: the last one, if it is enabled
    pub fn primary_action(&self) -> Option<Action> {
        self.navigator
            .available_actions()
            .last()
            .copied()
            .filter(|action| self.navigator.is_action_enabled(*action))
    }

    pub(crate) fn highlighted_option(&self) -> Option<UpdateMethod> {
        self.option_state
            .selected()
            .and_then(|i| UpdateMethod::all().get(i).copied())
    }

    fn move_app(&mut self, forward: bool) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let i = self.app_state.selected().map_or(0, |i| {
            if forward {
                (i + 1) % len
            } else if i == 0 {
                len - 1
            } else {
                i - 1
            }
        });
        self.app_state.select(Some(i));
        self.version_index = latest_index(&self.catalog.applications[i]);
        self.refresh_upload();
    }

    fn move_option(&mut self, forward: bool) {
        let len = UpdateMethod::all().len();
        let i = self.option_state.selected().map_or(0, |i| {
            if forward {
                (i + 1) % len
            } else if i == 0 {
                len - 1
            } else {
                i - 1
            }
        });
        self.option_state.select(Some(i));
    }

    fn step_version(&mut self, older: bool) {
        let Some(count) = self.selected_application().map(|a| a.available_versions.len()) else {
            return;
        };
        if older && self.version_index + 1 < count {
            self.version_index += 1;
        } else if !older && self.version_index > 0 {
            self.version_index -= 1;
        }
        self.refresh_upload();
    }

    /// Record the highlighted upload and its impact in the selection
    fn refresh_upload(&mut self) {
        let upload = self.selected_application().and_then(|app| {
            app.available_versions
                .get(self.version_index)
                .map(|version| (app.name.clone(), version.clone()))
        });
        let Some((app, version)) = upload else {
            debug!(
                app = ?self.selected_application().map(|a| a.name.as_str()),
                "No uploaded version to review"
            );
            self.navigator.selection_mut().clear_upload();
            return;
        };
        let impacted = workflows_for_version(&self.catalog, &app, self.upload_type, &version);

        self.navigator
            .selection_mut()
            .set_upload(&app, self.upload_type, &version, impacted.len());
    }

    /// Reset page-local cursors when a new page is entered
    fn sync_cursors(&mut self) {
        let page = self.current_page();
        if page == self.synced_page {
            return;
        }
        self.synced_page = page;
        if page == Page::Step1 {
            let i = self
                .navigator
                .selected_option()
                .and_then(|m| UpdateMethod::all().iter().position(|o| *o == m))
                .unwrap_or(0);
            self.option_state.select(Some(i));
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        self.render_list_view(frame, chunks[0]);
        self.render_status_bar(frame, chunks[1]);

        let page = self.current_page();
        if !page.is_modal() {
            self.modal_area = None;
            return;
        }

        // Backdrop
        frame
            .buffer_mut()
            .set_style(chunks[0], Style::default().fg(Color::DarkGray));

        let area = centered_rect(80, 80, chunks[0]);
        self.modal_area = Some(area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", page.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match page {
            Page::ListView => {}
            Page::Step1 => self.render_method_select(frame, inner),
            Page::Step1Empty => self.render_empty(frame, inner),
            Page::Step2 => self.render_review(frame, inner),
            Page::Success(method) => self.render_success(frame, inner, method),
            Page::Error => self.render_error(frame, inner),
        }

        if self.navigator.is_transitioning() {
            frame
                .buffer_mut()
                .set_style(area, Style::default().add_modifier(Modifier::DIM));
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let page = self.current_page();
        let status = Line::from(vec![
            Span::styled(
                format!(" {} ", page.file_name()),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled("? help  q quit", Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }
}

/// Position of the application's latest version in its upload history
fn latest_index(app: &Application) -> usize {
    app.latest_version()
        .and_then(|latest| app.available_versions.iter().position(|v| v == latest))
        .unwrap_or(0)
}
