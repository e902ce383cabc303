//! Navigation state machine.
//!
//! The navigator owns the current page and the selection state, turns user
//! events into transitions using [`NavConfig`], and models the short fade
//! that precedes leaving a modal page. A pending transition is simply
//! replaced when another navigation happens before it lands.

use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use super::config::{Action, NavConfig, Step};
use super::{Page, UpdateMethod};
use crate::selection::SelectionState;

/// Fade duration used when none is configured
pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown navigation target '{0}'")]
    UnknownTarget(String),

    #[error("no '{action}' action on {step}")]
    NoRoute { step: Step, action: Action },
}

/// Something the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// A page button
    Action(Action),
    /// A raw navigation target: page key, page identifier, or action name
    Navigate(String),
    /// The modal close control
    Close,
    Escape,
    /// Click on the dimmed area around the modal
    OutsideClick,
    /// Click inside the modal surface, which never closes it
    DialogClick,
    /// Pick one of the radio options on step1
    SelectOption(UpdateMethod),
}

/// A move from one page to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Page,
    pub to: Page,
    /// Fade time before `to` is shown; zero when no modal is on screen
    pub delay: Duration,
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to navigate (selection may still have changed)
    Stay,
    Transition(Transition),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    transition: Transition,
    deadline: Instant,
}

pub struct Navigator {
    config: NavConfig,
    current: Page,
    selection: SelectionState,
    /// Highlighted radio option on step1
    selected_option: Option<UpdateMethod>,
    next_enabled: bool,
    transition_delay: Duration,
    pending: Option<Pending>,
}

impl Navigator {
    /// Start on the list view with the given carried-over selection
    pub fn new(config: NavConfig, selection: SelectionState) -> Self {
        Self {
            config,
            current: Page::ListView,
            selection,
            selected_option: None,
            next_enabled: false,
            transition_delay: DEFAULT_TRANSITION_DELAY,
            pending: None,
        }
    }

    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay;
        self
    }

    pub fn current_state(&self) -> Page {
        self.current
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn selected_option(&self) -> Option<UpdateMethod> {
        self.selected_option
    }

    pub fn is_next_enabled(&self) -> bool {
        self.next_enabled
    }

    /// The transition currently fading out, if any
    pub fn pending(&self) -> Option<Transition> {
        self.pending.map(|p| p.transition)
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Destination of `action` on `step` given the current selection
    pub fn resolve_target(&self, step: Step, action: Action) -> Option<Page> {
        self.config.resolve(step, action, &self.selection)
    }

    /// Buttons on the current page
    pub fn available_actions(&self) -> Vec<Action> {
        self.config.actions(self.current.step())
    }

    /// Whether a button on the current page can be activated
    pub fn is_action_enabled(&self, action: Action) -> bool {
        match (self.current, action) {
            (Page::Step1, Action::Next) => self.next_enabled,
            (Page::ListView, Action::Start) => self.selection.has_upload(),
            _ => true,
        }
    }

    pub fn handle(&mut self, event: NavEvent) -> Result<Outcome, NavigationError> {
        self.handle_at(event, Instant::now())
    }

    /// Handle an event as if it happened at `now`
    pub fn handle_at(
        &mut self,
        event: NavEvent,
        now: Instant,
    ) -> Result<Outcome, NavigationError> {
        debug!(page = %self.current, event = ?event, "Handling navigation event");

        match event {
            NavEvent::Action(action) => self.activate(action, now),
            NavEvent::Navigate(target) => self.navigate_raw(&target, now),
            NavEvent::Close => {
                if self.current.is_modal() {
                    Ok(self.begin(self.config.close_target(), now))
                } else {
                    Ok(Outcome::Stay)
                }
            }
            NavEvent::Escape | NavEvent::OutsideClick => {
                // Only meaningful while a modal overlay is shown
                if self.current.is_modal() {
                    Ok(self.begin(self.config.close_target(), now))
                } else {
                    Ok(Outcome::Stay)
                }
            }
            NavEvent::DialogClick => Ok(Outcome::Stay),
            NavEvent::SelectOption(method) => {
                self.select_option(method);
                Ok(Outcome::Stay)
            }
        }
    }

    /// Commit the pending transition once its fade has elapsed
    pub fn tick(&mut self, now: Instant) -> Option<Page> {
        match self.pending {
            Some(pending) if now >= pending.deadline => self.commit_pending(),
            _ => None,
        }
    }

    /// Commit the pending transition immediately
    pub fn commit_pending(&mut self) -> Option<Page> {
        let pending = self.pending.take()?;
        self.enter(pending.transition.to);
        Some(pending.transition.to)
    }

    fn select_option(&mut self, method: UpdateMethod) {
        if self.current != Page::Step1 {
            debug!(page = %self.current, "Ignoring option selection outside step1");
            return;
        }
        self.selected_option = Some(method);
        self.next_enabled = true;
        self.selection.select_method(method);
        debug!(method = %method, "Selected update method");
    }

    fn activate(&mut self, action: Action, now: Instant) -> Result<Outcome, NavigationError> {
        let step = self.current.step();
        let Some(target) = self.config.target(step, action).copied() else {
            return Err(NavigationError::NoRoute { step, action });
        };

        if !self.is_action_enabled(action) {
            debug!(step = %step, action = %action, "Action is disabled");
            return Ok(Outcome::Stay);
        }

        let to = target.resolve(&self.selection);
        Ok(self.begin(to, now))
    }

    /// Page key first, then page identifier, then an action of the current step
    fn navigate_raw(&mut self, target: &str, now: Instant) -> Result<Outcome, NavigationError> {
        if let Some(page) = Page::from_key(target).or_else(|| Page::from_file_name(target)) {
            return Ok(self.begin(page, now));
        }
        match target.parse::<Action>() {
            Ok(action) => self.activate(action, now),
            Err(_) => Err(NavigationError::UnknownTarget(target.to_string())),
        }
    }

    fn begin(&mut self, to: Page, now: Instant) -> Outcome {
        let delay = if self.current.is_modal() {
            self.transition_delay
        } else {
            Duration::ZERO
        };
        let transition = Transition {
            from: self.current,
            to,
            delay,
        };

        if let Some(abandoned) = self.pending.take() {
            debug!(to = %abandoned.transition.to, "Abandoning pending transition");
        }

        if delay.is_zero() {
            self.enter(to);
        } else {
            self.pending = Some(Pending {
                transition,
                deadline: now + delay,
            });
        }
        Outcome::Transition(transition)
    }

    fn enter(&mut self, page: Page) {
        let from = self.current;
        info!(from = %from, to = %page, "Navigated");
        self.current = page;

        if page == Page::Step1 {
            if from == Page::Step2 {
                // Coming back from review keeps the earlier choice
                self.selected_option = self.selection.method();
            } else {
                // Any other entry starts a fresh choice
                self.selected_option = None;
                self.selection.selected_method = None;
            }
            self.next_enabled = self.selected_option.is_some();
        }
    }
}
