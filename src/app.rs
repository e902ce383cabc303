use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use std::time::Instant;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::navigation::{NavConfig, NavigationError, Navigator, Outcome, Page};
use crate::selection::SelectionState;
use crate::session::SessionStore;
use crate::ui::dialogs::HelpDialog;
use crate::ui::keybindings::{command_for, Command};
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::UpdateWizard;

pub struct App {
    config: Config,
    wizard: UpdateWizard,
    help_dialog: HelpDialog,
    /// Taken when the session ends
    store: Option<SessionStore>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let store = SessionStore::start(&config.sessions_path());
        info!(session = %store.id, "Starting session");

        let navigator = Navigator::new(NavConfig::default(), SelectionState::from_store(&store))
            .with_transition_delay(config.transition_delay());

        Self {
            wizard: UpdateWizard::new(catalog, navigator),
            help_dialog: HelpDialog::new(),
            store: Some(store),
            should_quit: false,
            config,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let result = self.run_loop();
        self.finish(result)
    }

    fn run_loop(&mut self) -> Result<()> {
        let mut guard = TerminalGuard::new().context("Failed to set up terminal")?;
        self.sync_selection(self.wizard.current_page())?;

        let tick_rate = self.config.tick_rate();

        while !self.should_quit {
            let page = self.wizard.current_page();
            guard.terminal_mut().draw(|f| {
                self.wizard.render(f);
                self.help_dialog.render(f, page);
            })?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code)?;
                    }
                    Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                        self.handle_click(mouse.column, mouse.row)?;
                    }
                    _ => {}
                }
            }

            self.on_tick(Instant::now())?;
        }

        guard.restore()
    }

    /// End the session whatever the loop returned; the loop's error wins
    pub(crate) fn finish(&mut self, result: Result<()>) -> Result<()> {
        let ended = self.end_session();
        match (result, ended) {
            (Err(err), Err(end_err)) => {
                warn!(error = %end_err, "Failed to end session after error");
                Err(err)
            }
            (result, ended) => result.and(ended),
        }
    }

    pub fn current_page(&self) -> Page {
        self.wizard.current_page()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn store(&self) -> Option<&SessionStore> {
        self.store.as_ref()
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Result<()> {
        if self.help_dialog.visible {
            self.help_dialog.visible = false;
            return Ok(());
        }

        let page = self.wizard.current_page();
        let Some(command) = command_for(page, code) else {
            return Ok(());
        };

        match command {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.help_dialog.toggle(),
            _ => {
                let result = self.wizard.apply(command);
                self.after_event(page, result)?;
            }
        }
        Ok(())
    }

    fn handle_click(&mut self, column: u16, row: u16) -> Result<()> {
        let page = self.wizard.current_page();
        let result = self.wizard.click(column, row);
        self.after_event(page, result)
    }

    pub(crate) fn on_tick(&mut self, now: Instant) -> Result<()> {
        let page = self.wizard.current_page();
        if self.wizard.tick(now).is_some() {
            self.sync_selection(page)?;
        }
        Ok(())
    }

    fn after_event(
        &mut self,
        before: Page,
        result: Result<Outcome, NavigationError>,
    ) -> Result<()> {
        if let Err(err) = result {
            warn!(page = %before, error = %err, "Navigation failed");
        }
        self.sync_selection(before)
    }

    /// Write the selection to the session store; a page that was just
    /// entered reads it back from there
    fn sync_selection(&mut self, before: Page) -> Result<()> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        self.wizard.navigator().selection().persist(store)?;

        if self.wizard.current_page() != before {
            *self.wizard.navigator_mut().selection_mut() = SelectionState::from_store(store);
        }
        Ok(())
    }

    pub(crate) fn end_session(&mut self) -> Result<()> {
        if let Some(store) = self.store.take() {
            info!(session = %store.id, "Ending session");
            store.end()?;
        }
        Ok(())
    }
}
