//! Render methods for each page of the wizard

mod empty;
mod list_view;
mod method_select;
mod outcome;
mod review;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::UpdateWizard;

impl UpdateWizard {
    /// Button row for the current page; the primary button is highlighted
    /// and disabled buttons are dimmed
    pub(crate) fn buttons_line(&self) -> Line<'static> {
        let navigator = self.navigator();
        let actions = navigator.available_actions();
        let primary = actions.last().copied();

        let mut spans = Vec::new();
        for action in actions {
            let style = if !navigator.is_action_enabled(action) {
                Style::default().fg(Color::DarkGray)
            } else if Some(action) == primary {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::raw("   "));
            spans.push(Span::styled(format!(" {} ", action.label()), style));
        }
        Line::from(spans)
    }
}
