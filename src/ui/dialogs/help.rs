use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::navigation::Page;
use crate::ui::keybindings::{shortcuts_for_context, ShortcutContext};

#[derive(Default)]
pub struct HelpDialog {
    pub visible: bool,
}

impl HelpDialog {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Shortcut sections shown for `page`: the page's own keys, then global ones
    pub fn sections(page: Page) -> Vec<ShortcutContext> {
        vec![ShortcutContext::for_page(page), ShortcutContext::Global]
    }

    pub fn render(&self, frame: &mut Frame, page: Page) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);

        let mut help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )),
            Line::from(""),
        ];

        for context in Self::sections(page) {
            help_text.push(Line::from(Span::styled(
                format!("{}:", context.display_name()),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )));
            for shortcut in shortcuts_for_context(context) {
                help_text.push(Line::from(vec![
                    Span::styled(
                        shortcut.key_display_padded(),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(shortcut.description),
                ]));
            }
            help_text.push(Line::from(""));
        }

        help_text.push(Line::from(Span::styled(
            "Mouse: click outside a dialog to close it",
            Style::default().fg(Color::DarkGray),
        )));
        help_text.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::Gray),
        )));

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left);

        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_dialog_toggle() {
        let mut dialog = HelpDialog::new();
        assert!(!dialog.visible);

        dialog.toggle();
        assert!(dialog.visible);

        dialog.toggle();
        assert!(!dialog.visible);
    }

    #[test]
    fn test_sections_lead_with_page_context() {
        assert_eq!(
            HelpDialog::sections(Page::Step1),
            vec![ShortcutContext::MethodSelect, ShortcutContext::Global]
        );
    }
}
