//! Step2: review before publishing

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::impact::total_device_count;
use crate::ui::wizard::UpdateWizard;

impl UpdateWizard {
    pub(crate) fn render_review(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(4), // Summary
                Constraint::Min(3),    // Workflows
                Constraint::Length(1), // Buttons
            ])
            .split(area);

        let selection = self.navigator().selection();
        let method = self.chosen_method();
        let impacted = self.impacted();

        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
        let summary = vec![
            Line::from(vec![
                label("Application: "),
                Span::raw(format!(
                    "{} v{}",
                    selection.selected_app.as_deref().unwrap_or("-"),
                    selection.upload_version.as_deref().unwrap_or("-"),
                )),
            ]),
            Line::from(vec![
                label("Method:      "),
                Span::styled(
                    method.info().label,
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("Devices:     "),
                Span::styled(
                    total_device_count(&impacted).to_string(),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(summary), chunks[0]);

        let workflows: Vec<Line> = impacted
            .iter()
            .map(|item| {
                Line::from(format!(
                    "  {} ({}, {} devices)",
                    item.workflow.name, item.version_mode, item.workflow.devices
                ))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(workflows).wrap(Wrap { trim: false }),
            chunks[1],
        );

        frame.render_widget(Paragraph::new(self.buttons_line()), chunks[2]);
    }
}
