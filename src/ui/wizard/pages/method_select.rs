//! Step1: impacted workflows and update method choice

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::impact::total_device_count;
use crate::navigation::UpdateMethod;
use crate::ui::wizard::UpdateWizard;

impl UpdateWizard {
    pub(crate) fn render_method_select(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Intro
                Constraint::Min(5),    // Workflow table
                Constraint::Length(1), // Total
                Constraint::Length(5), // Options
                Constraint::Length(3), // Tooltip
                Constraint::Length(1), // Buttons
            ])
            .split(area);

        let selection = self.navigator().selection();
        let intro = Paragraph::new(Line::from(format!(
            "Uploading {} v{} changes the app version installed by these workflows:",
            selection.selected_app.as_deref().unwrap_or("-"),
            selection.upload_version.as_deref().unwrap_or("-"),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[0]);

        let impacted = self.impacted();
        let header = Row::new(["Name", "Version", "Type", "Version Mode", "Devices"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = impacted.iter().map(|item| {
            Row::new(vec![
                Cell::from(item.workflow.name.clone()),
                Cell::from(item.workflow.version.clone()),
                Cell::from(item.workflow.kind.clone()),
                Cell::from(item.version_mode.clone()),
                Cell::from(item.workflow.devices.to_string()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(18),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(table, chunks[1]);

        let total = Paragraph::new(Line::from(vec![
            Span::styled("Total devices: ", Style::default().fg(Color::Gray)),
            Span::styled(
                total_device_count(&impacted).to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        frame.render_widget(total, chunks[2]);

        let chosen = self.navigator().selected_option();
        let highlighted = self.highlighted_option();
        let options: Vec<Line> = UpdateMethod::all()
            .iter()
            .map(|method| {
                let marker = if chosen == Some(*method) { "•" } else { "○" };
                let style = if highlighted == Some(*method) {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!(" {marker} {}", method.info().label),
                    style,
                ))
            })
            .collect();
        frame.render_widget(
            Paragraph::new(options).block(Block::default().title(" Update method ")),
            chunks[3],
        );

        // Tooltip for the highlighted option
        if let Some(method) = highlighted {
            let tooltip = Paragraph::new(method.info().description)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true });
            frame.render_widget(tooltip, chunks[4]);
        }

        frame.render_widget(Paragraph::new(self.buttons_line()), chunks[5]);
    }
}
