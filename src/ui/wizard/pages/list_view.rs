//! Application list rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::wizard::UpdateWizard;

impl UpdateWizard {
    pub(crate) fn render_list_view(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(4)])
            .split(area);

        let items: Vec<ListItem> = self
            .catalog()
            .applications
            .iter()
            .map(|app| {
                let latest = app.latest_version().unwrap_or("-");
                let devices: u64 = app.workflows.iter().map(|wf| wf.devices).sum();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<20}", app.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("v{latest:<10}"), Style::default().fg(Color::Cyan)),
                    Span::raw(format!(
                        "{} workflows, {} devices",
                        app.workflows.len(),
                        devices
                    )),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Applications ")
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.app_state);

        let upload = match self.upload_version() {
            Some(version) => Line::from(vec![
                Span::styled("Upload: ", Style::default().fg(Color::Gray)),
                Span::styled(format!("v{version}"), Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", self.upload_type.label()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(format!(
                    "  {} impacted workflows",
                    self.navigator().selection().impacted_count.unwrap_or(0)
                )),
            ]),
            None => Line::from(Span::styled(
                "No uploaded versions",
                Style::default().fg(Color::DarkGray),
            )),
        };

        let footer = Paragraph::new(vec![upload, self.buttons_line()])
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, chunks[1]);
    }
}
