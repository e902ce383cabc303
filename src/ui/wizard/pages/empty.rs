use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::wizard::UpdateWizard;

impl UpdateWizard {
    pub(crate) fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let selection = self.navigator().selection();
        let message = vec![
            Line::from(format!(
                "No workflows use {} v{}.",
                selection.selected_app.as_deref().unwrap_or("-"),
                selection.upload_version.as_deref().unwrap_or("-"),
            )),
            Line::from(""),
            Line::styled(
                "Workflow-assigned devices keep their current app version.",
                Style::default().fg(Color::Gray),
            ),
        ];
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[0],
        );
        frame.render_widget(Paragraph::new(self.buttons_line()), chunks[1]);
    }
}
