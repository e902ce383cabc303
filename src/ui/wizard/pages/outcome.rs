//! Success and error pages

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::impact::total_device_count;
use crate::navigation::UpdateMethod;
use crate::ui::wizard::UpdateWizard;

impl UpdateWizard {
    pub(crate) fn render_success(&self, frame: &mut Frame, area: Rect, method: UpdateMethod) {
        let info = method.info();
        let impacted = self.impacted();
        let text = vec![
            Line::styled(
                info.success_title,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from(info.success_message),
            Line::from(""),
            Line::styled(
                format!(
                    "{} workflows, {} devices",
                    impacted.len(),
                    total_device_count(&impacted)
                ),
                Style::default().fg(Color::Gray),
            ),
        ];
        self.render_message(frame, area, text);
    }

    pub(crate) fn render_error(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::styled(
                "Something went wrong",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from("The update could not be applied. No devices were changed."),
            Line::styled(
                "Retry returns to the review step.",
                Style::default().fg(Color::Gray),
            ),
        ];
        self.render_message(frame, area, text);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, text: Vec<Line<'static>>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[0],
        );
        frame.render_widget(Paragraph::new(self.buttons_line()), chunks[1]);
    }
}
