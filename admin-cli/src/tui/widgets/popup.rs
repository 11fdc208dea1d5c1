use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::HabitTheme;

/// Modal box drawn over the current screen
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
    pub border: Color,
}

impl Popup {
    pub fn new(title: &str, lines: Vec<String>, border: Color) -> Self {
        Self {
            title: title.to_string(),
            lines,
            border,
        }
    }

    pub fn render(&self, frame: &mut Frame, theme: &HabitTheme) {
        let area = centered_rect(60, 40, frame.area());
        frame.render_widget(Clear, area);

        let mut text = vec![Line::from("")];
        text.extend(
            self.lines
                .iter()
                .map(|l| Line::from(Span::styled(l.as_str(), theme.text_primary_style()))),
        );

        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(self.title.as_str(), Style::default().fg(self.border).bold()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.border)),
            );

        frame.render_widget(widget, area);
    }
}

/// Centered rect of the given percentage width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    horizontal_center(percent_x, popup_layout[1])
}

/// Centered rect of the given percentage width and a fixed number of rows
pub fn centered_rows(percent_x: u16, rows: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(rows),
            Constraint::Fill(1),
        ])
        .split(area);

    horizontal_center(percent_x, popup_layout[1])
}

fn horizontal_center(percent_x: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area)[1]
}
