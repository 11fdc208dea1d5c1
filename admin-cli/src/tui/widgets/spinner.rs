use ratatui::prelude::*;
use ratatui::widgets::*;

use super::popup::centered_rows;
use crate::tui::theme::HabitTheme;

const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct Spinner {
    pub message: String,
    pub frame: usize,
    pub spinning: bool,
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            message: String::new(),
            frame: 0,
            spinning: false,
        }
    }

    pub fn start(&mut self, message: &str) {
        self.message = message.to_string();
        self.spinning = true;
    }

    pub fn stop(&mut self) {
        self.spinning = false;
        self.frame = 0;
    }

    pub fn tick(&mut self) {
        if self.spinning {
            self.frame = (self.frame + 1) % SPINNER_CHARS.len();
        }
    }

    /// Small centered overlay
    pub fn render(&self, frame: &mut Frame, theme: &HabitTheme) {
        if !self.spinning {
            return;
        }

        let area = centered_rows(40, 3, frame.area());
        frame.render_widget(Clear, area);

        let text = format!("{} {}", SPINNER_CHARS[self.frame], self.message);
        let widget = Paragraph::new(text)
            .style(theme.text_primary_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.info)),
            );

        frame.render_widget(widget, area);
    }
}
