use ratatui::style::{Color, Style};

use crate::tui::input::InputMode;
use habitpro_types::NoticeLevel;

/// Habit Tracker Pro palette
pub struct HabitTheme {
    pub primary: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub mode_normal: Color,
    pub mode_insert: Color,
}

impl Default for HabitTheme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(124, 58, 237),       // #7C3AED
            text_primary: Color::Rgb(224, 224, 224), // #E0E0E0
            text_dim: Color::Rgb(128, 128, 128),     // #808080
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            mode_normal: Color::Blue,
            mode_insert: Color::Green,
        }
    }
}

impl HabitTheme {
    /// Titles, borders and the active element
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn mode_style(&self, mode: InputMode) -> Style {
        let color = match mode {
            InputMode::Normal => self.mode_normal,
            InputMode::Insert => self.mode_insert,
        };
        Style::default().fg(color)
    }

    pub fn notice_style(&self, level: NoticeLevel) -> Style {
        let color = match level {
            NoticeLevel::Success => self.success,
            NoticeLevel::Error => self.error,
            NoticeLevel::Info => self.info,
        };
        Style::default().fg(color)
    }
}
