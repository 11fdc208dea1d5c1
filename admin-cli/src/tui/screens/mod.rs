use ratatui::prelude::*;

use crate::tui::app::App;
use crate::tui::theme::HabitTheme;

mod contacts;
mod identity;
mod password;

pub fn render_password(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    password::render(frame, theme, app, area);
}

pub fn render_identity(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    identity::render(frame, theme, app, area);
}

pub fn render_contacts(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    contacts::render(frame, theme, app, area);
}
