use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::App;
use crate::tui::input::InputMode;
use crate::tui::theme::HabitTheme;
use crate::tui::widgets::popup::centered_rows;

pub fn render(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    let card = centered_rows(60, 10, area);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(card);

    let intro = Paragraph::new(vec![
        Line::from(Span::styled("Admin Access", theme.primary_style().bold())),
        Line::from(Span::styled(
            "Enter the admin password to continue",
            theme.text_dim_style(),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(intro, layout[0]);

    let editing = app.input_mode == InputMode::Insert;
    app.password_form
        .render(frame, theme, layout[1], " Verify Password ", editing);
}
