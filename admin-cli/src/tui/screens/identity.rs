use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::identity::LoginStatus;
use crate::tui::app::App;
use crate::tui::theme::HabitTheme;

pub fn render(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("✓ Password verified", Style::default().fg(theme.success))),
        Line::from(""),
        Line::from(Span::styled(
            "Login with Internet Identity to view customer submissions",
            theme.text_primary_style(),
        )),
        Line::from(""),
    ];

    match &app.login_status {
        LoginStatus::LoggingIn(Some(prompt)) => {
            lines.push(Line::from(Span::styled(
                format!("Open {}", prompt.verification_uri),
                theme.text_primary_style(),
            )));
            lines.push(Line::from(vec![
                Span::styled("and enter the code ", theme.text_primary_style()),
                Span::styled(prompt.user_code.as_str(), Style::default().fg(theme.warning).bold()),
            ]));
        }
        LoginStatus::LoggingIn(None) => {
            lines.push(Line::from(Span::styled(
                "Contacting identity provider...",
                theme.text_dim_style(),
            )));
        }
        LoginStatus::LoginError(msg) => {
            lines.push(Line::from(Span::styled(msg.as_str(), theme.error_style())));
        }
        LoginStatus::Idle | LoginStatus::Success => {}
    }

    lines.push(Line::from(""));
    let action = if app.gate.login_in_flight() {
        Span::styled("Logging in...", theme.text_dim_style())
    } else {
        Span::styled("Press l to login", theme.primary_style().bold())
    };
    lines.push(Line::from(action));

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Identity Login ", theme.primary_style()))
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );
    frame.render_widget(panel, area);
}
