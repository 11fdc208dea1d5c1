use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::admin::GateState;
use crate::identity::LoginStatus;
use crate::tui::app::App;
use crate::tui::input::InputMode;
use crate::tui::screens;
use crate::tui::theme::HabitTheme;
use crate::tui::widgets::Popup;

/// Render the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let theme = HabitTheme::default();

    // Header grows with the notice stack
    let header_height = 3 + app.notices.len() as u16;
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, &theme, app, main_layout[0]);

    match app.gate.state() {
        GateState::Locked => screens::render_password(frame, &theme, app, main_layout[1]),
        GateState::PasswordVerified => screens::render_identity(frame, &theme, app, main_layout[1]),
        GateState::FullyAuthenticated => screens::render_contacts(frame, &theme, app, main_layout[1]),
    }

    render_footer(frame, &theme, app, main_layout[2]);

    app.spinner.render(frame, &theme);

    if let LoginStatus::LoggingIn(Some(prompt)) = &app.login_status {
        Popup::new(
            " Approve Login ",
            vec![
                "Open this address in a browser:".to_string(),
                prompt.verification_uri.clone(),
                String::new(),
                format!("Code: {}", prompt.user_code),
            ],
            theme.warning,
        )
        .render(frame, &theme);
    }
}

fn render_header(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled(habitpro_types::PRODUCT_NAME, theme.primary_style().bold()),
        Span::styled(" Admin", theme.primary_style()),
        Span::styled(format!(" │ {}", app.gate.state().as_str()), theme.text_dim_style()),
    ])];

    for notice in &app.notices {
        lines.push(Line::from(Span::styled(
            notice.message.as_str(),
            theme.notice_style(notice.level),
        )));
    }

    let header = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.primary_style()),
    );

    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    let mode_text = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Insert => "INSERT",
    };

    let help_text = match app.gate.state() {
        GateState::Locked if app.input_mode == InputMode::Insert => "Enter: Verify | Esc: Normal",
        GateState::Locked => "i: Edit | Enter: Verify | q: Quit",
        GateState::PasswordVerified if app.gate.login_in_flight() => "Waiting for login | b: Back | q: Quit",
        GateState::PasswordVerified => "l: Login | b: Back | q: Quit",
        GateState::FullyAuthenticated if app.contacts.can_export() => {
            "j/k: Navigate | e: Export CSV | o: Logout | q: Quit"
        }
        GateState::FullyAuthenticated => "o: Logout | q: Quit",
    };

    let footer_line = Line::from(vec![
        Span::styled(format!(" {} ", mode_text), theme.mode_style(app.input_mode).bold()),
        Span::styled(" │ ", theme.text_dim_style()),
        Span::styled(help_text, theme.text_dim_style()),
    ]);

    let footer = Paragraph::new(footer_line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.primary_style()),
        );

    frame.render_widget(footer, area);
}
