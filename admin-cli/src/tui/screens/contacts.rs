use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::App;
use crate::tui::theme::HabitTheme;

pub fn render(frame: &mut Frame, theme: &HabitTheme, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let count = app.contacts.records.as_ref().map_or(0, Vec::len);
    let title = Paragraph::new(Line::from(vec![
        Span::styled("Customer Submissions", theme.primary_style().bold()),
        Span::styled(format!("  {} total submissions", count), theme.text_dim_style()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(theme.primary_style()));
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .title(Span::styled(" Contacts ", theme.primary_style()))
        .borders(Borders::ALL)
        .border_style(theme.primary_style());

    if app.contacts.loading {
        let loading = Paragraph::new("Loading customer data...")
            .style(theme.text_dim_style())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, layout[1]);
        return;
    }

    if let Some(failure) = &app.contacts.failure {
        let alert = Paragraph::new(failure.message())
            .style(theme.error_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(alert, layout[1]);
        return;
    }

    let records = match &app.contacts.records {
        Some(records) if !records.is_empty() => records,
        _ => {
            let empty = Paragraph::new("No customer submissions yet.")
                .style(theme.text_dim_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, layout[1]);
            return;
        }
    };

    // Keep the selection in view: borders and header take three rows
    let visible = layout[1].height.saturating_sub(3).max(1) as usize;
    let selected = app.contacts.selected_index;
    let offset = selected.saturating_sub(visible - 1);

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, record)| {
            let style = if i == selected {
                Style::default().fg(theme.primary).bold()
            } else {
                theme.text_primary_style()
            };
            Row::new(vec![
                Cell::from(record.email.clone()),
                Cell::from(record.mobile.clone()),
                Cell::from(record.submitted_at_local()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["Email", "Mobile", "Submission Date"])
        .style(theme.primary_style().bold());

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(20),
            Constraint::Percentage(35),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, layout[1]);
}
