use ratatui::prelude::*;
use ratatui::widgets::*;
use zeroize::Zeroize;

use crate::tui::theme::HabitTheme;

pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    /// Render the value as bullets
    pub secret: bool,
    pub error: Option<String>,
}

/// Text fields edited in insert mode
pub struct Form {
    pub fields: Vec<FormField>,
    pub active_index: usize,
}

impl Form {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            active_index: 0,
        }
    }

    pub fn add_secret_field(&mut self, label: &str, placeholder: &str) {
        self.push_field(label, placeholder, true);
    }

    fn push_field(&mut self, label: &str, placeholder: &str, secret: bool) {
        self.fields.push(FormField {
            label: label.to_string(),
            value: String::new(),
            placeholder: placeholder.to_string(),
            secret,
            error: None,
        });
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.active_index) {
            field.value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.active_index) {
            field.value.pop();
        }
    }

    pub fn active_value(&self) -> &str {
        self.fields
            .get(self.active_index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set_active_error(&mut self, error: Option<String>) {
        if let Some(field) = self.fields.get_mut(self.active_index) {
            field.error = error;
        }
    }

    pub fn active_error(&self) -> Option<&str> {
        self.fields
            .get(self.active_index)
            .and_then(|f| f.error.as_deref())
    }

    /// Wipe every value and error
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
            field.error = None;
        }
        self.active_index = 0;
    }

    pub fn render(&self, frame: &mut Frame, theme: &HabitTheme, area: Rect, title: &str, editing: bool) {
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.primary_style());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_height = 3u16; // label + input line + error
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Length(field_height))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let is_active = editing && i == self.active_index;

            let display_value = if field.value.is_empty() {
                field.placeholder.clone()
            } else if field.secret {
                "•".repeat(field.value.chars().count())
            } else {
                field.value.clone()
            };

            let style = if is_active {
                theme.primary_style()
            } else if field.value.is_empty() {
                theme.text_dim_style()
            } else {
                theme.text_primary_style()
            };

            let label_style = if is_active {
                theme.primary_style().bold()
            } else {
                theme.text_primary_style()
            };

            let marker = if is_active { "▸" } else { " " };
            let mut text = vec![
                Line::from(Span::styled(field.label.as_str(), label_style)),
                Line::from(Span::styled(format!("{} {}", marker, display_value), style)),
            ];
            if let Some(error) = &field.error {
                text.push(Line::from(Span::styled(format!("  {}", error), theme.error_style())));
            }

            frame.render_widget(Paragraph::new(text), field_areas[i]);
        }
    }
}
