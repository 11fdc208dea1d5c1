use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

mod app;
mod event;
mod input;
mod screens;
mod theme;
mod ui;
pub mod widgets;

pub use app::App;
pub use event::EventHandler;

/// Run the TUI application
pub async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut event_handler = EventHandler::new();
    app.set_sender(event_handler.sender());

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if let Some(event) = event_handler.next().await {
            if !app.handle_event(event) {
                break;
            }
        }
    }

    Ok(())
}
