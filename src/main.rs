mod app;
mod config;
mod content;
mod defer;
mod error;
mod events;
mod log;
mod navigator;
mod tui;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::stdout;

use app::App;
use config::Config;
use events::EventHandler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut section_override: Option<String> = None;
    let mut slack_override: Option<i64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--section" | "-s" => {
                if i + 1 < args.len() {
                    section_override = Some(args[i + 1].clone());
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --section requires a section name");
                    i += 1;
                }
            }
            "--slack" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse::<i64>() {
                        Ok(value) => slack_override = Some(value),
                        Err(_) => {
                            eprintln!("Warning: --slack requires a number, ignoring '{}'", args[i + 1])
                        }
                    }
                    i += 2;
                    continue;
                } else {
                    eprintln!("Warning: --slack requires a number");
                    i += 1;
                }
            }
            _ => {
                // Unknown flag, ignore
                i += 1;
            }
        }
    }

    // Load config with precedence: CLI > config file > default
    let config = Config::load().with_overrides(section_override, slack_override);

    // Create app state before touching the terminal so a bad keybinding
    // override in the config surfaces as a plain error message
    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    // Event stream for keyboard
    let mut event_stream = EventStream::new();

    loop {
        // The section bar and status line each take one row
        let size = terminal.size()?;
        app.viewport_height = size.height.saturating_sub(2) as i64;

        // Render
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        let Some(Ok(event)) = event_stream.next().await else {
            break;
        };

        let action = EventHandler::handle_event(app, &event);
        app.apply(action);

        // Deferred intents run after the triggering event, in order,
        // before the next render
        for deferred in app.deferred.drain() {
            app.apply(deferred);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
