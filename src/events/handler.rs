//! Central event handler that turns terminal events into actions.

use crossterm::event::{Event, KeyEventKind};

use crate::app::App;

use super::Action;
use super::keyboard::handle_key_event;

/// Central event handler for the application.
pub struct EventHandler;

impl EventHandler {
    /// Handle a crossterm event and return an action.
    ///
    /// Only key presses produce actions; repeats, releases, and resizes
    /// are ignored (the viewport is re-read from the terminal every
    /// frame).
    pub fn handle_event(app: &mut App, event: &Event) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, *key),
            _ => Action::None,
        }
    }
}
