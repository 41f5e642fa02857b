//! Keyboard event handling by input mode.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode};

use super::Action;
use super::bindings::{Binding, Keymap, LookupResult};
use super::chord::KeyPress;

/// How long a pending chord prefix stays alive before it is abandoned.
pub const CHORD_TIMEOUT_MS: u64 = 1000;

/// Accumulates key presses toward multi-key chords.
///
/// An exact match dispatches the binding and clears the pending state; a
/// strict prefix waits for the next press; anything else abandons the
/// prefix and retries the lone key, so `g` followed by `j` still selects
/// down. Pending presses older than the timeout are discarded first.
#[derive(Debug)]
pub struct ChordTracker {
    pending: Vec<KeyPress>,
    last_press: Option<Instant>,
    timeout: Duration,
}

impl Default for ChordTracker {
    fn default() -> Self {
        Self::new(CHORD_TIMEOUT_MS)
    }
}

impl ChordTracker {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            pending: Vec::new(),
            last_press: None,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Feed one key press; returns the binding it completes, if any.
    pub fn press(&mut self, keymap: &Keymap, press: KeyPress) -> Option<Binding> {
        if let Some(last) = self.last_press {
            if last.elapsed() > self.timeout {
                self.pending.clear();
            }
        }
        self.last_press = Some(Instant::now());

        self.pending.push(press);

        match keymap.lookup(&self.pending) {
            LookupResult::Match(binding) => {
                self.pending.clear();
                Some(binding)
            }
            LookupResult::Prefix => None,
            LookupResult::NoMatch => {
                let had_prefix = self.pending.len() > 1;
                self.pending.clear();
                if !had_prefix {
                    return None;
                }
                // Retry the key on its own after an abandoned prefix
                self.pending.push(press);
                match keymap.lookup(&self.pending) {
                    LookupResult::Match(binding) => {
                        self.pending.clear();
                        Some(binding)
                    }
                    LookupResult::Prefix => None,
                    LookupResult::NoMatch => {
                        self.pending.clear();
                        None
                    }
                }
            }
        }
    }

    /// Pending presses, for the status line chord indicator.
    pub fn pending(&self) -> &[KeyPress] {
        &self.pending
    }
}

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    // Hard-wired quit, never remappable, honored in every mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Search => handle_search_mode(key),
        InputMode::Help => handle_help_mode(key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Action {
    // 'Q' also quits, but only where it cannot be query input
    if key.code == KeyCode::Char('Q') {
        return Action::Quit;
    }

    // An open composer captures Esc to discard itself
    if key.code == KeyCode::Esc && app.composer.is_some() {
        return Action::CloseComposer;
    }

    let press = KeyPress::normalize(key);
    match app.press_chord(press) {
        Some(binding) => Action::from(binding),
        None => Action::None,
    }
}

fn handle_search_mode(key: KeyEvent) -> Action {
    // Control and alt chords are not query input
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Action::None;
    }

    match key.code {
        KeyCode::Esc => Action::CancelSearch,
        KeyCode::Enter => Action::SubmitSearch,
        KeyCode::Backspace => Action::SearchBackspace,
        KeyCode::Char(c) => Action::SearchInputChar(c),
        _ => Action::None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseHelp,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBindings;
    use crate::content::Route;
    use crate::events::bindings::Handler;
    use std::thread;

    fn keymap() -> Keymap {
        Keymap::resolve(&KeyBindings::default()).unwrap()
    }

    fn press(c: char) -> KeyPress {
        KeyPress::plain(KeyCode::Char(c))
    }

    #[test]
    fn test_single_key_dispatch() {
        let keymap = keymap();
        let mut tracker = ChordTracker::default();

        assert_eq!(
            tracker.press(&keymap, press('j')),
            Some(Binding::Handler(Handler::SelectDown))
        );
        assert!(tracker.pending().is_empty());
    }

    #[test]
    fn test_sequence_dispatch() {
        let keymap = keymap();
        let mut tracker = ChordTracker::default();

        assert_eq!(tracker.press(&keymap, press('g')), None);
        assert_eq!(tracker.pending().len(), 1);
        assert_eq!(
            tracker.press(&keymap, press('t')),
            Some(Binding::Route(Route::Top))
        );
        assert!(tracker.pending().is_empty());
    }

    #[test]
    fn test_abandoned_prefix_retries_lone_key() {
        let keymap = keymap();
        let mut tracker = ChordTracker::default();

        // 'g' starts a sequence, 'j' is not a continuation but is bound
        // on its own
        assert_eq!(tracker.press(&keymap, press('g')), None);
        assert_eq!(
            tracker.press(&keymap, press('j')),
            Some(Binding::Handler(Handler::SelectDown))
        );
    }

    #[test]
    fn test_unbound_key_clears_pending() {
        let keymap = keymap();
        let mut tracker = ChordTracker::default();

        assert_eq!(tracker.press(&keymap, press('z')), None);
        assert!(tracker.pending().is_empty());
    }

    #[test]
    fn test_pending_expires_after_timeout() {
        let keymap = keymap();
        let mut tracker = ChordTracker::new(10);

        assert_eq!(tracker.press(&keymap, press('g')), None);
        thread::sleep(Duration::from_millis(20));

        // The stale 'g' is gone; 'h' alone matches nothing
        assert_eq!(tracker.press(&keymap, press('h')), None);
        assert!(tracker.pending().is_empty());
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let mut app =
            crate::app::App::new(&crate::config::Config::default()).unwrap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);

        app.apply(Action::ShowSearch);
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);

        app.apply(Action::CancelSearch);
        app.apply(Action::ShowHelp);
        assert_eq!(handle_key_event(&mut app, ctrl_c), Action::Quit);
    }

    #[test]
    fn test_search_mode_ignores_modified_chars() {
        let ctrl_f = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(handle_search_mode(ctrl_f), Action::None);

        // Shift still types: capitals arrive as shifted chars
        let shift_t = KeyEvent::new(KeyCode::Char('T'), KeyModifiers::SHIFT);
        assert_eq!(handle_search_mode(shift_t), Action::SearchInputChar('T'));
    }

    #[test]
    fn test_sequence_within_timeout_still_matches() {
        let keymap = keymap();
        let mut tracker = ChordTracker::new(500);

        assert_eq!(tracker.press(&keymap, press('m')), None);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(
            tracker.press(&keymap, press('w')),
            Some(Binding::Click(
                crate::events::bindings::ClickTarget::Notify(
                    crate::content::NotifyLevel::Watching
                )
            ))
        );
    }
}
