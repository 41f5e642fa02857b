//! Declarative chord binding tables and the startup-resolved keymap.
//!
//! Three tables mirror the three kinds of shortcut: section routes,
//! activation of a target element, and named handler functions. Each
//! table maps a chord spec string to a strongly-typed target; all specs
//! are parsed once by `Keymap::resolve` at startup, so dispatch at key
//! time is an enum lookup, never string matching.

use crate::config::KeyBindings;
use crate::content::{NotifyLevel, Route};
use crate::error::ChordResult;

use super::chord::{Chord, KeyPress, parse_alternates};

/// An on-screen element a shortcut activates, the terminal analogue of
/// clicking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    BookmarkPost,
    CreateTopic,
    DeletePost,
    EditPost,
    StarTopic,
    LikePost,
    Notify(NotifyLevel),
    Notifications,
    OpenTopic,
    ReplyToTopic,
    ReplyToPost,
    ShareTopic,
    SharePost,
    FlagPost,
}

impl ClickTarget {
    pub fn describe(&self) -> &'static str {
        match self {
            ClickTarget::BookmarkPost => "Bookmark selected post",
            ClickTarget::CreateTopic => "Create new topic",
            ClickTarget::DeletePost => "Delete selected post",
            ClickTarget::EditPost => "Edit selected post",
            ClickTarget::StarTopic => "Star topic",
            ClickTarget::LikePost => "Like selected post",
            ClickTarget::Notify(NotifyLevel::Muted) => "Mute topic",
            ClickTarget::Notify(NotifyLevel::Regular) => "Set topic to regular",
            ClickTarget::Notify(NotifyLevel::Tracking) => "Track topic",
            ClickTarget::Notify(NotifyLevel::Watching) => "Watch topic",
            ClickTarget::Notifications => "Open notifications",
            ClickTarget::OpenTopic => "Open selected topic",
            ClickTarget::ReplyToTopic => "Reply to topic",
            ClickTarget::ReplyToPost => "Reply to selected post",
            ClickTarget::ShareTopic => "Share topic",
            ClickTarget::SharePost => "Share selected post",
            ClickTarget::FlagPost => "Flag selected post",
        }
    }
}

/// A named handler function exposed to the binding tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    GoToFirstPost,
    GoToLastPost,
    SelectDown,
    SelectUp,
    GoBack,
    NextSection,
    PrevSection,
    ShowSearch,
    ShowHelp,
    QuoteReply,
}

impl Handler {
    /// Stable name used for config keybinding overrides.
    pub fn name(&self) -> &'static str {
        match self {
            Handler::GoToFirstPost => "go_to_first_post",
            Handler::GoToLastPost => "go_to_last_post",
            Handler::SelectDown => "select_down",
            Handler::SelectUp => "select_up",
            Handler::GoBack => "go_back",
            Handler::NextSection => "next_section",
            Handler::PrevSection => "prev_section",
            Handler::ShowSearch => "show_search",
            Handler::ShowHelp => "show_help",
            Handler::QuoteReply => "quote_reply",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Handler::GoToFirstPost => "Jump to first post",
            Handler::GoToLastPost => "Jump to last post",
            Handler::SelectDown => "Select next item",
            Handler::SelectUp => "Select previous item",
            Handler::GoBack => "Go back",
            Handler::NextSection => "Next section",
            Handler::PrevSection => "Previous section",
            Handler::ShowSearch => "Search topics",
            Handler::ShowHelp => "Show this help",
            Handler::QuoteReply => "Quote reply",
        }
    }
}

/// The resolved target of a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Route(Route),
    Click(ClickTarget),
    Handler(Handler),
}

impl Binding {
    pub fn describe(&self) -> String {
        match self {
            Binding::Route(route) => format!("Go to {}", route.label()),
            Binding::Click(target) => target.describe().to_string(),
            Binding::Handler(handler) => handler.describe().to_string(),
        }
    }
}

/// Chords that navigate to a section.
pub const PATH_BINDINGS: &[(&str, Route)] = &[
    ("g h", Route::Home),
    ("g l", Route::Latest),
    ("g n", Route::New),
    ("g u", Route::Unread),
    ("g f", Route::Starred),
    ("g c", Route::Categories),
    ("g t", Route::Top),
];

/// Chords that activate an on-screen element.
pub const CLICK_BINDINGS: &[(&str, ClickTarget)] = &[
    ("b", ClickTarget::BookmarkPost),
    ("c", ClickTarget::CreateTopic),
    ("d", ClickTarget::DeletePost),
    ("e", ClickTarget::EditPost),
    ("f", ClickTarget::StarTopic),
    ("l", ClickTarget::LikePost),
    ("m m", ClickTarget::Notify(NotifyLevel::Muted)),
    ("m r", ClickTarget::Notify(NotifyLevel::Regular)),
    ("m t", ClickTarget::Notify(NotifyLevel::Tracking)),
    ("m w", ClickTarget::Notify(NotifyLevel::Watching)),
    ("n", ClickTarget::Notifications),
    ("o,enter", ClickTarget::OpenTopic),
    ("shift+r", ClickTarget::ReplyToTopic),
    ("r", ClickTarget::ReplyToPost),
    ("shift+s", ClickTarget::ShareTopic),
    ("s", ClickTarget::SharePost),
    ("!", ClickTarget::FlagPost),
];

/// Chords bound to named handler functions.
pub const FUNCTION_BINDINGS: &[(&str, Handler)] = &[
    ("home", Handler::GoToFirstPost),
    ("end", Handler::GoToLastPost),
    ("j", Handler::SelectDown),
    ("k", Handler::SelectUp),
    ("u", Handler::GoBack),
    ("`", Handler::NextSection),
    ("~", Handler::PrevSection),
    ("/", Handler::ShowSearch),
    ("?", Handler::ShowHelp),
    ("q", Handler::QuoteReply),
];

/// Outcome of matching pending key presses against the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupResult {
    /// Pending presses complete a chord.
    Match(Binding),
    /// Pending presses are a strict prefix of at least one chord.
    Prefix,
    /// Pending presses match nothing.
    NoMatch,
}

/// All chord bindings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Keymap {
    entries: Vec<(Chord, Binding)>,
}

impl Keymap {
    /// Parse every table entry, applying config overrides for handler
    /// chords. A malformed override is logged and falls back to the
    /// default; a malformed built-in spec is a startup error.
    pub fn resolve(overrides: &KeyBindings) -> ChordResult<Keymap> {
        let mut entries = vec![];

        for (spec, route) in PATH_BINDINGS {
            for chord in parse_alternates(spec)? {
                entries.push((chord, Binding::Route(*route)));
            }
        }

        for (spec, target) in CLICK_BINDINGS {
            for chord in parse_alternates(spec)? {
                entries.push((chord, Binding::Click(*target)));
            }
        }

        for (spec, handler) in FUNCTION_BINDINGS {
            let spec = match overrides.overrides.get(handler.name()) {
                Some(custom) => match parse_alternates(custom) {
                    Ok(chords) => {
                        for chord in chords {
                            entries.push((chord, Binding::Handler(*handler)));
                        }
                        continue;
                    }
                    Err(err) => {
                        crate::log::log(&format!(
                            "Ignoring bad keybinding override for {}: {}",
                            handler.name(),
                            err
                        ));
                        spec
                    }
                },
                None => spec,
            };
            for chord in parse_alternates(spec)? {
                entries.push((chord, Binding::Handler(*handler)));
            }
        }

        Ok(Keymap { entries })
    }

    /// Match pending presses against every chord. First exact match wins.
    pub fn lookup(&self, pending: &[KeyPress]) -> LookupResult {
        if pending.is_empty() {
            return LookupResult::NoMatch;
        }

        for (chord, binding) in &self.entries {
            if chord.matches(pending) {
                return LookupResult::Match(*binding);
            }
        }

        if self
            .entries
            .iter()
            .any(|(chord, _)| chord.steps().len() > pending.len() && chord.starts_with(pending))
        {
            return LookupResult::Prefix;
        }

        LookupResult::NoMatch
    }

    /// All resolved bindings, for the help popup.
    pub fn entries(&self) -> &[(Chord, Binding)] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn keymap() -> Keymap {
        Keymap::resolve(&KeyBindings::default()).unwrap()
    }

    fn press(c: char) -> KeyPress {
        KeyPress::plain(KeyCode::Char(c))
    }

    #[test]
    fn test_all_builtin_specs_parse() {
        // Any table typo should fail resolution outright
        let keymap = keymap();
        // 7 paths + 17 click specs (one with an alternate) + 10 handlers
        assert_eq!(keymap.entries().len(), 7 + 18 + 10);
    }

    #[test]
    fn test_single_key_match() {
        match keymap().lookup(&[press('j')]) {
            LookupResult::Match(Binding::Handler(Handler::SelectDown)) => {}
            other => panic!("unexpected lookup result: {:?}", other),
        }
    }

    #[test]
    fn test_sequence_prefix_then_match() {
        let keymap = keymap();
        assert_eq!(keymap.lookup(&[press('g')]), LookupResult::Prefix);
        assert_eq!(
            keymap.lookup(&[press('g'), press('l')]),
            LookupResult::Match(Binding::Route(Route::Latest))
        );
    }

    #[test]
    fn test_alternate_chords_share_binding() {
        let keymap = keymap();
        assert_eq!(
            keymap.lookup(&[press('o')]),
            LookupResult::Match(Binding::Click(ClickTarget::OpenTopic))
        );
        assert_eq!(
            keymap.lookup(&[KeyPress::plain(KeyCode::Enter)]),
            LookupResult::Match(Binding::Click(ClickTarget::OpenTopic))
        );
    }

    #[test]
    fn test_no_match() {
        let keymap = keymap();
        assert_eq!(keymap.lookup(&[press('z')]), LookupResult::NoMatch);
        assert_eq!(
            keymap.lookup(&[press('g'), press('z')]),
            LookupResult::NoMatch
        );
        assert_eq!(keymap.lookup(&[]), LookupResult::NoMatch);
    }

    #[test]
    fn test_override_replaces_default_chord() {
        let mut overrides = KeyBindings::default();
        overrides
            .overrides
            .insert("select_down".to_string(), "ctrl+n".to_string());
        let keymap = Keymap::resolve(&overrides).unwrap();

        assert_eq!(keymap.lookup(&[press('j')]), LookupResult::NoMatch);
        let ctrl_n = KeyPress::new(KeyCode::Char('n'), crossterm::event::KeyModifiers::CONTROL);
        assert_eq!(
            keymap.lookup(&[ctrl_n]),
            LookupResult::Match(Binding::Handler(Handler::SelectDown))
        );
    }

    #[test]
    fn test_bad_override_falls_back_to_default() {
        let mut overrides = KeyBindings::default();
        overrides
            .overrides
            .insert("select_down".to_string(), "hyper+j".to_string());
        let keymap = Keymap::resolve(&overrides).unwrap();

        assert_eq!(
            keymap.lookup(&[press('j')]),
            LookupResult::Match(Binding::Handler(Handler::SelectDown))
        );
    }
}
