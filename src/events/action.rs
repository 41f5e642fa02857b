//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents that can be logged, deferred, or
//! customized via keybinding overrides.

use crate::content::Route;

use super::bindings::{Binding, ClickTarget, Handler};

/// Actions dispatched from event handlers and processed by the App.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // === Navigation ===
    /// Navigate to a section
    RouteTo(Route),
    /// Pop the route history
    GoBack,
    /// Move the active section bar entry forward
    NextSection,
    /// Move the active section bar entry backward
    PrevSection,

    // === Selection ===
    /// Select next item in the current list
    SelectDown,
    /// Select previous item in the current list
    SelectUp,
    /// Jump the post stream to its first post
    GoToFirstPost,
    /// Jump the post stream to its last post
    GoToLastPost,
    /// Deferred visual mark of the item at an index
    MarkSelected(usize),

    // === Element activation ===
    /// Activate an on-screen element, as if clicked
    Activate(ClickTarget),
    /// Open a reply composer quoting the selected post
    QuoteReply,
    /// Deferred quote insertion into the open composer
    InsertQuote,

    // === Search ===
    /// Enter search mode
    ShowSearch,
    /// Append a character to the search query
    SearchInputChar(char),
    /// Delete the last character of the search query
    SearchBackspace,
    /// Apply the search query and return to normal mode
    SubmitSearch,
    /// Discard the search query and return to normal mode
    CancelSearch,

    // === Help ===
    /// Open the help popup
    ShowHelp,
    /// Close the help popup
    CloseHelp,

    // === Composer ===
    /// Discard the open composer
    CloseComposer,

    // === Application ===
    /// Quit the application
    Quit,
    /// No action to take
    None,
}

impl From<Binding> for Action {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Route(route) => Action::RouteTo(route),
            Binding::Click(target) => Action::Activate(target),
            Binding::Handler(Handler::GoToFirstPost) => Action::GoToFirstPost,
            Binding::Handler(Handler::GoToLastPost) => Action::GoToLastPost,
            Binding::Handler(Handler::SelectDown) => Action::SelectDown,
            Binding::Handler(Handler::SelectUp) => Action::SelectUp,
            Binding::Handler(Handler::GoBack) => Action::GoBack,
            Binding::Handler(Handler::NextSection) => Action::NextSection,
            Binding::Handler(Handler::PrevSection) => Action::PrevSection,
            Binding::Handler(Handler::ShowSearch) => Action::ShowSearch,
            Binding::Handler(Handler::ShowHelp) => Action::ShowHelp,
            Binding::Handler(Handler::QuoteReply) => Action::QuoteReply,
        }
    }
}
