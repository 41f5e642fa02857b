//! Event handling: chord parsing, binding tables, and keyboard dispatch.
//!
//! Key presses flow through `handler` into `keyboard`, which feeds the
//! chord tracker against the startup-resolved `Keymap` and emits
//! `Action`s for the app to apply.

mod action;
pub mod bindings;
pub mod chord;
mod handler;
pub mod keyboard;

pub use action::Action;
pub use bindings::{Binding, ClickTarget, Handler, Keymap};
pub use chord::{Chord, KeyPress};
pub use handler::EventHandler;
pub use keyboard::ChordTracker;
