//! Domain error types for agora
//!
//! Provides structured error types for different domains:
//! - `ChordError` for key chord parsing
//! - `AgoraError` as the top-level error type
//!
//! Runtime shortcut handling never produces errors: boundary conditions
//! (empty list, no selection, unknown screen) degrade to silent no-ops.
//! These types cover startup concerns only: keymap resolution, config
//! parsing, and terminal setup.

use thiserror::Error;

/// Top-level error type for agora
#[derive(Debug, Error)]
pub enum AgoraError {
    #[error("Chord error: {0}")]
    Chord(#[from] ChordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while parsing a key chord spec such as `"g h"` or `"shift+r"`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordError {
    #[error("Empty chord spec")]
    EmptyChord,

    #[error("Empty step in chord spec '{0}'")]
    EmptyStep(String),

    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),
}

/// Result type alias for AgoraError
pub type Result<T> = std::result::Result<T, AgoraError>;

/// Result type alias for ChordError
pub type ChordResult<T> = std::result::Result<T, ChordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_error_wraps_into_top_level() {
        let err = AgoraError::from(ChordError::UnknownKey("bogus".to_string()));
        assert_eq!(err.to_string(), "Chord error: Unknown key 'bogus'");
    }
}
