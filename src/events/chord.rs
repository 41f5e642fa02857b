//! Key chord model and spec-string parser.
//!
//! A chord is an ordered sequence of key presses: `"g h"` is `g` then
//! `h`, `"shift+r"` is a single modified press. Comma-separated specs
//! bind alternates to one action (`"o,enter"`). Specs are parsed once at
//! startup into `Chord` values; nothing is parsed per key press.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{ChordError, ChordResult};

/// One step of a chord: a key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyPress {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Canonical form of a terminal key event.
    ///
    /// Uppercase letters become lowercase + SHIFT so `'R'` and `shift+r`
    /// compare equal; the SHIFT flag on non-letter characters (`!`, `~`,
    /// `?`) is dropped because the character already encodes it.
    pub fn normalize(event: KeyEvent) -> Self {
        let mut mods = event.modifiers;
        let code = match event.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                mods |= KeyModifiers::SHIFT;
                KeyCode::Char(c.to_ascii_lowercase())
            }
            KeyCode::Char(c) => {
                if !c.is_ascii_alphabetic() {
                    mods -= KeyModifiers::SHIFT;
                }
                KeyCode::Char(c)
            }
            other => other,
        };
        Self::new(code, mods)
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Up => write!(f, "up"),
            KeyCode::Down => write!(f, "down"),
            KeyCode::Left => write!(f, "left"),
            KeyCode::Right => write!(f, "right"),
            KeyCode::PageUp => write!(f, "pageup"),
            KeyCode::PageDown => write!(f, "pagedown"),
            other => write!(f, "{:?}", other),
        }
    }
}

/// An ordered multi-key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord(Vec<KeyPress>);

impl Chord {
    pub fn new(steps: Vec<KeyPress>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[KeyPress] {
        &self.0
    }

    /// Parse a chord spec such as `"g h"`, `"shift+r"`, or `"home"`.
    pub fn parse(spec: &str) -> ChordResult<Chord> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ChordError::EmptyChord);
        }

        let steps = spec
            .split_whitespace()
            .map(|step| parse_step(step, spec))
            .collect::<ChordResult<Vec<KeyPress>>>()?;

        Ok(Chord(steps))
    }

    /// Does `pending` match the start of this chord?
    pub fn starts_with(&self, pending: &[KeyPress]) -> bool {
        pending.len() <= self.0.len() && self.0[..pending.len()] == *pending
    }

    /// Does `pending` match this chord exactly?
    pub fn matches(&self, pending: &[KeyPress]) -> bool {
        self.0 == pending
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, press) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", press)?;
        }
        Ok(())
    }
}

/// Parse comma-separated alternate chords bound to one action.
pub fn parse_alternates(spec: &str) -> ChordResult<Vec<Chord>> {
    spec.split(',').map(Chord::parse).collect()
}

fn parse_step(step: &str, spec: &str) -> ChordResult<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut parts = step.split('+').peekable();
    let mut key_token: Option<&str> = None;

    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            match part.to_lowercase().as_str() {
                "shift" => mods |= KeyModifiers::SHIFT,
                "ctrl" | "control" => mods |= KeyModifiers::CONTROL,
                "alt" | "meta" => mods |= KeyModifiers::ALT,
                other => return Err(ChordError::UnknownModifier(other.to_string())),
            }
        } else {
            key_token = Some(part);
        }
    }

    let token = match key_token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ChordError::EmptyStep(spec.to_string())),
    };

    let code = parse_key_token(token)?;

    // Same canonicalization as normalize(): an uppercase letter in a spec
    // means shift
    if let KeyCode::Char(c) = code {
        if c.is_ascii_uppercase() {
            mods |= KeyModifiers::SHIFT;
            return Ok(KeyPress::new(KeyCode::Char(c.to_ascii_lowercase()), mods));
        }
    }

    Ok(KeyPress::new(code, mods))
}

fn parse_key_token(token: &str) -> ChordResult<KeyCode> {
    if token.chars().count() == 1 {
        return Ok(KeyCode::Char(token.chars().next().unwrap()));
    }

    match token.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "tab" => Ok(KeyCode::Tab),
        "space" => Ok(KeyCode::Char(' ')),
        "backspace" => Ok(KeyCode::Backspace),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "pageup" => Ok(KeyCode::PageUp),
        "pagedown" => Ok(KeyCode::PageDown),
        other => Err(ChordError::UnknownKey(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_key() {
        let chord = Chord::parse("j").unwrap();
        assert_eq!(chord.steps(), &[KeyPress::plain(KeyCode::Char('j'))]);
    }

    #[test]
    fn test_parse_sequence() {
        let chord = Chord::parse("g h").unwrap();
        assert_eq!(
            chord.steps(),
            &[
                KeyPress::plain(KeyCode::Char('g')),
                KeyPress::plain(KeyCode::Char('h')),
            ]
        );
    }

    #[test]
    fn test_parse_modifier() {
        let chord = Chord::parse("shift+r").unwrap();
        assert_eq!(
            chord.steps(),
            &[KeyPress::new(KeyCode::Char('r'), KeyModifiers::SHIFT)]
        );
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(
            Chord::parse("home").unwrap().steps(),
            &[KeyPress::plain(KeyCode::Home)]
        );
        assert_eq!(
            Chord::parse("enter").unwrap().steps(),
            &[KeyPress::plain(KeyCode::Enter)]
        );
    }

    #[test]
    fn test_parse_punctuation() {
        for spec in ["`", "~", "!", "/", "?"] {
            let chord = Chord::parse(spec).unwrap();
            assert_eq!(chord.steps().len(), 1, "spec {:?}", spec);
        }
    }

    #[test]
    fn test_parse_alternates() {
        let chords = parse_alternates("o,enter").unwrap();
        assert_eq!(chords.len(), 2);
        assert_eq!(chords[0].steps(), &[KeyPress::plain(KeyCode::Char('o'))]);
        assert_eq!(chords[1].steps(), &[KeyPress::plain(KeyCode::Enter)]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Chord::parse(""), Err(ChordError::EmptyChord));
        assert_eq!(
            Chord::parse("shift+"),
            Err(ChordError::EmptyStep("shift+".to_string()))
        );
        assert_eq!(
            Chord::parse("hyper+x"),
            Err(ChordError::UnknownModifier("hyper".to_string()))
        );
        assert_eq!(
            Chord::parse("bogus"),
            Err(ChordError::UnknownKey("bogus".to_string()))
        );
    }

    #[test]
    fn test_uppercase_spec_means_shift() {
        assert_eq!(Chord::parse("R").unwrap(), Chord::parse("shift+r").unwrap());
    }

    #[test]
    fn test_normalize_uppercase_event() {
        let event = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        let press = KeyPress::normalize(event);
        assert_eq!(
            press,
            KeyPress::new(KeyCode::Char('r'), KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_normalize_strips_shift_from_punctuation() {
        // Terminals report '!' as shift+'!' on some platforms
        let event = KeyEvent::new(KeyCode::Char('!'), KeyModifiers::SHIFT);
        let press = KeyPress::normalize(event);
        assert_eq!(press, KeyPress::plain(KeyCode::Char('!')));
    }

    #[test]
    fn test_prefix_matching() {
        let chord = Chord::parse("m w").unwrap();
        let m = [KeyPress::plain(KeyCode::Char('m'))];
        let mw = [
            KeyPress::plain(KeyCode::Char('m')),
            KeyPress::plain(KeyCode::Char('w')),
        ];

        assert!(chord.starts_with(&m));
        assert!(!chord.matches(&m));
        assert!(chord.matches(&mw));
        assert!(!chord.starts_with(&[KeyPress::plain(KeyCode::Char('x'))]));
    }

    #[test]
    fn test_display_round_trip() {
        for spec in ["g h", "shift+r", "home", "ctrl+x", "o"] {
            let chord = Chord::parse(spec).unwrap();
            assert_eq!(Chord::parse(&chord.to_string()).unwrap(), chord);
        }
    }
}
