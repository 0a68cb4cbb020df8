//! Input handling - key events fed to the edit assistant

use crossterm::event::{KeyCode, KeyModifiers};

/// Key identity, reduced to what the editing core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    Enter,
    Tab,
    Backspace,
    /// Anything the core does not transform
    Other,
}

/// Modifier flags held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };

    /// Whether a command modifier (Ctrl or Alt) is held
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt
    }
}

/// A single key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press without modifiers
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Plain character key press
    pub fn char(ch: char) -> Self {
        Self::plain(Key::Char(ch))
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            _ => Key::Other,
        };
        let modifiers = Modifiers {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        };
        Self { key, modifiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_crossterm_char() {
        let event = crossterm::event::KeyEvent::new(KeyCode::Char('('), KeyModifiers::SHIFT);
        let key = KeyEvent::from(event);
        assert_eq!(key.key, Key::Char('('));
        assert!(key.modifiers.shift);
        assert!(!key.modifiers.is_command());
    }

    #[test]
    fn test_from_crossterm_special() {
        let enter = KeyEvent::from(crossterm::event::KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(enter, KeyEvent::plain(Key::Enter));

        let ctrl_s = KeyEvent::from(crossterm::event::KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        ));
        assert!(ctrl_s.modifiers.is_command());

        let f1 = KeyEvent::from(crossterm::event::KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE));
        assert_eq!(f1.key, Key::Other);
    }
}
