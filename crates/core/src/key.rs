//! Structured key events produced by the [`decoder`](crate::decoder).

use std::fmt::{Display, Formatter};

/// The key a [`KeyEvent`] refers to, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key, including space. Letters keep their case.
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1`..`F12`.
    F(u8),
}

/// A single decoded key press.
///
/// `sequence` keeps the exact input that produced the event, which is useful
/// for logging and for telling apart keys that decode to the same code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub sequence: String,
}

impl KeyEvent {
    pub fn new(code: KeyCode, sequence: impl Into<String>) -> Self {
        Self {
            code,
            ctrl: false,
            meta: false,
            shift: false,
            sequence: sequence.into(),
        }
    }

    /// A plain key with no modifiers whose sequence is derived from the code.
    ///
    /// Handy for feeding prompts directly without going through the decoder.
    pub fn plain(code: KeyCode) -> Self {
        let sequence = match code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "\r".to_string(),
            KeyCode::Tab => "\t".to_string(),
            KeyCode::Backspace => "\x7f".to_string(),
            KeyCode::Escape => "\x1b".to_string(),
            _ => String::new(),
        };
        let mut event = Self::new(code, sequence);
        if let KeyCode::Char(c) = code {
            event.shift = c.is_uppercase();
        }
        event
    }

    /// Ctrl + the given lowercase letter, as sent by a terminal.
    pub fn ctrl(letter: char) -> Self {
        let sequence = if letter.is_ascii_lowercase() {
            char::from(letter as u8 - b'a' + 1).to_string()
        } else {
            String::new()
        };
        Self::new(KeyCode::Char(letter), sequence).with_ctrl()
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Lowercase key name, e.g. `up`, `a`, `space`, `f5`, `pagedown`.
    pub fn name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_lowercase().to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "backtab".to_string(),
            KeyCode::Backspace => "backspace".to_string(),
            KeyCode::Delete => "delete".to_string(),
            KeyCode::Insert => "insert".to_string(),
            KeyCode::Escape => "escape".to_string(),
            KeyCode::Up => "up".to_string(),
            KeyCode::Down => "down".to_string(),
            KeyCode::Left => "left".to_string(),
            KeyCode::Right => "right".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pageup".to_string(),
            KeyCode::PageDown => "pagedown".to_string(),
            KeyCode::F(n) => format!("f{n}"),
        }
    }

    /// The character this key would insert into a text buffer, if any.
    pub fn char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.ctrl && !self.meta && !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Ctrl+C.
    pub fn is_interrupt(&self) -> bool {
        self.ctrl && self.code == KeyCode::Char('c')
    }

    pub fn is_ctrl(&self, letter: char) -> bool {
        self.ctrl && !self.meta && self.code == KeyCode::Char(letter)
    }
}

impl Display for KeyEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.meta {
            f.write_str("meta+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lowercases_letters() {
        let key = KeyEvent::plain(KeyCode::Char('Q'));
        assert_eq!(key.name(), "q");
        assert!(key.shift);
        assert_eq!(key.char(), Some('Q'));
    }

    #[test]
    fn test_space_and_function_names() {
        assert_eq!(KeyEvent::plain(KeyCode::Char(' ')).name(), "space");
        assert_eq!(KeyEvent::plain(KeyCode::F(11)).name(), "f11");
        assert_eq!(KeyEvent::plain(KeyCode::PageDown).name(), "pagedown");
    }

    #[test]
    fn test_ctrl_has_no_char() {
        let key = KeyEvent::ctrl('a');
        assert_eq!(key.sequence, "\x01");
        assert_eq!(key.char(), None);
        assert!(key.is_ctrl('a'));
        assert!(!key.is_interrupt());
        assert!(KeyEvent::ctrl('c').is_interrupt());
    }

    #[test]
    fn test_display_lists_modifiers() {
        let key = KeyEvent::new(KeyCode::Up, "\x1b[1;7A").with_ctrl().with_meta();
        assert_eq!(key.to_string(), "ctrl+meta+up");
    }
}
