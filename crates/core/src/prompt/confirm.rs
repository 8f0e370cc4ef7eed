use crate::key::KeyEvent;
use crate::render::{display_width, Frame};
use crate::theme::Theme;

use super::state::LineEditor;
use super::Prompt;

/// A yes/no question answered by typing `y`, `yes`, `n` or `no`.
pub struct Confirm {
    message: String,
    default: bool,
    editor: LineEditor,
}

impl Confirm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            default: false,
            editor: LineEditor::new(),
        }
    }

    /// The answer used when submitted empty.
    #[must_use]
    pub fn default(mut self, value: bool) -> Self {
        self.default = value;
        self
    }
}

impl Prompt for Confirm {
    type Output = bool;

    fn message(&self) -> &str {
        &self.message
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        self.editor.handle_key(key);
    }

    fn submit(&mut self) -> Result<bool, String> {
        match self.editor.text().trim().to_lowercase().as_str() {
            "" => Ok(self.default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err("Invalid answer.".to_string()),
        }
    }

    fn render(&self, theme: &Theme, error: Option<&str>) -> Frame {
        let mut frame = Frame::new();

        let choices = if self.default { "(Y/n)" } else { "(y/N)" };
        let question = format!("{} {} ", theme.question(&self.message), theme.muted(choices));
        frame.push(format!("{question}{}", self.editor.text()));
        frame.place_cursor(display_width(&question) + self.editor.width_before_cursor());

        if let Some(message) = error {
            frame.push(theme.validation_error(message));
        }
        frame
    }

    fn render_answer(&self, answer: &bool) -> String {
        let answer = if *answer { "yes" } else { "no" };
        answer.to_string()
    }
}
