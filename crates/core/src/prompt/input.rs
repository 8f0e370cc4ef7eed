use crate::key::{KeyCode, KeyEvent};
use crate::render::{display_width, Frame};
use crate::theme::Theme;

use super::state::{Edit, LineEditor, ListCursor};
use super::{footer, list_row, Prompt, Validator, DEFAULT_MAX_ROWS};

/// Free text entry.
///
/// An empty submission falls back to the default when one is set. With
/// suggestions, the ones starting with the typed text are listed below the
/// input and tab completes to the highlighted one.
pub struct Input {
    message: String,
    editor: LineEditor,
    default: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    validator: Option<Validator>,
    suggestions: Vec<String>,
    cursor: ListCursor,
}

impl Input {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            editor: LineEditor::new(),
            default: None,
            min_length: None,
            max_length: None,
            validator: None,
            suggestions: Vec::new(),
            cursor: ListCursor::new(DEFAULT_MAX_ROWS),
        }
    }

    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Starts with `text` already in the buffer.
    #[must_use]
    pub fn initial(mut self, text: &str) -> Self {
        self.editor.set_text(text);
        self.refresh_suggestions();
        self
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    #[must_use]
    pub fn suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self.refresh_suggestions();
        self
    }

    #[must_use]
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        let len = self.matches().len();
        self.cursor.set_max_rows(max_rows, len);
        self
    }

    /// The text typed so far.
    pub fn value(&self) -> String {
        self.editor.text()
    }

    /// Indexes of the suggestions starting with the typed text, ignoring case.
    pub fn matches(&self) -> Vec<usize> {
        let typed = self.editor.text().to_lowercase();
        self.suggestions
            .iter()
            .enumerate()
            .filter(|(_, suggestion)| suggestion.to_lowercase().starts_with(&typed))
            .map(|(index, _)| index)
            .collect()
    }

    fn refresh_suggestions(&mut self) {
        let skip = vec![false; self.matches().len()];
        self.cursor.reset(&skip, None);
    }

    fn complete(&mut self) {
        if self.suggestions.is_empty() {
            if self.editor.is_empty() {
                if let Some(default) = &self.default {
                    self.editor.set_text(default);
                }
            }
            return;
        }

        let matches = self.matches();
        let Some(&index) = self
            .cursor
            .highlighted()
            .and_then(|position| matches.get(position))
        else {
            return;
        };

        let completion = self.suggestions[index].clone();
        self.editor.set_text(&completion);
        self.refresh_suggestions();
    }

    fn hints(&self) -> &'static str {
        if !self.suggestions.is_empty() {
            "↑/↓ to move, tab to complete, enter to submit"
        } else if self.default.is_some() && self.editor.is_empty() {
            "tab to edit the default, enter to submit"
        } else {
            "enter to submit"
        }
    }
}

impl Prompt for Input {
    type Output = String;

    fn message(&self) -> &str {
        &self.message
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let suggesting = !self.suggestions.is_empty() && !key.ctrl && !key.meta;

        match key.code {
            KeyCode::Up if suggesting => {
                let skip = vec![false; self.matches().len()];
                self.cursor.previous(&skip);
            }
            KeyCode::Down if suggesting => {
                let skip = vec![false; self.matches().len()];
                self.cursor.next(&skip);
            }
            KeyCode::Tab => self.complete(),
            _ => {
                if self.editor.handle_key(key) == Edit::Changed {
                    self.refresh_suggestions();
                }
            }
        }
    }

    fn submit(&mut self) -> Result<String, String> {
        let mut value = self.editor.text();
        if value.is_empty() {
            if let Some(default) = &self.default {
                value = default.clone();
            }
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "Value must be longer than {min} but has a length of {len}."
                ));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!(
                    "Value can't be longer than {max} but has a length of {len}."
                ));
            }
        }
        if let Some(validator) = &self.validator {
            validator(&value)?;
        }

        Ok(value)
    }

    fn render(&self, theme: &Theme, error: Option<&str>) -> Frame {
        let mut frame = Frame::new();

        let question = format!("{} ", theme.question(&self.message));
        let echo = match &self.default {
            Some(default) if self.editor.is_empty() => theme.muted(&format!("({default})")),
            _ => theme.underline(&self.editor.text()),
        };
        frame.push(format!("{question}{echo}"));
        frame.place_cursor(display_width(&question) + self.editor.width_before_cursor());

        let matches = self.matches();
        for position in self.cursor.visible(matches.len()) {
            let highlighted = self.cursor.highlighted() == Some(position);
            let suggestion = &self.suggestions[matches[position]];
            frame.push(list_row(theme, suggestion, 0, highlighted, false, None));
        }

        frame.push(footer(theme, error, self.hints()));
        frame
    }

    fn render_answer(&self, answer: &String) -> String {
        answer.clone()
    }
}
