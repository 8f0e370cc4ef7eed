//! Glyphs and colors used when drawing prompts.

use crossterm::style::Stylize;

/// Visual settings for prompts.
///
/// With `colors` off every styling method returns its input untouched, which
/// keeps output free of escape codes (`NO_COLOR`, dumb terminals, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub colors: bool,
    pub prefix: &'static str,
    pub done: &'static str,
    pub failed: &'static str,
    pub pointer: &'static str,
    pub checked: &'static str,
    pub unchecked: &'static str,
    pub separator: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: true,
            prefix: "?",
            done: "✔",
            failed: "✖",
            pointer: "❯",
            checked: "◉",
            unchecked: "◯",
            separator: "›",
        }
    }
}

impl Theme {
    /// The default glyphs without any styling.
    pub fn plain() -> Self {
        Self {
            colors: false,
            ..Self::default()
        }
    }

    /// Picks the styled or plain theme, honouring the `NO_COLOR` convention.
    pub fn detect(colors_requested: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        if colors_requested && !no_color {
            Self::default()
        } else {
            Self::plain()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        self.styled(text, |t| t.cyan().to_string())
    }

    pub fn highlight(&self, text: &str) -> String {
        self.styled(text, |t| t.cyan().bold().to_string())
    }

    pub fn muted(&self, text: &str) -> String {
        self.styled(text, |t| t.dark_grey().to_string())
    }

    pub fn error(&self, text: &str) -> String {
        self.styled(text, |t| t.red().to_string())
    }

    pub fn success(&self, text: &str) -> String {
        self.styled(text, |t| t.green().to_string())
    }

    pub fn bold(&self, text: &str) -> String {
        self.styled(text, |t| t.bold().to_string())
    }

    pub fn underline(&self, text: &str) -> String {
        self.styled(text, |t| t.underlined().to_string())
    }

    /// `? message` for a prompt waiting for input.
    pub fn question(&self, message: &str) -> String {
        format!("{} {}", self.accent(self.prefix), self.bold(message))
    }

    /// `✔ message › answer` for a resolved prompt.
    pub fn answered(&self, message: &str, answer: &str) -> String {
        format!(
            "{} {} {} {}",
            self.success(self.done),
            self.bold(message),
            self.muted(self.separator),
            self.accent(answer)
        )
    }

    /// The footer line shown after a failed validation.
    pub fn validation_error(&self, message: &str) -> String {
        format!("{} {}", self.error(self.failed), self.error(message))
    }

    fn styled(&self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.colors && !text.is_empty() {
            style(text)
        } else {
            text.to_string()
        }
    }
}
