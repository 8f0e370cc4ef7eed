//! The prompt state machine and the engine that drives it against a terminal.
//!
//! Every prompt kind implements [`Prompt`]. A [`Session`] wraps one prompt
//! instance with its lifecycle [`Status`] and last validation error, and turns
//! key events into transitions:
//!
//! - printable and editing keys go to the prompt and clear any shown error;
//! - enter validates: success resolves the prompt, failure keeps it open with
//!   the error displayed beneath it;
//! - ctrl+c interrupts.
//!
//! [`PromptEngine`] runs sessions one at a time: render, block for input,
//! decode, apply, re-render.

use log::{debug, info, warn};

use crate::decoder::decode_partial;
use crate::error::{Error, Result};
use crate::key::{KeyCode, KeyEvent};
use crate::render::{Frame, Renderer};
use crate::terminal::{RawModeGuard, Terminal};
use crate::theme::Theme;

pub mod checkbox;
pub mod choice;
pub mod confirm;
pub mod input;
pub mod select;
pub mod state;

pub use checkbox::Checkbox;
pub use choice::Choice;
pub use confirm::Confirm;
pub use input::Input;
pub use select::Select;
pub use state::Status;

/// Rows shown at once by list prompts unless configured otherwise.
pub const DEFAULT_MAX_ROWS: usize = 10;

/// Custom check run against a submitted text value.
pub type Validator = Box<dyn Fn(&str) -> std::result::Result<(), String>>;

/// One kind of interactive question.
pub trait Prompt {
    type Output;

    fn message(&self) -> &str;

    /// Applies any key other than submit or interrupt.
    fn handle_key(&mut self, key: &KeyEvent);

    /// Validates the current state, producing the answer or an error message.
    fn submit(&mut self) -> std::result::Result<Self::Output, String>;

    /// Draws the prompt while it waits for input.
    fn render(&self, theme: &Theme, error: Option<&str>) -> Frame;

    /// Plain-text form of an answer, shown once the prompt resolves.
    fn render_answer(&self, answer: &Self::Output) -> String;
}

/// Result of feeding one key to a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T> {
    Pending,
    Resolved(T),
    Interrupted,
}

/// A prompt instance together with its lifecycle state.
pub struct Session<P: Prompt> {
    prompt: P,
    status: Status,
    error: Option<String>,
}

impl<P: Prompt> Session<P> {
    pub fn new(prompt: P) -> Self {
        Self {
            prompt,
            status: Status::AwaitingInput,
            error: None,
        }
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The message from the last failed validation, until the next key clears it.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn apply(&mut self, key: &KeyEvent) -> Step<P::Output> {
        if matches!(self.status, Status::Resolved | Status::Cancelled) {
            return Step::Pending;
        }

        if key.is_interrupt() {
            self.cancel();
            return Step::Interrupted;
        }

        if key.code == KeyCode::Enter {
            self.status = Status::Validating;
            return match self.prompt.submit() {
                Ok(answer) => {
                    self.status = Status::Resolved;
                    self.error = None;
                    Step::Resolved(answer)
                }
                Err(message) => {
                    debug!("Validation failed: {message}");
                    self.status = Status::AwaitingInput;
                    self.error = Some(message);
                    Step::Pending
                }
            };
        }

        self.error = None;
        self.prompt.handle_key(key);
        Step::Pending
    }

    pub fn cancel(&mut self) {
        self.status = Status::Cancelled;
    }

    pub fn frame(&self, theme: &Theme) -> Frame {
        self.prompt.render(theme, self.error())
    }
}

/// Runs prompts against a [`Terminal`].
///
/// # Examples
///
/// ```
/// use ekko_core::prompt::{Input, PromptEngine};
/// use ekko_core::terminal::ScriptedTerminal;
/// use ekko_core::theme::Theme;
///
/// let terminal = ScriptedTerminal::new(80).with_input("my-app\r");
/// let mut engine = PromptEngine::new(terminal, Theme::plain());
///
/// let name = engine.prompt(Input::new("What is your project called?"))?;
/// assert_eq!(name, "my-app");
/// # Ok::<(), ekko_core::error::Error>(())
/// ```
pub struct PromptEngine<T: Terminal> {
    terminal: T,
    theme: Theme,
}

impl<T: Terminal> PromptEngine<T> {
    pub fn new(terminal: T, theme: Theme) -> Self {
        Self { terminal, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Asks one question and blocks until it is answered.
    ///
    /// # Errors
    ///
    /// - [`Error::Interrupted`] when the user presses ctrl+c
    /// - [`Error::Cancelled`] when input ends first
    /// - decode errors for input that cannot be understood
    /// - I/O errors from the terminal
    pub fn prompt<P: Prompt>(&mut self, prompt: P) -> Result<P::Output> {
        let theme = &self.theme;
        let mut terminal = RawModeGuard::enable(&mut self.terminal)?;
        let mut renderer = Renderer::new();
        let mut session = Session::new(prompt);

        debug!("Prompting: {}", session.prompt().message());

        // Bytes of a character whose remainder is still to come.
        let mut held = Vec::new();

        loop {
            let output = renderer.draw(&session.frame(theme), terminal.columns())?;
            terminal.write_str(&output)?;
            terminal.flush()?;

            let Some(chunk) = terminal.read_chunk()? else {
                terminal.write_str(&abandon(&mut renderer)?)?;
                if let Some(&byte) = held.first() {
                    warn!("Input ended inside a character ({} bytes held)", held.len());
                    return Err(Error::InvalidUtf8 { byte });
                }
                debug!("Input ended while prompting");
                session.cancel();
                return Err(Error::Cancelled);
            };

            held.extend_from_slice(&chunk);
            let keys = match decode_partial(&held) {
                Ok((keys, incomplete)) => {
                    held.drain(..held.len() - incomplete);
                    keys
                }
                Err(e) => {
                    warn!("Could not decode terminal input: {e}");
                    terminal.write_str(&abandon(&mut renderer)?)?;
                    return Err(e);
                }
            };

            for key in keys {
                debug!("Key {key} ({:?})", key.sequence);

                match session.apply(&key) {
                    Step::Pending => {}
                    Step::Resolved(answer) => {
                        let prompt = session.prompt();
                        let summary = prompt.render_answer(&answer);
                        info!("Answered `{}` with `{summary}`", prompt.message());

                        let line = theme.answered(prompt.message(), &summary);
                        terminal.write_str(&renderer.finish(&[line])?)?;
                        return Ok(answer);
                    }
                    Step::Interrupted => {
                        debug!("Prompt interrupted");
                        terminal.write_str(&abandon(&mut renderer)?)?;
                        return Err(Error::Interrupted);
                    }
                }
            }
        }
    }
}

/// Erases the frame of a prompt that ended without an answer.
fn abandon(renderer: &mut Renderer) -> Result<String> {
    let mut out = renderer.clear()?;
    out.push_str("\r\n");
    Ok(out)
}

/// The footer line: the validation error if there is one, otherwise key hints.
pub(crate) fn footer(theme: &Theme, error: Option<&str>, hints: &str) -> String {
    match error {
        Some(message) => theme.validation_error(message),
        None => theme.muted(hints),
    }
}

/// One line of a list prompt: pointer, indentation by depth, optional marker, label.
pub(crate) fn list_row(
    theme: &Theme,
    label: &str,
    depth: usize,
    highlighted: bool,
    disabled: bool,
    marker: Option<&str>,
) -> String {
    let pointer = if highlighted {
        theme.accent(theme.pointer)
    } else {
        " ".to_string()
    };
    let indent = "  ".repeat(depth);
    let marker = marker.map(|m| format!("{m} ")).unwrap_or_default();

    let label = if disabled {
        theme.muted(&format!("{label} (disabled)"))
    } else if highlighted {
        theme.highlight(label)
    } else {
        label.to_string()
    };

    format!("{pointer} {indent}{marker}{label}")
}
