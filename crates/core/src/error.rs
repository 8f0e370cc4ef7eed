use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal I/O error: {}", _0)]
    Io(#[from] std::io::Error),

    #[error("Unrecognized or broken escape sequence: {}", .0)]
    UnrecognizedSequence(String),

    #[error("Input is not valid UTF-8 (unexpected byte 0x{:02x})", .byte)]
    InvalidUtf8 { byte: u8 },

    #[error("Prompt was interrupted.")]
    Interrupted,

    #[error("Input ended before the prompt was answered.")]
    Cancelled,

    #[error("Error formatting terminal output: {}", .0)]
    Format(#[from] std::fmt::Error),
}

impl Error {
    /// Builds an [`Error::UnrecognizedSequence`] showing the raw bytes in escaped form.
    pub fn unrecognized(sequence: &[u8]) -> Self {
        Self::UnrecognizedSequence(sequence.escape_ascii().to_string())
    }

    /// Whether the user backed out (interrupt key or end of input) rather than something failing.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Interrupted | Self::Cancelled)
    }
}
