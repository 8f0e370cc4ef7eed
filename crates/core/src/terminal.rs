//! Terminal I/O used by the prompt engine.
//!
//! Everything the engine needs from the outside world goes through the
//! [`Terminal`] trait, which is picked once at startup: [`StdTerminal`] for a
//! real terminal and [`ScriptedTerminal`] for canned input (tests, piping).

use std::collections::VecDeque;
use std::io::{stdin, stdout, IsTerminal, Read, Stdin, Stdout, Write};
use std::ops::{Deref, DerefMut};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{debug, warn};

use crate::error::Result;

/// Columns assumed when the terminal size cannot be queried.
pub const DEFAULT_COLUMNS: u16 = 80;

const READ_BUFFER_SIZE: usize = 1024;

/// Byte-level access to a terminal.
pub trait Terminal {
    /// Blocks until the next chunk of input is available.
    ///
    /// Returns `Ok(None)` once input has ended.
    fn read_chunk(&mut self) -> Result<Option<Vec<u8>>>;

    fn write_str(&mut self, text: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Switches raw (unbuffered, unechoed) input on or off.
    fn set_raw_mode(&mut self, enabled: bool) -> Result<()>;

    /// Current width in columns.
    fn columns(&self) -> u16;

    /// Whether input comes from a user at a terminal.
    fn is_interactive(&self) -> bool;
}

/// Keeps a terminal in raw mode for as long as the guard lives.
///
/// Raw mode is switched off again on drop, so every exit path (including `?`
/// and panics) hands the terminal back in a usable state.
pub struct RawModeGuard<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> RawModeGuard<'a, T> {
    /// Enables raw mode on `terminal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses to switch modes.
    pub fn enable(terminal: &'a mut T) -> Result<Self> {
        terminal.set_raw_mode(true)?;
        Ok(Self { terminal })
    }
}

impl<T: Terminal + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = self.terminal.set_raw_mode(false);
        let _ = self.terminal.flush();
    }
}

/// The process's own stdin/stdout.
pub struct StdTerminal {
    stdin: Stdin,
    stdout: Stdout,
    interactive: bool,
    raw: bool,
}

impl StdTerminal {
    pub fn new() -> Self {
        let stdin = stdin();
        let interactive = stdin.is_terminal();
        debug!("Standard input is interactive: {interactive}");

        Self {
            stdin,
            stdout: stdout(),
            interactive,
            raw: false,
        }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdTerminal {
    fn read_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let read = self.stdin.lock().read(&mut buffer)?;

        if read == 0 {
            return Ok(None);
        }

        Ok(Some(buffer[..read].to_vec()))
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.stdout.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn set_raw_mode(&mut self, enabled: bool) -> Result<()> {
        // Raw mode only exists for real terminals; piped input is read as-is
        if !self.interactive || self.raw == enabled {
            return Ok(());
        }

        if enabled {
            enable_raw_mode()?;
        } else {
            disable_raw_mode()?;
        }
        self.raw = enabled;

        Ok(())
    }

    fn columns(&self) -> u16 {
        match crossterm::terminal::size() {
            Ok((0, _)) => DEFAULT_COLUMNS,
            Ok((width, _)) => width,
            Err(e) => {
                warn!("Unable to query terminal size, assuming {DEFAULT_COLUMNS} columns: {e}");
                DEFAULT_COLUMNS
            }
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Drop for StdTerminal {
    fn drop(&mut self) {
        if self.raw {
            let _ = disable_raw_mode();
        }
    }
}

/// A terminal fed from pre-recorded input chunks, capturing everything written.
///
/// Each chunk is handed out by one [`Terminal::read_chunk`] call, exactly as a
/// raw-mode read would deliver it. Once the chunks run out, input has ended.
///
/// # Examples
///
/// ```
/// use ekko_core::terminal::{ScriptedTerminal, Terminal};
///
/// let mut terminal = ScriptedTerminal::new(80).with_input("my-app\r");
/// assert_eq!(terminal.read_chunk()?, Some(b"my-app\r".to_vec()));
/// assert_eq!(terminal.read_chunk()?, None);
/// # Ok::<(), ekko_core::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    chunks: VecDeque<Vec<u8>>,
    output: String,
    columns: u16,
    interactive: bool,
    raw: bool,
    raw_mode_changes: usize,
}

impl ScriptedTerminal {
    pub fn new(columns: u16) -> Self {
        Self {
            chunks: VecDeque::new(),
            output: String::new(),
            columns,
            interactive: true,
            raw: false,
            raw_mode_changes: 0,
        }
    }

    /// Reports itself as not attached to a terminal, like piped input.
    #[must_use]
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Queues one chunk of input.
    #[must_use]
    pub fn with_input(mut self, chunk: impl AsRef<[u8]>) -> Self {
        self.push_input(chunk);
        self
    }

    /// Queues each item as its own chunk, like keys typed one at a time.
    #[must_use]
    pub fn with_keystrokes<I, S>(mut self, keystrokes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        for keystroke in keystrokes {
            self.push_input(keystroke);
        }
        self
    }

    pub fn push_input(&mut self, chunk: impl AsRef<[u8]>) {
        self.chunks.push_back(chunk.as_ref().to_vec());
    }

    /// Everything written so far, escape codes included.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn remaining_chunks(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// How many times raw mode was switched on or off.
    pub fn raw_mode_changes(&self) -> usize {
        self.raw_mode_changes
    }
}

impl Terminal for ScriptedTerminal {
    fn read_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.chunks.pop_front())
    }

    fn write_str(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_raw_mode(&mut self, enabled: bool) -> Result<()> {
        if self.raw != enabled {
            self.raw = enabled;
            self.raw_mode_changes += 1;
        }
        Ok(())
    }

    fn columns(&self) -> u16 {
        if self.columns == 0 {
            DEFAULT_COLUMNS
        } else {
            self.columns
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
