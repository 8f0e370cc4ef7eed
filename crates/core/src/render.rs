//! In-place redrawing of prompt frames.
//!
//! The [`Renderer`] remembers how many terminal rows the previous frame took
//! (soft-wrapped rows included) and where it left the cursor, so each redraw
//! erases exactly that area instead of pushing old frames into scrollback.

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;

/// Where the text cursor should sit inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    /// Index of the line in [`Frame::lines`].
    pub line: usize,
    /// Display width of the text before the cursor on that line.
    pub column: usize,
}

/// One complete drawing of a prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    /// `None` hides the cursor, as list prompts do.
    pub cursor: Option<CursorPosition>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Places the cursor on the most recently pushed line.
    pub fn place_cursor(&mut self, column: usize) {
        self.cursor = Some(CursorPosition {
            line: self.lines.len().saturating_sub(1),
            column,
        });
    }

    /// The frame's text with all styling removed, one entry per line.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines.iter().map(strip_ansi_escapes::strip_str).collect()
    }
}

/// Width of `text` in terminal columns, ignoring escape sequences.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi_escapes::strip_str(text).as_str())
}

/// Number of terminal rows a line occupies once it wraps at `columns`.
pub fn rows_for_line(line: &str, columns: u16) -> usize {
    let columns = usize::from(columns.max(1));
    let width = display_width(line);
    if width == 0 {
        1
    } else {
        width.div_ceil(columns)
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    rows: usize,
    cursor_row: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows occupied by the frame currently on screen.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Output that replaces the previous frame with `frame`.
    ///
    /// # Errors
    ///
    /// Only fails if formatting the escape sequences fails.
    pub fn draw(&mut self, frame: &Frame, columns: u16) -> Result<String> {
        let mut out = String::new();
        self.erase_into(&mut out)?;

        out.push_str(&frame.lines.join("\r\n"));

        let row_counts: Vec<usize> = frame
            .lines
            .iter()
            .map(|line| rows_for_line(line, columns))
            .collect();
        let total_rows = row_counts.iter().sum::<usize>().max(1);
        let last_row = total_rows - 1;

        match frame.cursor {
            Some(position) => {
                let columns = usize::from(columns.max(1));
                let rows_before: usize = row_counts.iter().take(position.line).sum();
                let line_rows = row_counts.get(position.line).copied().unwrap_or(1);

                // Past the end of a line that exactly fills its last row, the
                // terminal keeps the cursor on that row.
                let (row_in_line, column) = if position.column / columns < line_rows {
                    (position.column / columns, position.column % columns)
                } else {
                    (line_rows - 1, columns - 1)
                };
                let target_row = (rows_before + row_in_line).min(last_row);

                let up = last_row - target_row;
                if up > 0 {
                    MoveUp(up as u16).write_ansi(&mut out)?;
                }
                MoveToColumn(column as u16).write_ansi(&mut out)?;
                Show.write_ansi(&mut out)?;
                self.cursor_row = target_row;
            }
            None => {
                Hide.write_ansi(&mut out)?;
                self.cursor_row = last_row;
            }
        }
        self.rows = total_rows;

        Ok(out)
    }

    /// Output that erases the current frame and leaves the cursor visible.
    ///
    /// # Errors
    ///
    /// Only fails if formatting the escape sequences fails.
    pub fn clear(&mut self) -> Result<String> {
        let mut out = String::new();
        self.erase_into(&mut out)?;
        Show.write_ansi(&mut out)?;
        Ok(out)
    }

    /// Output that replaces the current frame with final `lines` and moves
    /// below them, so the next prompt starts on a fresh row.
    ///
    /// # Errors
    ///
    /// Only fails if formatting the escape sequences fails.
    pub fn finish(&mut self, lines: &[String]) -> Result<String> {
        let mut out = String::new();
        self.erase_into(&mut out)?;
        for line in lines {
            out.push_str(line);
            out.push_str("\r\n");
        }
        Show.write_ansi(&mut out)?;
        Ok(out)
    }

    fn erase_into(&mut self, out: &mut String) -> Result<()> {
        if self.rows == 0 {
            return Ok(());
        }

        if self.cursor_row > 0 {
            MoveUp(self.cursor_row as u16).write_ansi(out)?;
        }
        MoveToColumn(0).write_ansi(out)?;
        Clear(ClearType::FromCursorDown).write_ansi(out)?;

        self.rows = 0;
        self.cursor_row = 0;
        Ok(())
    }
}
