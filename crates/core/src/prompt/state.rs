//! State shared by the prompt kinds: prompt status, the line editor behind
//! text entry and the highlight/scroll cursor behind option lists.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

use crate::key::{KeyCode, KeyEvent};

/// Where a prompt is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AwaitingInput,
    Validating,
    Resolved,
    Cancelled,
}

/// What an editing key did to a [`LineEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The text changed.
    Changed,
    /// Only the cursor moved.
    Moved,
    /// The key is not an editing key, or had nothing to act on.
    Ignored,
}

/// A single-line text buffer with a cursor, counted in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    chars: Vec<char>,
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        let mut editor = Self::new();
        editor.set_text(text);
        editor
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn set_text(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor == self.chars.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.chars.len();
        self.cursor = self.chars.len();
        moved
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor == self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn delete_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.chars.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    pub fn delete_to_end(&mut self) -> bool {
        if self.cursor == self.chars.len() {
            return false;
        }
        self.chars.truncate(self.cursor);
        true
    }

    /// Display width of the text left of the cursor.
    pub fn width_before_cursor(&self) -> usize {
        self.chars[..self.cursor]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Applies the usual line-editing keys.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Edit {
        if let Some(c) = key.char() {
            self.insert(c);
            return Edit::Changed;
        }

        let changed = |did: bool| if did { Edit::Changed } else { Edit::Ignored };
        let moved = |did: bool| if did { Edit::Moved } else { Edit::Ignored };

        if key.ctrl {
            return match key.code {
                KeyCode::Char('a') => moved(self.move_home()),
                KeyCode::Char('e') => moved(self.move_end()),
                KeyCode::Char('u') => changed(self.delete_to_start()),
                KeyCode::Char('k') => changed(self.delete_to_end()),
                _ => Edit::Ignored,
            };
        }

        match key.code {
            KeyCode::Left => moved(self.move_left()),
            KeyCode::Right => moved(self.move_right()),
            KeyCode::Home => moved(self.move_home()),
            KeyCode::End => moved(self.move_end()),
            KeyCode::Backspace => changed(self.backspace()),
            KeyCode::Delete => changed(self.delete()),
            _ => Edit::Ignored,
        }
    }
}

/// Highlight and scroll position over a list of rows.
///
/// Methods take a `skip` mask, one entry per row, marking rows that cannot be
/// highlighted (disabled options, group headers). The highlight never rests
/// on a skipped row while a navigable one exists, and `offset` always keeps
/// the highlighted row inside the `max_rows` window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCursor {
    highlighted: Option<usize>,
    offset: usize,
    max_rows: usize,
}

impl ListCursor {
    pub fn new(max_rows: usize) -> Self {
        Self {
            highlighted: None,
            offset: 0,
            max_rows: max_rows.max(1),
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn set_max_rows(&mut self, max_rows: usize, len: usize) {
        self.max_rows = max_rows.max(1);
        self.scroll_into_view(len);
    }

    /// Highlights `preferred` if it is navigable, otherwise the first navigable row.
    pub fn reset(&mut self, skip: &[bool], preferred: Option<usize>) {
        self.highlighted = match preferred {
            Some(index) if index < skip.len() && !skip[index] => Some(index),
            _ => skip.iter().position(|&skipped| !skipped),
        };
        if self.highlighted.is_none() {
            self.offset = 0;
        }
        self.scroll_to(skip);
    }

    /// Moves to the next navigable row, wrapping past the end.
    pub fn next(&mut self, skip: &[bool]) {
        self.step(skip, true);
    }

    /// Moves to the previous navigable row, wrapping past the start.
    pub fn previous(&mut self, skip: &[bool]) {
        self.step(skip, false);
    }

    pub fn first(&mut self, skip: &[bool]) {
        self.highlighted = skip.iter().position(|&skipped| !skipped);
        self.scroll_to(skip);
    }

    pub fn last(&mut self, skip: &[bool]) {
        self.highlighted = skip.iter().rposition(|&skipped| !skipped);
        self.scroll_to(skip);
    }

    /// Moves one page down without wrapping.
    pub fn page_down(&mut self, skip: &[bool]) {
        let Some(current) = self.current(skip) else {
            return self.reset(skip, None);
        };
        let target = (current + self.max_rows).min(skip.len() - 1);

        let found = (target..skip.len())
            .find(|&i| !skip[i])
            .or_else(|| (current + 1..target).rev().find(|&i| !skip[i]));
        if let Some(index) = found {
            self.highlighted = Some(index);
        }
        self.scroll_to(skip);
    }

    /// Moves one page up without wrapping.
    pub fn page_up(&mut self, skip: &[bool]) {
        let Some(current) = self.current(skip) else {
            return self.reset(skip, None);
        };
        let target = current.saturating_sub(self.max_rows);

        let found = (0..=target)
            .rev()
            .find(|&i| !skip[i])
            .or_else(|| (target + 1..current).find(|&i| !skip[i]));
        if let Some(index) = found {
            self.highlighted = Some(index);
        }
        self.scroll_to(skip);
    }

    /// Indexes of the rows inside the visible window.
    pub fn visible(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.max_rows).min(len)
    }

    fn current(&self, skip: &[bool]) -> Option<usize> {
        self.highlighted.filter(|&index| index < skip.len())
    }

    fn step(&mut self, skip: &[bool], forward: bool) {
        let len = skip.len();
        let Some(current) = self.current(skip) else {
            return self.reset(skip, None);
        };

        for distance in 1..=len {
            let index = if forward {
                (current + distance) % len
            } else {
                (current + len - distance) % len
            };
            if !skip[index] {
                self.highlighted = Some(index);
                break;
            }
        }

        self.scroll_to(skip);
    }

    /// Scrolls the highlighted row into view. When it ends up at the top of
    /// the window, non-navigable rows directly above it (group headers) are
    /// shown too while they fit.
    fn scroll_to(&mut self, skip: &[bool]) {
        self.scroll_into_view(skip.len());

        let Some(index) = self.highlighted else {
            return;
        };
        if self.offset != index {
            return;
        }
        while self.offset > 0 && skip[self.offset - 1] && index + 1 - self.offset < self.max_rows {
            self.offset -= 1;
        }
    }

    fn scroll_into_view(&mut self, len: usize) {
        if let Some(index) = self.highlighted {
            if index < self.offset {
                self.offset = index;
            } else if index >= self.offset + self.max_rows {
                self.offset = index + 1 - self.max_rows;
            }
        }
        self.offset = self.offset.min(len.saturating_sub(self.max_rows));
    }
}
