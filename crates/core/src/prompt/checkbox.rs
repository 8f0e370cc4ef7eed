use std::collections::BTreeSet;

use itertools::Itertools;

use crate::key::{KeyCode, KeyEvent};
use crate::render::Frame;
use crate::theme::Theme;

use super::choice::{flatten, Row};
use super::state::ListCursor;
use super::{footer, list_row, Choice, Prompt, DEFAULT_MAX_ROWS};

/// Pick any number of options from a list.
///
/// Space toggles the highlighted option; on a group header it toggles every
/// enabled option inside the group. `a` toggles all enabled options at once.
/// The answer holds the checked option values in list order.
pub struct Checkbox {
    message: String,
    rows: Vec<Row>,
    /// Indexes of checked rows. Only options are ever checked, never groups.
    checked: BTreeSet<usize>,
    min_options: Option<usize>,
    max_options: Option<usize>,
    cursor: ListCursor,
}

impl Checkbox {
    pub fn new(message: impl Into<String>, choices: Vec<Choice>) -> Self {
        let rows = flatten(&choices);
        let mut cursor = ListCursor::new(DEFAULT_MAX_ROWS);
        cursor.reset(&skip_mask(&rows), None);

        Self {
            message: message.into(),
            rows,
            checked: BTreeSet::new(),
            min_options: None,
            max_options: None,
            cursor,
        }
    }

    /// Checks the options with these values; a group value checks its options.
    #[must_use]
    pub fn defaults<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            let Some(index) = self.rows.iter().position(|row| row.value == value.as_ref()) else {
                continue;
            };
            if self.rows[index].group {
                let leaves = self.enabled_leaves(self.rows[index].descendants.clone());
                self.checked.extend(leaves);
            } else {
                self.checked.insert(index);
            }
        }
        self
    }

    #[must_use]
    pub fn min_options(mut self, min: usize) -> Self {
        self.min_options = Some(min);
        self
    }

    #[must_use]
    pub fn max_options(mut self, max: usize) -> Self {
        self.max_options = Some(max);
        self
    }

    #[must_use]
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.cursor.set_max_rows(max_rows, self.rows.len());
        self
    }

    /// Value of the highlighted row.
    pub fn highlighted(&self) -> Option<&str> {
        self.cursor
            .highlighted()
            .map(|index| self.rows[index].value.as_str())
    }

    /// Values of the checked options in list order.
    pub fn checked_values(&self) -> Vec<String> {
        self.checked
            .iter()
            .map(|&index| self.rows[index].value.clone())
            .collect()
    }

    /// Toggles the highlighted row.
    pub fn toggle(&mut self) {
        let Some(index) = self.cursor.highlighted() else {
            return;
        };
        let row = &self.rows[index];
        if row.disabled {
            return;
        }

        if row.group {
            let leaves = self.enabled_leaves(row.descendants.clone());
            self.set_all(&leaves);
        } else if !self.checked.remove(&index) {
            self.checked.insert(index);
        }
    }

    /// Checks every enabled option, or unchecks them all if they already are.
    pub fn toggle_all(&mut self) {
        let leaves = self.enabled_leaves(0..self.rows.len());
        self.set_all(&leaves);
    }

    /// Checks all of `leaves` unless they are all checked, in which case unchecks them.
    fn set_all(&mut self, leaves: &[usize]) {
        if self.all_checked(leaves) {
            for index in leaves {
                self.checked.remove(index);
            }
        } else {
            self.checked.extend(leaves.iter().copied());
        }
    }

    fn all_checked(&self, leaves: &[usize]) -> bool {
        !leaves.is_empty() && leaves.iter().all(|index| self.checked.contains(index))
    }

    fn enabled_leaves(&self, range: std::ops::Range<usize>) -> Vec<usize> {
        range
            .filter(|&index| !self.rows[index].group && !self.rows[index].disabled)
            .collect()
    }

    fn is_checked(&self, index: usize) -> bool {
        let row = &self.rows[index];
        if row.group {
            self.all_checked(&self.enabled_leaves(row.descendants.clone()))
        } else {
            self.checked.contains(&index)
        }
    }
}

fn skip_mask(rows: &[Row]) -> Vec<bool> {
    rows.iter().map(|row| row.disabled).collect()
}

impl Prompt for Checkbox {
    type Output = Vec<String>;

    fn message(&self) -> &str {
        &self.message
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let skip = skip_mask(&self.rows);

        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.cursor.previous(&skip),
            KeyCode::Down | KeyCode::Tab => self.cursor.next(&skip),
            KeyCode::PageUp => self.cursor.page_up(&skip),
            KeyCode::PageDown => self.cursor.page_down(&skip),
            KeyCode::Home => self.cursor.first(&skip),
            KeyCode::End => self.cursor.last(&skip),
            _ => match key.char() {
                Some(' ') => self.toggle(),
                Some('a') => self.toggle_all(),
                _ => {}
            },
        }
    }

    fn submit(&mut self) -> Result<Vec<String>, String> {
        let count = self.checked.len();
        if let Some(min) = self.min_options {
            if count < min {
                return Err(format!("The minimum number of options is {min}."));
            }
        }
        if let Some(max) = self.max_options {
            if count > max {
                return Err(format!("The maximum number of options is {max}."));
            }
        }
        Ok(self.checked_values())
    }

    fn render(&self, theme: &Theme, error: Option<&str>) -> Frame {
        let mut frame = Frame::new();
        frame.push(theme.question(&self.message));

        for index in self.cursor.visible(self.rows.len()) {
            let row = &self.rows[index];
            let marker = if self.is_checked(index) {
                theme.success(theme.checked)
            } else {
                theme.muted(theme.unchecked)
            };
            let highlighted = self.cursor.highlighted() == Some(index);
            let label = if row.group {
                theme.bold(&row.label)
            } else {
                row.label.clone()
            };
            frame.push(list_row(theme, &label, row.depth, highlighted, row.disabled, Some(&marker)));
        }

        frame.push(footer(
            theme,
            error,
            "↑/↓ to move, space to toggle, a to toggle all, enter to submit",
        ));
        frame
    }

    fn render_answer(&self, answer: &Vec<String>) -> String {
        answer
            .iter()
            .map(|value| {
                self.rows
                    .iter()
                    .find(|row| !row.group && &row.value == value)
                    .map_or(value.as_str(), |row| row.label.as_str())
            })
            .join(", ")
    }
}
