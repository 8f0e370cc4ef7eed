use std::fmt::{Display, Formatter};
use std::ops::Range;

/// An option offered by a list prompt.
///
/// Options with children form a group; list prompts show them as a header
/// with the children indented beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub children: Vec<Choice>,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
            children: Vec::new(),
        }
    }

    /// A group header; its value is its label.
    pub fn group(label: impl Into<String>, children: Vec<Choice>) -> Self {
        let label = label.into();
        Self {
            value: label.clone(),
            label,
            disabled: false,
            children,
        }
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

impl Display for Choice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// A [`Choice`] laid out as one line of a list, groups expanded depth-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub value: String,
    pub label: String,
    pub depth: usize,
    /// Disabled itself or inside a disabled group.
    pub disabled: bool,
    pub group: bool,
    /// Rows nested below this one; empty for plain options.
    pub descendants: Range<usize>,
}

/// Lays choices out as rows in display order.
pub fn flatten(choices: &[Choice]) -> Vec<Row> {
    let mut rows = Vec::new();
    flatten_into(choices, 0, false, &mut rows);
    rows
}

fn flatten_into(choices: &[Choice], depth: usize, parent_disabled: bool, rows: &mut Vec<Row>) {
    for choice in choices {
        let index = rows.len();
        let disabled = parent_disabled || choice.disabled;

        rows.push(Row {
            value: choice.value.clone(),
            label: choice.label.clone(),
            depth,
            disabled,
            group: choice.is_group(),
            descendants: index + 1..index + 1,
        });

        if choice.is_group() {
            flatten_into(&choice.children, depth + 1, disabled, rows);
            rows[index].descendants = index + 1..rows.len();
        }
    }
}
