use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;

use crate::key::{KeyCode, KeyEvent};
use crate::render::{display_width, Frame};
use crate::theme::Theme;

use super::choice::{flatten, Row};
use super::state::{Edit, LineEditor, ListCursor};
use super::{footer, list_row, Choice, Prompt, DEFAULT_MAX_ROWS};

/// Pick one option from a list.
///
/// Group headers are shown but can't be highlighted. With search enabled,
/// typing filters the options with a fuzzy matcher and escape clears the
/// filter.
pub struct Select {
    message: String,
    rows: Vec<Row>,
    default: Option<String>,
    searchable: bool,
    search: LineEditor,
    /// Indexes into `rows` that pass the current filter, in list order.
    visible: Vec<usize>,
    cursor: ListCursor,
}

impl Select {
    pub fn new(message: impl Into<String>, choices: Vec<Choice>) -> Self {
        let rows = flatten(&choices);
        let visible = (0..rows.len()).collect();
        let mut select = Self {
            message: message.into(),
            rows,
            default: None,
            searchable: false,
            search: LineEditor::new(),
            visible,
            cursor: ListCursor::new(DEFAULT_MAX_ROWS),
        };
        select.reset_highlight();
        select
    }

    /// Highlights the option with this value when the prompt opens.
    #[must_use]
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self.reset_highlight();
        self
    }

    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    #[must_use]
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        self.cursor.set_max_rows(max_rows, self.visible.len());
        self
    }

    /// Value of the highlighted option.
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted_row().map(|row| row.value.as_str())
    }

    /// Labels of the rows passing the current filter.
    pub fn visible_labels(&self) -> Vec<&str> {
        self.visible
            .iter()
            .map(|&index| self.rows[index].label.as_str())
            .collect()
    }

    fn highlighted_row(&self) -> Option<&Row> {
        self.cursor
            .highlighted()
            .and_then(|position| self.visible.get(position))
            .map(|&index| &self.rows[index])
    }

    fn skip_mask(&self) -> Vec<bool> {
        self.visible
            .iter()
            .map(|&index| self.rows[index].disabled || self.rows[index].group)
            .collect()
    }

    fn reset_highlight(&mut self) {
        let preferred = self.default.as_ref().and_then(|value| {
            self.visible
                .iter()
                .position(|&index| !self.rows[index].group && &self.rows[index].value == value)
        });
        let skip = self.skip_mask();
        self.cursor.reset(&skip, preferred);
    }

    fn filter(&mut self) {
        let query = self.search.text();

        self.visible = if query.is_empty() {
            (0..self.rows.len()).collect()
        } else {
            let matcher = SkimMatcherV2::default();
            self.rows
                .iter()
                .enumerate()
                .filter(|(_, row)| !row.group)
                .filter_map(|(index, row)| matcher.fuzzy_match(&row.label, &query).map(|_| index))
                .collect()
        };

        debug!("Filter `{query}` matches {} rows", self.visible.len());
        self.reset_highlight();
    }
}

impl Prompt for Select {
    type Output = String;

    fn message(&self) -> &str {
        &self.message
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        let skip = self.skip_mask();

        match key.code {
            KeyCode::Up => self.cursor.previous(&skip),
            KeyCode::Down | KeyCode::Tab => self.cursor.next(&skip),
            KeyCode::BackTab => self.cursor.previous(&skip),
            KeyCode::PageUp => self.cursor.page_up(&skip),
            KeyCode::PageDown => self.cursor.page_down(&skip),
            KeyCode::Home if !self.searchable => self.cursor.first(&skip),
            KeyCode::End if !self.searchable => self.cursor.last(&skip),
            KeyCode::Escape if self.searchable => {
                if !self.search.is_empty() {
                    self.search.clear();
                    self.filter();
                }
            }
            _ if self.searchable => {
                if self.search.handle_key(key) == Edit::Changed {
                    self.filter();
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) -> Result<String, String> {
        self.highlighted_row()
            .map(|row| row.value.clone())
            .ok_or_else(|| "No matching option.".to_string())
    }

    fn render(&self, theme: &Theme, error: Option<&str>) -> Frame {
        let mut frame = Frame::new();

        let question = theme.question(&self.message);
        if self.searchable {
            let question = format!("{question} ");
            frame.push(format!("{question}{}", self.search.text()));
            frame.place_cursor(display_width(&question) + self.search.width_before_cursor());
        } else {
            frame.push(question);
        }

        let filtering = !self.search.is_empty();
        for position in self.cursor.visible(self.visible.len()) {
            let row = &self.rows[self.visible[position]];
            let depth = if filtering { 0 } else { row.depth };

            if row.group {
                frame.push(format!("  {}{}", "  ".repeat(depth), theme.bold(&row.label)));
            } else {
                let highlighted = self.cursor.highlighted() == Some(position);
                frame.push(list_row(theme, &row.label, depth, highlighted, row.disabled, None));
            }
        }
        if self.visible.is_empty() {
            frame.push(theme.muted("  No results"));
        }

        let hints = if self.searchable {
            "↑/↓ to move, type to search, enter to select"
        } else {
            "↑/↓ to move, enter to select"
        };
        frame.push(footer(theme, error, hints));
        frame
    }

    fn render_answer(&self, answer: &String) -> String {
        self.rows
            .iter()
            .find(|row| !row.group && &row.value == answer)
            .map_or_else(|| answer.clone(), |row| row.label.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frameworks() -> Vec<Choice> {
        vec![
            Choice::new("next", "Next.js"),
            Choice::new("tanstack-start", "TanStack Start"),
        ]
    }

    fn press(select: &mut Select, code: KeyCode) {
        select.handle_key(&KeyEvent::plain(code));
    }

    fn type_text(select: &mut Select, text: &str) {
        for c in text.chars() {
            press(select, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_first_option_highlighted() {
        let mut select = Select::new("Framework?", frameworks());
        assert_eq!(select.highlighted(), Some("next"));
        assert_eq!(select.submit(), Ok("next".to_string()));
    }

    #[test]
    fn test_default_is_highlighted() {
        let mut select = Select::new("Framework?", frameworks()).default("tanstack-start");
        assert_eq!(select.submit(), Ok("tanstack-start".to_string()));
        assert_eq!(select.render_answer(&"tanstack-start".to_string()), "TanStack Start");
    }

    #[test]
    fn test_unknown_default_falls_back_to_first() {
        let select = Select::new("Framework?", frameworks()).default("remix");
        assert_eq!(select.highlighted(), Some("next"));
    }

    #[test]
    fn test_navigation_wraps_and_skips_disabled() {
        let mut select = Select::new(
            "Auth?",
            vec![
                "none".into(),
                Choice::new("lucia", "Lucia").disabled(),
                "clerk".into(),
            ],
        );
        press(&mut select, KeyCode::Down);
        assert_eq!(select.highlighted(), Some("clerk"));
        press(&mut select, KeyCode::Down);
        assert_eq!(select.highlighted(), Some("none"));
        press(&mut select, KeyCode::Up);
        assert_eq!(select.highlighted(), Some("clerk"));
    }

    #[test]
    fn test_group_headers_are_skipped() {
        let mut select = Select::new(
            "Tool?",
            vec![
                Choice::group("TanStack", vec!["query".into(), "form".into()]),
                "shadcn".into(),
            ],
        );
        assert_eq!(select.highlighted(), Some("query"));
        press(&mut select, KeyCode::Up);
        assert_eq!(select.highlighted(), Some("shadcn"));
        press(&mut select, KeyCode::Down);
        assert_eq!(select.highlighted(), Some("query"));
    }

    #[test]
    fn test_typing_ignored_without_search() {
        let mut select = Select::new("Framework?", frameworks());
        type_text(&mut select, "tan");
        assert_eq!(select.visible_labels().len(), 2);
        press(&mut select, KeyCode::End);
        assert_eq!(select.highlighted(), Some("tanstack-start"));
        press(&mut select, KeyCode::Home);
        assert_eq!(select.highlighted(), Some("next"));
    }

    #[test]
    fn test_search_filters_and_escape_clears() {
        let mut select = Select::new("Framework?", frameworks()).searchable(true);

        type_text(&mut select, "tss");
        assert_eq!(select.visible_labels(), vec!["TanStack Start"]);
        assert_eq!(select.highlighted(), Some("tanstack-start"));

        press(&mut select, KeyCode::Escape);
        assert_eq!(select.visible_labels().len(), 2);
        assert_eq!(select.highlighted(), Some("next"));
    }

    #[test]
    fn test_search_without_match_cannot_submit() {
        let mut select = Select::new("Framework?", frameworks()).searchable(true);
        type_text(&mut select, "zzz");
        assert!(select.visible_labels().is_empty());
        assert_eq!(select.submit(), Err("No matching option.".to_string()));

        let frame = select.render(&Theme::plain(), None);
        assert_eq!(frame.plain_lines()[1], "  No results");
    }

    #[test]
    fn test_search_hides_group_headers() {
        let mut select = Select::new(
            "Tool?",
            vec![Choice::group("Email", vec!["React Email".into(), "Resend".into()])],
        )
        .searchable(true);
        type_text(&mut select, "res");
        assert_eq!(select.visible_labels(), vec!["Resend"]);
    }

    #[test]
    fn test_render_marks_highlight_and_disabled() {
        let select = Select::new(
            "Database?",
            vec![
                Choice::new("none", "None"),
                Choice::new("mongo", "Mongo").disabled(),
                Choice::group("SQL", vec![Choice::new("drizzle", "Drizzle")]),
            ],
        );
        let frame = select.render(&Theme::plain(), None);
        assert_eq!(
            frame.plain_lines(),
            vec![
                "? Database?",
                "❯ None",
                "  Mongo (disabled)",
                "  SQL",
                "    Drizzle",
                "↑/↓ to move, enter to select",
            ]
        );
        assert_eq!(frame.cursor, None);
    }

    #[test]
    fn test_render_scrolls_window() {
        let choices = (0..20).map(|i| Choice::new(i.to_string(), format!("Option {i}")));
        let mut select = Select::new("Pick", choices.collect()).max_rows(5);
        for _ in 0..7 {
            press(&mut select, KeyCode::Down);
        }
        let lines = select.render(&Theme::plain(), None).plain_lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "  Option 3");
        assert_eq!(lines[5], "❯ Option 7");
    }

    #[test]
    fn test_wrapping_to_top_shows_group_header() {
        let tanstack = Choice::group(
            "TanStack",
            vec!["query".into(), "form".into(), "table".into(), "router".into()],
        );
        let mut select = Select::new("Tool?", vec![tanstack, "shadcn".into()]).max_rows(3);

        for _ in 0..4 {
            press(&mut select, KeyCode::Down);
        }
        assert_eq!(select.highlighted(), Some("shadcn"));

        press(&mut select, KeyCode::Down);
        assert_eq!(select.highlighted(), Some("query"));

        let lines = select.render(&Theme::plain(), None).plain_lines();
        assert_eq!(lines[1], "  TanStack");
        assert_eq!(lines[2], "❯   query");
    }
}
