//! Plain-text table with an optional checkbox column

use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

type CellFn<'a, R> = Box<dyn Fn(&R) -> String + Send + Sync + 'a>;

/// One table column
pub struct Column<'a, R> {
    header: String,
    cell: CellFn<'a, R>,
}

impl<'a, R> Column<'a, R> {
    /// Column rendering each row through `cell`
    pub fn new<F>(header: impl Into<String>, cell: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'a,
    {
        Self {
            header: header.into(),
            cell: Box::new(cell),
        }
    }
}

impl<R> std::fmt::Debug for Column<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Column definitions for one screen
#[derive(Debug)]
pub struct Table<'a, R> {
    columns: Vec<Column<'a, R>>,
    checkbox: bool,
    numbered: bool,
}

impl<'a, R> Table<'a, R> {
    /// Table without checkbox or row numbers
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            checkbox: false,
            numbered: false,
        }
    }

    /// Add a column
    pub fn column<F>(mut self, header: impl Into<String>, cell: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'a,
    {
        self.columns.push(Column::new(header, cell));
        self
    }

    /// Show a selection checkbox in front of every row
    pub fn with_checkbox(mut self) -> Self {
        self.checkbox = true;
        self
    }

    /// Show a running row number
    pub fn numbered(mut self) -> Self {
        self.numbered = true;
        self
    }

    /// Column headers, including the leading checkbox and number columns
    pub fn headers(&self, all_selected: bool) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.columns.len() + 2);
        if self.checkbox {
            headers.push(checkbox(all_selected).to_string());
        }
        if self.numbered {
            headers.push("No.".to_string());
        }
        headers.extend(self.columns.iter().map(|c| c.header.clone()));
        headers
    }

    /// Cells of one row
    pub fn cells(&self, row: &R, number: usize, selected: bool) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.columns.len() + 2);
        if self.checkbox {
            cells.push(checkbox(selected).to_string());
        }
        if self.numbered {
            cells.push(number.to_string());
        }
        cells.extend(self.columns.iter().map(|c| (c.cell)(row)));
        cells
    }

    /// Render rows as aligned text
    ///
    /// `first_number` is the 1-based number of the first row, so numbering
    /// continues across pages.
    pub fn render<F>(&self, rows: &[&R], first_number: usize, is_selected: F) -> String
    where
        F: Fn(&R) -> bool,
    {
        let all_selected = !rows.is_empty() && rows.iter().all(|row| is_selected(row));
        let header = self.headers(all_selected);
        let body: Vec<Vec<String>> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| self.cells(row, first_number + i, is_selected(row)))
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| display_width(h)).collect();
        for line in &body {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(display_width(cell));
            }
        }

        let mut out = String::new();
        push_line(&mut out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for line in &body {
            push_line(&mut out, line, &widths);
        }
        out
    }
}

impl<R> Default for Table<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

const fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Terminal columns taken by `text`; Hangul and other wide characters count twice
fn display_width(text: &str) -> usize {
    text.width()
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(display_width(cell));
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Row {
        id: u32,
        name: &'static str,
    }

    fn table() -> Table<'static, Row> {
        Table::new()
            .with_checkbox()
            .numbered()
            .column("Id", |r: &Row| r.id.to_string())
            .column("Name", |r: &Row| r.name.to_string())
    }

    #[test]
    fn test_render_aligns_columns() {
        let rows = [Row { id: 7, name: "Kim" }, Row { id: 12, name: "Lee Jihoon" }];
        let refs: Vec<&Row> = rows.iter().collect();

        let text = table().render(&refs, 11, |r| r.id == 12);

        assert_eq!(
            text,
            "[ ] | No. | Id | Name\n\
             --- | --- | -- | ----------\n\
             [ ] | 11  | 7  | Kim\n\
             [x] | 12  | 12 | Lee Jihoon\n"
        );
    }

    #[test]
    fn test_render_pads_wide_characters_by_terminal_width() {
        let rows = [Row { id: 7, name: "김민수" }, Row { id: 12, name: "Lee" }];
        let refs: Vec<&Row> = rows.iter().collect();
        let plain: Table<'_, Row> = Table::new()
            .column("Name", |r: &Row| r.name.to_string())
            .column("Id", |r: &Row| r.id.to_string());

        let text = plain.render(&refs, 1, |_| false);

        assert_eq!(
            text,
            "Name   | Id\n\
             ------ | --\n\
             김민수 | 7\n\
             Lee    | 12\n"
        );
        assert_eq!(display_width("답변 완료"), 9);
    }

    #[test]
    fn test_header_checkbox_reflects_full_selection() {
        let rows = [Row { id: 1, name: "a" }];
        let refs: Vec<&Row> = rows.iter().collect();
        let text = table().render(&refs, 1, |_| true);
        assert!(text.starts_with("[x] | No."));
    }

    #[test]
    fn test_empty_table_has_headers_only() {
        let text = table().render(&[], 1, |_| false);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("[ ]"));
    }

    #[test]
    fn test_cells_without_optional_columns() {
        let plain: Table<'_, Row> = Table::new().column("Name", |r: &Row| r.name.to_string());
        assert_eq!(plain.cells(&Row { id: 1, name: "x" }, 1, true), vec!["x"]);
        assert_eq!(plain.headers(false), vec!["Name"]);
    }
}
