//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub enum Align {
    Left,
    Right,
}

pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Left,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            align: Align::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    /// Cells wider than this are wrapped onto extra lines.
    pub max_width: usize,
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            max_width: 40,
            separator: '-',
        }
    }

    pub fn with_separator(mut self, sep: char) -> Self {
        self.separator = sep;
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|v| UnicodeWidthStr::width(v.as_str()).min(self.max_width))
                    .chain(std::iter::once(UnicodeWidthStr::width(c.header.as_str())))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        push_line(&mut out, &self.columns, &widths, &header);
        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3;
        out.push_str(&self.separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let wrapped: Vec<Vec<String>> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    if UnicodeWidthStr::width(cell) <= *w {
                        vec![cell.to_string()]
                    } else {
                        textwrap::wrap(cell, *w)
                            .into_iter()
                            .map(|c| c.into_owned())
                            .collect()
                    }
                })
                .collect();

            let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
            for line in 0..height {
                let cells: Vec<String> = wrapped
                    .iter()
                    .map(|w| w.get(line).cloned().unwrap_or_default())
                    .collect();
                push_line(&mut out, &self.columns, &widths, &cells);
            }
        }

        out
    }
}

fn push_line(out: &mut String, columns: &[Column], widths: &[usize], cells: &[String]) {
    let parts: Vec<String> = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((col, w), cell)| {
            let pad = w.saturating_sub(UnicodeWidthStr::width(cell.as_str()));
            match col.align {
                Align::Left => format!("{cell}{}", " ".repeat(pad)),
                Align::Right => format!("{}{cell}", " ".repeat(pad)),
            }
        })
        .collect();
    out.push_str(parts.join(" | ").trim_end());
    out.push('\n');
}
