//! Width-aware console tables.
//!
//! Columns size themselves to their widest cell (unicode display width,
//! so wide glyphs in titles line up), numeric columns right-align, and
//! each column may carry a color role applied after padding.

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

/// Visual role of a column, mapped to a color when styling is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Primary label such as a channel name or title (cyan).
    Label,
    /// Numeric value, right-aligned (green).
    Value,
    /// Secondary context such as the channel of a ranked video (yellow).
    Context,
}

/// Header plus role for one table column.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub role: ColumnRole,
}

impl Column {
    pub fn new(header: &str, role: ColumnRole) -> Self {
        Self {
            header: header.to_string(),
            role,
        }
    }
}

/// A fixed-column text table with optional ANSI coloring.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    color: bool,
}

impl Table {
    pub fn new(columns: Vec<Column>, color: bool) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            color,
        }
    }

    /// Append a data row. Missing cells render empty; extra cells are
    /// dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row = cells;
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the header, a dash separator, and all data rows.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        // Header row.
        let header_cells: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, width)| pad(&col.header, *width, col.role))
            .collect();
        out.push_str(header_cells.join("  ").trim_end());
        out.push('\n');

        // Separator row.
        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&dashes.join("  "));
        out.push('\n');

        // Data rows. Pad first so ANSI codes never skew the width math.
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&self.columns)
                .zip(&widths)
                .map(|((cell, col), width)| {
                    let padded = pad(cell, *width, col.role);
                    if self.color {
                        paint(padded, col.role)
                    } else {
                        padded
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }

        out
    }

    fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let data_max = self
                    .rows
                    .iter()
                    .map(|row| row[i].width())
                    .max()
                    .unwrap_or(0);
                col.header.width().max(data_max)
            })
            .collect()
    }
}

/// Pad a cell to `width` display columns; values right-align.
fn pad(cell: &str, width: usize, role: ColumnRole) -> String {
    let fill = width.saturating_sub(cell.width());
    match role {
        ColumnRole::Value => format!("{}{}", " ".repeat(fill), cell),
        _ => format!("{}{}", cell, " ".repeat(fill)),
    }
}

/// Apply the role's color to an already-padded cell.
fn paint(cell: String, role: ColumnRole) -> String {
    match role {
        ColumnRole::Label => cell.cyan().to_string(),
        ColumnRole::Value => cell.green().to_string(),
        ColumnRole::Context => cell.yellow().to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
