//! Data grid adapter: paging, search, typed sorting and export filtering
//!
//! The grid owns the view over the table (which page, which search query)
//! and the initial sort. It shares the table's single sort state with the
//! hand-sorting engine, so both agree on which column is active.

use super::table::{Column, Row, SortDirection, SortState, Table, TableRow};
use std::cmp::Ordering;

/// Selectable page lengths
pub const PAGE_LENGTHS: [usize; 3] = [10, 100, 1000];

/// Page length applied once the grid is built
pub const DEFAULT_PAGE_LENGTH: usize = 100;

/// Comparison type of a grid column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Numeric,
}

/// Sort key for grid-managed columns
#[derive(Debug, Clone)]
enum GridKey {
    Number(f64),
    Text(String),
}

impl PartialEq for GridKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GridKey {}

impl PartialOrd for GridKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GridKey::Number(a), GridKey::Number(b)) => a.total_cmp(b),
            (GridKey::Number(_), GridKey::Text(_)) => Ordering::Less,
            (GridKey::Text(_), GridKey::Number(_)) => Ordering::Greater,
            (GridKey::Text(a), GridKey::Text(b)) => a.cmp(b),
        }
    }
}

/// Column flagged as the default sort target, falling back to the first
pub fn default_sort_column(columns: &[Column]) -> usize {
    match columns.iter().position(Column::is_default_sort) {
        Some(index) => index,
        None => {
            tracing::warn!("no default-sort header found, sorting by first column");
            0
        }
    }
}

/// Grid configuration resolved from the table markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridOptions {
    pub page_length: usize,
    pub order: SortState,
    /// Only an explicitly flagged header compares numerically
    pub numeric_column: Option<usize>,
}

impl GridOptions {
    pub fn resolve(table: &Table, page_length: usize) -> Self {
        let column = default_sort_column(&table.columns);
        let page_length = if PAGE_LENGTHS.contains(&page_length) {
            page_length
        } else {
            tracing::warn!(page_length, "unsupported page length, using default");
            DEFAULT_PAGE_LENGTH
        };

        Self {
            page_length,
            order: SortState {
                column,
                direction: SortDirection::Descending,
            },
            numeric_column: table.columns.iter().position(Column::is_default_sort),
        }
    }
}

/// Range of displayed records, 1-based like the grid's info line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub start: usize,
    pub end: usize,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
}

#[derive(Debug, Clone)]
pub struct Grid {
    options: GridOptions,
    page_length: usize,
    page: usize,
    query: String,
}

impl Grid {
    /// Build the grid and apply its initial ordering to the table
    pub fn init(table: &mut Table, page_length: usize) -> Self {
        let grid = Self::attach(table, page_length);
        let options = grid.options;

        if !table.columns.is_empty() {
            grid.sort(table, options.order.column, options.order.direction);
        }
        tracing::info!(
            table = %table.id,
            default_column = options.order.column,
            page_length = grid.page_length,
            "grid initialised"
        );
        grid
    }

    /// Paging and search only; the table keeps its current order.
    ///
    /// Used for hand-sorted tables, whose headers go to the sort engine.
    pub fn attach(table: &Table, page_length: usize) -> Self {
        let options = GridOptions::resolve(table, page_length);
        Self {
            options,
            page_length: options.page_length,
            page: 0,
            query: String::new(),
        }
    }

    pub fn column_type(&self, column: usize) -> ColumnType {
        if self.options.numeric_column == Some(column) {
            ColumnType::Numeric
        } else {
            ColumnType::Text
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────

    /// Column-typed sort; writes the shared sort state
    pub fn sort(&self, table: &mut Table, column: usize, direction: SortDirection) {
        if column >= table.columns.len() {
            tracing::warn!(column, "grid sort requested for missing column");
            return;
        }

        match self.column_type(column) {
            ColumnType::Numeric => table.reorder_by(direction, |row| {
                let text = row.cell_text(column);
                match text.parse::<f64>() {
                    Ok(n) if n.is_finite() => GridKey::Number(n),
                    _ => GridKey::Text(text),
                }
            }),
            ColumnType::Text => table.reorder_by(direction, |row| GridKey::Text(row.cell_text(column))),
        }
        table.set_sort_state(SortState { column, direction });
    }

    pub fn sort_by_header(&self, table: &mut Table, column: usize) -> SortDirection {
        let direction = SortState::next_direction(table.sort_state(), column);
        self.sort(table, column, direction);
        direction
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paging
    // ─────────────────────────────────────────────────────────────────────────

    pub fn page_length(&self) -> usize {
        self.page_length
    }

    #[cfg(test)]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the page length; only the enumerated lengths are accepted
    pub fn set_page_length(&mut self, length: usize) -> bool {
        if !PAGE_LENGTHS.contains(&length) {
            return false;
        }
        self.page_length = length;
        self.page = 0;
        true
    }

    pub fn cycle_page_length(&mut self) -> usize {
        let index = PAGE_LENGTHS
            .iter()
            .position(|&l| l == self.page_length)
            .unwrap_or(0);
        let next = PAGE_LENGTHS[(index + 1) % PAGE_LENGTHS.len()];
        self.set_page_length(next);
        next
    }

    pub fn page_count(&self, table: &Table) -> usize {
        let matching = self.matching_records(table).len();
        matching.div_ceil(self.page_length).max(1)
    }

    pub fn next_page(&mut self, table: &Table) {
        if self.page + 1 < self.page_count(table) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self, table: &Table) {
        self.page = self.page_count(table) - 1;
    }

    /// Keep the current page in range after rows disappear
    pub fn clamp_page(&mut self, table: &Table) {
        let last = self.page_count(table) - 1;
        if self.page > last {
            self.page = last;
        }
    }

    pub fn page_info(&self, table: &Table) -> PageInfo {
        let total = self.matching_records(table).len();
        let start = (self.page * self.page_length).min(total);
        let end = (start + self.page_length).min(total);
        PageInfo {
            start: if total == 0 { 0 } else { start + 1 },
            end,
            total,
            page: self.page + 1,
            pages: self.page_count(table),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.page = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.page = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.page = 0;
    }

    /// Case-insensitive substring match against every cell's text
    pub fn matches(&self, row: &Row) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        (0..row.cells.len()).any(|i| row.cell_text(i).to_lowercase().contains(&query))
    }

    pub fn matching_records<'a>(&self, table: &'a Table) -> Vec<&'a Row> {
        table.records().filter(|row| self.matches(row)).collect()
    }

    /// Rows displayed on the current page, with the open panel after its owner
    pub fn page_rows<'a>(&self, table: &'a Table) -> Vec<&'a TableRow> {
        let skip = self.page * self.page_length;
        let mut shown = 0;
        let mut seen = 0;
        let mut owner_shown = false;
        let mut rows = Vec::new();

        for row in table.rows() {
            match row {
                TableRow::Record(record) => {
                    owner_shown = false;
                    if !self.matches(record) {
                        continue;
                    }
                    seen += 1;
                    if seen <= skip || shown >= self.page_length {
                        continue;
                    }
                    shown += 1;
                    owner_shown = true;
                    rows.push(row);
                }
                TableRow::Panel(_) => {
                    if owner_shown {
                        rows.push(row);
                    }
                }
            }
        }
        rows
    }

    /// Records an export includes: matching domain rows, never panel rows
    pub fn export_rows<'a>(&self, table: &'a Table) -> Vec<&'a Row> {
        table
            .rows()
            .iter()
            .filter_map(TableRow::as_record)
            .filter(|row| self.matches(row))
            .collect()
    }
}
