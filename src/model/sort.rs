//! Hand-sorting of tables by column
//!
//! Lexicographic comparison of the trimmed text content of each cell. No
//! numeric coercion and no locale rules; rows missing the cell sort as if
//! it were empty.

use super::table::{SortDirection, SortState, Table};

/// Sort `table` in place by `column` and record the active sort state.
///
/// Out-of-range columns leave the table untouched.
pub fn sort_table(table: &mut Table, column: usize, direction: SortDirection) {
    if column >= table.columns.len() {
        tracing::warn!(column, columns = table.columns.len(), "sort requested for missing column");
        return;
    }

    table.reorder_by(direction, |row| row.cell_text(column));
    table.set_sort_state(SortState { column, direction });

    tracing::debug!(table = %table.id, column, ?direction, "table sorted");
}

/// Header click: same ascending column flips, anything else sorts ascending
pub fn sort_by_header(table: &mut Table, column: usize) -> SortDirection {
    let direction = SortState::next_direction(table.sort_state(), column);
    sort_table(table, column, direction);
    direction
}
