//! Table model: domain rows, the synthetic action panel row, and sort state
//!
//! The table owns a single ordered sequence of [`TableRow`]s. Domain records
//! and the (at most one) action panel share that sequence, and the panel is
//! always kept directly after the record that owns it.

use super::action_panel::PanelMarkup;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Matches inline markup inside a server-rendered cell
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Header class marking the default sort column
pub const DEFAULT_SORT_CLASS: &str = "default-sort";

/// Table class marking a hand-sorted table
pub const SORTABLE_CLASS: &str = "tableSortable";

/// Text content of a cell: markup stripped, common entities decoded, trimmed
pub fn text_content(raw: &str) -> String {
    let stripped = TAG_REGEX.replace_all(raw, "");
    stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════════════

/// Stable handle for a rendered row (its position in the server markup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub usize);

/// Opaque server primary key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    /// Parse a raw key attribute; blank values mean "no key"
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(RecordKey(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key as it appears in URLs and element ids; absent keys render empty
pub fn key_str(key: Option<&RecordKey>) -> &str {
    key.map(RecordKey::as_str).unwrap_or("")
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rows & Columns
// ═══════════════════════════════════════════════════════════════════════════════

/// One domain record
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub key: Option<RecordKey>,
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(id: RowId, key: Option<RecordKey>, cells: Vec<String>) -> Self {
        Self { id, key, cells }
    }

    /// Sort key for a column; a missing cell compares as the empty string
    pub fn cell_text(&self, column: usize) -> String {
        self.cells
            .get(column)
            .map(|cell| text_content(cell))
            .unwrap_or_default()
    }

    /// Element id the delete request targets
    pub fn dom_id(&self) -> String {
        format!("row-{}", key_str(self.key.as_ref()))
    }
}

/// Synthetic row holding the edit/delete controls for one record
#[derive(Debug, Clone, PartialEq)]
pub struct ActionPanel {
    pub owner: RowId,
    pub markup: PanelMarkup,
}

/// Row classifier: a domain record or the synthetic panel row
#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    Record(Row),
    Panel(ActionPanel),
}

impl TableRow {
    pub fn as_record(&self) -> Option<&Row> {
        match self {
            TableRow::Record(row) => Some(row),
            TableRow::Panel(_) => None,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, TableRow::Panel(_))
    }

    /// What a click on this row lands on
    pub fn target(&self) -> ClickTarget {
        match self {
            TableRow::Record(row) => ClickTarget::Record(row.id),
            TableRow::Panel(panel) => ClickTarget::Panel(panel.owner),
        }
    }
}

/// What a click on a table row landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Record(RowId),
    Panel(RowId),
}

/// Column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub classes: Vec<String>,
}

impl Column {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            classes: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn is_default_sort(&self) -> bool {
        self.classes.iter().any(|c| c == DEFAULT_SORT_CLASS)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sort State
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The single active sort column and its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortState {
    /// Direction a header click on `column` should sort in.
    ///
    /// Only an ascending sort on the same column flips to descending; any
    /// other column (or a descending one) sorts ascending.
    pub fn next_direction(current: Option<SortState>, column: usize) -> SortDirection {
        match current {
            Some(state) if state.column == column && state.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        }
    }
}

/// Which implementation handles header clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDriver {
    /// Hand-sorted: lexicographic sort engine
    Manual,
    /// Grid-managed: column-typed sort owned by the grid adapter
    Grid,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct Table {
    pub id: String,
    pub columns: Vec<Column>,
    pub driver: SortDriver,
    rows: Vec<TableRow>,
    sort: Option<SortState>,
}

impl Table {
    pub fn new(id: impl Into<String>, columns: Vec<Column>, records: Vec<Row>, driver: SortDriver) -> Self {
        Self {
            id: id.into(),
            columns,
            driver,
            rows: records.into_iter().map(TableRow::Record).collect(),
            sort: None,
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter_map(TableRow::as_record)
    }

    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    pub fn record(&self, id: RowId) -> Option<&Row> {
        self.records().find(|row| row.id == id)
    }

    fn record_position(&self, id: RowId) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| matches!(row, TableRow::Record(r) if r.id == id))
    }

    pub fn panel(&self) -> Option<&ActionPanel> {
        self.rows.iter().find_map(|row| match row {
            TableRow::Panel(panel) => Some(panel),
            TableRow::Record(_) => None,
        })
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub(crate) fn set_sort_state(&mut self, state: SortState) {
        self.sort = Some(state);
    }

    /// Insert `panel` right after its owner, removing any existing panel first.
    ///
    /// Returns false (and inserts nothing) when the owner is not in the table.
    pub fn insert_panel(&mut self, panel: ActionPanel) -> bool {
        self.remove_panel();
        match self.record_position(panel.owner) {
            Some(position) => {
                self.rows.insert(position + 1, TableRow::Panel(panel));
                true
            }
            None => false,
        }
    }

    pub fn remove_panel(&mut self) -> Option<ActionPanel> {
        let position = self.rows.iter().position(TableRow::is_panel)?;
        match self.rows.remove(position) {
            TableRow::Panel(panel) => Some(panel),
            TableRow::Record(_) => None,
        }
    }

    /// Remove a record, and its panel if it owns the open one
    pub fn remove_record(&mut self, id: RowId) -> Option<Row> {
        if self.panel().is_some_and(|panel| panel.owner == id) {
            self.remove_panel();
        }
        let position = self.record_position(id)?;
        match self.rows.remove(position) {
            TableRow::Record(row) => Some(row),
            TableRow::Panel(_) => None,
        }
    }

    /// Reorder the records by a per-row key, keeping the panel after its owner.
    ///
    /// Keys are computed once per row. Rows with equal keys keep no
    /// guaranteed relative order.
    pub(crate) fn reorder_by<K, F>(&mut self, direction: SortDirection, mut key: F)
    where
        K: Ord,
        F: FnMut(&Row) -> K,
    {
        let panel = self.remove_panel();

        let mut keyed: Vec<(K, Row)> = self
            .rows
            .drain(..)
            .filter_map(|row| match row {
                TableRow::Record(r) => Some((key(&r), r)),
                TableRow::Panel(_) => None,
            })
            .collect();
        keyed.sort_by(|a, b| direction.apply(a.0.cmp(&b.0)));
        self.rows = keyed
            .into_iter()
            .map(|(_, row)| TableRow::Record(row))
            .collect();

        if let Some(panel) = panel {
            self.insert_panel(panel);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::action_panel::render_panel;
    use crate::model::context::PageContext;
    use crate::model::viewport::ViewportClass;

    /// Helper to build a table from (pk, cells) pairs
    pub(crate) fn create_test_table(rows: &[(&str, &[&str])]) -> Table {
        let columns = vec![
            Column::new("Name"),
            Column::new("Hours").with_class(DEFAULT_SORT_CLASS),
            Column::new("Task"),
        ];
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, (pk, cells))| {
                Row::new(
                    RowId(i),
                    RecordKey::parse(pk),
                    cells.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        Table::new("table", columns, records, SortDriver::Manual)
    }

    fn panel_for(table: &Table, id: RowId) -> ActionPanel {
        let row = table.record(id).unwrap();
        ActionPanel {
            owner: id,
            markup: render_panel(row, &PageContext::default(), ViewportClass::Mobile, 3),
        }
    }

    #[test]
    fn test_text_content_strips_markup() {
        assert_eq!(text_content("  <b>Alice</b> "), "Alice");
        assert_eq!(text_content("<a href=\"/x\">Tom &amp; Jerry</a>"), "Tom & Jerry");
        assert_eq!(text_content("&lt;none&gt;"), "<none>");
        assert_eq!(text_content(""), "");
    }

    #[test]
    fn test_record_key_parse() {
        assert_eq!(RecordKey::parse("42").unwrap().as_str(), "42");
        assert_eq!(RecordKey::parse(" 7 ").unwrap().as_str(), "7");
        assert!(RecordKey::parse("   ").is_none());
    }

    #[test]
    fn test_missing_cell_is_empty_text() {
        let row = Row::new(RowId(0), None, vec!["a".to_string()]);
        assert_eq!(row.cell_text(0), "a");
        assert_eq!(row.cell_text(5), "");
        assert_eq!(row.dom_id(), "row-");
    }

    #[test]
    fn test_next_direction() {
        let asc = SortState { column: 1, direction: SortDirection::Ascending };
        let desc = SortState { column: 1, direction: SortDirection::Descending };

        assert_eq!(SortState::next_direction(None, 1), SortDirection::Ascending);
        assert_eq!(SortState::next_direction(Some(asc), 1), SortDirection::Descending);
        assert_eq!(SortState::next_direction(Some(desc), 1), SortDirection::Ascending);
        assert_eq!(SortState::next_direction(Some(asc), 2), SortDirection::Ascending);
    }

    #[test]
    fn test_indicator_outlives_sort_state() {
        let table = create_test_table(&[("1", &["a"])]);
        let indicator = match table.sort_state() {
            Some(state) => state.direction.indicator(),
            None => SortDirection::Descending.indicator(),
        };
        assert_eq!(indicator, "▼");
    }

    #[test]
    fn test_insert_panel_follows_owner() {
        let mut table = create_test_table(&[("1", &["a"]), ("2", &["b"]), ("3", &["c"])]);
        let panel = panel_for(&table, RowId(1));

        assert!(table.insert_panel(panel));
        assert_eq!(table.rows().len(), 4);
        assert!(table.rows()[2].is_panel());
        assert_eq!(table.rows()[2].target(), ClickTarget::Panel(RowId(1)));
        assert_eq!(table.rows()[1].target(), ClickTarget::Record(RowId(1)));
    }

    #[test]
    fn test_insert_panel_replaces_existing() {
        let mut table = create_test_table(&[("1", &["a"]), ("2", &["b"])]);
        let first = panel_for(&table, RowId(0));
        let second = panel_for(&table, RowId(1));

        table.insert_panel(first);
        table.insert_panel(second);

        assert_eq!(table.rows().iter().filter(|r| r.is_panel()).count(), 1);
        assert_eq!(table.panel().unwrap().owner, RowId(1));
        assert!(table.rows()[2].is_panel());
    }

    #[test]
    fn test_insert_panel_for_missing_owner() {
        let mut table = create_test_table(&[("1", &["a"])]);
        let mut panel = panel_for(&table, RowId(0));
        panel.owner = RowId(9);

        assert!(!table.insert_panel(panel));
        assert!(table.panel().is_none());
    }

    #[test]
    fn test_remove_record_takes_its_panel() {
        let mut table = create_test_table(&[("1", &["a"]), ("2", &["b"])]);
        let panel = panel_for(&table, RowId(0));
        table.insert_panel(panel);

        let removed = table.remove_record(RowId(0)).unwrap();
        assert_eq!(removed.key.unwrap().as_str(), "1");
        assert!(table.panel().is_none());
        assert_eq!(table.record_count(), 1);
    }
}
