//! Page document: the server-rendered listing as data
//!
//! The page arrives as JSON or YAML (picked by file extension) and is turned
//! into a [`Table`] plus the immutable [`PageContext`].

use super::context::{PageContext, ViewerPrivilege};
use super::table::{Column, RecordKey, Row, RowId, SortDriver, Table, SORTABLE_CLASS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON page document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML page document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("table has no header columns")]
    NoColumns,
}

/// Page document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Json,
    Yaml,
}

impl PageFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => PageFormat::Yaml,
            _ => PageFormat::Json,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Document Schema
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct PageDocument {
    #[serde(default)]
    title: String,
    #[serde(default = "default_path")]
    path: String,
    #[serde(default)]
    query: String,
    #[serde(default)]
    viewer: ViewerDocument,
    table: TableDocument,
    #[serde(default)]
    cta_label: Option<String>,
    #[serde(default)]
    edit_notice: Option<String>,
    #[serde(default)]
    menu: Vec<MenuLink>,
}

#[derive(Debug, Default, Deserialize)]
struct ViewerDocument {
    #[serde(default)]
    is_staff: bool,
}

#[derive(Debug, Deserialize)]
struct TableDocument {
    #[serde(default = "default_table_id")]
    id: String,
    #[serde(default)]
    classes: Vec<String>,
    headers: Vec<HeaderDocument>,
    #[serde(default)]
    rows: Vec<RowDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HeaderDocument {
    Label(String),
    Full {
        label: String,
        #[serde(default)]
        classes: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
struct RowDocument {
    #[serde(default)]
    pk: Option<ScalarValue>,
    #[serde(default)]
    cells: Vec<ScalarValue>,
}

/// Scalars the server may emit for keys and cells
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl ScalarValue {
    fn into_text(self) -> String {
        match self {
            ScalarValue::Int(n) => n.to_string(),
            ScalarValue::Float(n) => n.to_string(),
            ScalarValue::Bool(b) => b.to_string(),
            ScalarValue::Text(s) => s,
        }
    }
}

/// Navbar link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
}

fn default_path() -> String {
    "/".to_string()
}

fn default_table_id() -> String {
    "table".to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loaded Page
// ═══════════════════════════════════════════════════════════════════════════════

/// A loaded page, ready for the controllers
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub context: PageContext,
    pub table: Table,
    pub cta_label: String,
    pub edit_notice: String,
    pub menu: Vec<MenuLink>,
}

pub fn load_page(path: &Path) -> Result<Page, PageError> {
    let contents = fs::read_to_string(path).map_err(|source| PageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_page(&contents, PageFormat::from_path(path))
}

pub fn parse_page(contents: &str, format: PageFormat) -> Result<Page, PageError> {
    let document: PageDocument = match format {
        PageFormat::Json => serde_json::from_str(contents)?,
        PageFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    build_page(document)
}

fn build_page(document: PageDocument) -> Result<Page, PageError> {
    let PageDocument {
        title,
        path,
        query,
        viewer,
        table,
        cta_label,
        edit_notice,
        menu,
    } = document;

    if table.headers.is_empty() {
        return Err(PageError::NoColumns);
    }

    let columns: Vec<Column> = table
        .headers
        .into_iter()
        .map(|header| match header {
            HeaderDocument::Label(label) => Column::new(label),
            HeaderDocument::Full { label, classes } => Column { label, classes },
        })
        .collect();

    let records: Vec<Row> = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let key = row
                .pk
                .map(ScalarValue::into_text)
                .and_then(|raw| RecordKey::parse(&raw));
            if key.is_none() {
                tracing::warn!(row = index, "row without a primary key");
            }
            let cells = row.cells.into_iter().map(ScalarValue::into_text).collect();
            Row::new(RowId(index), key, cells)
        })
        .collect();

    let driver = if table.classes.iter().any(|c| c == SORTABLE_CLASS) {
        SortDriver::Manual
    } else {
        SortDriver::Grid
    };

    let context = PageContext::new(ViewerPrivilege::from_staff_flag(viewer.is_staff), &path, &query);

    tracing::info!(
        table = %table.id,
        rows = records.len(),
        columns = columns.len(),
        ?driver,
        elevated = context.privilege().is_elevated(),
        "page loaded"
    );

    Ok(Page {
        title: if title.is_empty() { "Records".to_string() } else { title },
        context,
        table: Table::new(table.id, columns, records, driver),
        cta_label: cta_label.unwrap_or_else(|| "Log hours".to_string()),
        edit_notice: edit_notice.unwrap_or_else(|| {
            "Only staff can edit entries. Contact an administrator to change this record."
                .to_string()
        }),
        menu,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::TableRow;

    const JSON_PAGE: &str = r#"{
        "title": "Volunteer hours",
        "path": "/list",
        "query": "page=2",
        "viewer": { "is_staff": true },
        "table": {
            "id": "table",
            "classes": ["tableSortable"],
            "headers": [
                "Volunteer",
                { "label": "Hours", "classes": ["default-sort"] },
                "Task"
            ],
            "rows": [
                { "pk": 42, "cells": ["<b>Alice</b>", 3.5, "Garden"] },
                { "pk": "7", "cells": ["Bob", 2, "Kitchen"] },
                { "cells": ["Carol", 1, "Driving"] }
            ]
        }
    }"#;

    #[test]
    fn test_parse_json_page() {
        let page = parse_page(JSON_PAGE, PageFormat::Json).unwrap();

        assert_eq!(page.title, "Volunteer hours");
        assert_eq!(page.context.location(), "/list?page=2");
        assert!(page.context.privilege().is_elevated());
        assert_eq!(page.table.driver, SortDriver::Manual);
        assert_eq!(page.table.columns.len(), 3);
        assert!(page.table.columns[1].is_default_sort());
        assert_eq!(page.table.record_count(), 3);
    }

    #[test]
    fn test_keys_and_cells_are_normalised() {
        let page = parse_page(JSON_PAGE, PageFormat::Json).unwrap();
        let rows: Vec<&Row> = page.table.records().collect();

        assert_eq!(rows[0].key.as_ref().unwrap().as_str(), "42");
        assert_eq!(rows[0].cell_text(0), "Alice");
        assert_eq!(rows[0].cell_text(1), "3.5");
        assert_eq!(rows[1].key.as_ref().unwrap().as_str(), "7");
        assert!(rows[2].key.is_none());
        assert!(page.table.rows().iter().all(|r| matches!(r, TableRow::Record(_))));
    }

    #[test]
    fn test_parse_yaml_page_defaults() {
        let yaml = r#"
table:
  headers: [Date, Hours]
  rows:
    - pk: 1
      cells: ["2024-01-02", "4"]
"#;
        let page = parse_page(yaml, PageFormat::Yaml).unwrap();

        assert_eq!(page.title, "Records");
        assert_eq!(page.table.id, "table");
        assert_eq!(page.table.driver, SortDriver::Grid);
        assert!(!page.context.privilege().is_elevated());
        assert_eq!(page.context.location(), "/");
        assert_eq!(page.cta_label, "Log hours");
    }

    #[test]
    fn test_table_without_headers_is_rejected() {
        let json = r#"{ "table": { "headers": [] } }"#;
        assert!(matches!(
            parse_page(json, PageFormat::Json),
            Err(PageError::NoColumns)
        ));
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(matches!(
            parse_page("{ not json", PageFormat::Json),
            Err(PageError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_page(Path::new("/nonexistent/page.json")).unwrap_err();
        assert!(matches!(err, PageError::Read { .. }));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(PageFormat::from_path(Path::new("a.yaml")), PageFormat::Yaml);
        assert_eq!(PageFormat::from_path(Path::new("a.yml")), PageFormat::Yaml);
        assert_eq!(PageFormat::from_path(Path::new("a.json")), PageFormat::Json);
        assert_eq!(PageFormat::from_path(Path::new("page")), PageFormat::Json);
    }
}
