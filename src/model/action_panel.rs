//! Action panel rendering
//!
//! Builds the edit/delete controls for one record. The edit control depends
//! on the viewer's privilege, the layout on the viewport classification.

use super::context::PageContext;
use super::table::{key_str, RecordKey, Row, RowId};
use super::viewport::ViewportClass;

/// Confirmation prompt shown before a delete request is sent
pub const DELETE_CONFIRMATION: &str = "Are you sure?";

/// Edit control variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditControl {
    /// Navigate to the edit resource (elevated viewers)
    Navigate { href: String },
    /// Raise the in-page edit notice instead of navigating
    Notice,
}

/// Delete control: a state-changing request addressed by primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub endpoint: String,
    /// Element id of the row the request removes on success
    pub target: String,
    pub confirm: &'static str,
}

/// Panel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLayout {
    /// Own row spanning the table width (mobile)
    Stacked,
    /// Trailing actions cell of the record itself (desktop)
    Inline,
}

/// Interactive controls inside a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelControl {
    Edit,
    Delete,
}

impl PanelControl {
    pub fn label(&self) -> &'static str {
        match self {
            PanelControl::Edit => "Edit",
            PanelControl::Delete => "Delete",
        }
    }
}

/// Rendered panel for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelMarkup {
    pub dom_id: String,
    pub owner: RowId,
    pub key: Option<RecordKey>,
    pub edit: EditControl,
    pub delete: DeleteControl,
    pub layout: PanelLayout,
    pub colspan: usize,
}

impl PanelMarkup {
    pub fn controls(&self) -> [PanelControl; 2] {
        [PanelControl::Edit, PanelControl::Delete]
    }

    pub fn navigates_on_edit(&self) -> bool {
        matches!(self.edit, EditControl::Navigate { .. })
    }
}

/// Edit resource for a key, carrying the return location
pub fn edit_target(key: Option<&RecordKey>, context: &PageContext) -> String {
    format!("/edit/{}/?next={}", key_str(key), context.return_path())
}

/// Delete resource for a key
pub fn delete_endpoint(key: Option<&RecordKey>) -> String {
    format!("/delete/{}/", key_str(key))
}

/// Render the action panel for `row`
pub fn render_panel(
    row: &Row,
    context: &PageContext,
    viewport: ViewportClass,
    colspan: usize,
) -> PanelMarkup {
    let key = row.key.as_ref();

    let edit = if context.privilege().is_elevated() {
        EditControl::Navigate {
            href: edit_target(key, context),
        }
    } else {
        EditControl::Notice
    };

    let layout = match viewport {
        ViewportClass::Mobile => PanelLayout::Stacked,
        ViewportClass::Desktop => PanelLayout::Inline,
    };

    PanelMarkup {
        dom_id: format!("actions-{}", key_str(key)),
        owner: row.id,
        key: row.key.clone(),
        edit,
        delete: DeleteControl {
            endpoint: delete_endpoint(key),
            target: row.dom_id(),
            confirm: DELETE_CONFIRMATION,
        },
        layout,
        colspan: colspan.max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::context::ViewerPrivilege;

    fn row(pk: &str) -> Row {
        Row::new(RowId(3), RecordKey::parse(pk), vec!["x".to_string()])
    }

    #[test]
    fn test_elevated_viewer_navigates_with_return_path() {
        let ctx = PageContext::new(ViewerPrivilege::Elevated, "/list", "page=2");
        let panel = render_panel(&row("42"), &ctx, ViewportClass::Mobile, 4);

        assert_eq!(
            panel.edit,
            EditControl::Navigate {
                href: "/edit/42/?next=%2Flist%3Fpage%3D2".to_string()
            }
        );
        assert!(panel.navigates_on_edit());
    }

    #[test]
    fn test_standard_viewer_never_navigates() {
        let ctx = PageContext::new(ViewerPrivilege::Standard, "/list", "page=2");
        let panel = render_panel(&row("42"), &ctx, ViewportClass::Mobile, 4);

        assert_eq!(panel.edit, EditControl::Notice);
        assert!(!panel.navigates_on_edit());
    }

    #[test]
    fn test_delete_control_addresses_key() {
        let panel = render_panel(&row("42"), &PageContext::default(), ViewportClass::Mobile, 4);

        assert_eq!(panel.dom_id, "actions-42");
        assert_eq!(panel.delete.endpoint, "/delete/42/");
        assert_eq!(panel.delete.target, "row-42");
        assert_eq!(panel.delete.confirm, DELETE_CONFIRMATION);
        assert_eq!(panel.owner, RowId(3));
        assert_eq!(panel.colspan, 4);
    }

    #[test]
    fn test_missing_key_renders_empty() {
        let ctx = PageContext::new(ViewerPrivilege::Elevated, "/", "");
        let panel = render_panel(&row(""), &ctx, ViewportClass::Mobile, 0);

        assert!(panel.key.is_none());
        assert_eq!(panel.dom_id, "actions-");
        assert_eq!(panel.delete.endpoint, "/delete//");
        assert_eq!(panel.colspan, 1);
    }

    #[test]
    fn test_layout_follows_viewport() {
        let ctx = PageContext::default();
        assert_eq!(
            render_panel(&row("1"), &ctx, ViewportClass::Mobile, 2).layout,
            PanelLayout::Stacked
        );
        assert_eq!(
            render_panel(&row("1"), &ctx, ViewportClass::Desktop, 2).layout,
            PanelLayout::Inline
        );
    }
}
