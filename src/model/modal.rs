//! Modal stack for managing overlays
//!
//! Only the top modal receives input; closing it reveals the one below.

use super::table::RowId;

/// Represents a modal overlay that can be displayed on top of the listing
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Delete confirmation for one record
    DeleteConfirm { row: RowId, summary: String },
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop any delete confirmation for a row that no longer exists
    pub fn discard_for_row(&mut self, id: RowId) {
        self.stack
            .retain(|modal| !matches!(modal, Modal::DeleteConfirm { row, .. } if *row == id));
    }
}
