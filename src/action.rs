//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::action_panel::PanelControl;
use crate::model::table::RowId;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for timers and background requests
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    /// Header click on a column
    SortColumn(usize),
    /// Click on a displayed row (index into the current page)
    ClickRow(usize),
    /// Click the selected row
    ActivateSelected,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Actions
    // ─────────────────────────────────────────────────────────────────────────
    /// Edit the record whose actions are showing
    EditSelected,
    /// Delete the record whose actions are showing
    DeleteSelected,
    /// Mouse click on a control inside a stacked panel
    ClickPanelControl(RowId, PanelControl),
    /// Toggle the edit notice shown to standard viewers
    ToggleEditNotice,
    /// Primary call-to-action (add a record)
    OpenCta,

    // ─────────────────────────────────────────────────────────────────────────
    // Grid Controls
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CyclePageLength,
    ExportCsv,
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────
    DismissNotification,
    DismissNotificationId(u64),

    // ─────────────────────────────────────────────────────────────────────────
    // Navbar
    // ─────────────────────────────────────────────────────────────────────────
    ToggleMenu,
    CloseMenu,
    MenuUp,
    MenuDown,
    FollowMenuLink,
    ToggleDropdown,
    Logout,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
    ConfirmModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::SortColumn(column) => write!(f, "SortColumn({})", column),
            Action::ClickRow(index) => write!(f, "ClickRow({})", index),
            Action::ActivateSelected => write!(f, "ActivateSelected"),
            Action::EditSelected => write!(f, "EditSelected"),
            Action::DeleteSelected => write!(f, "DeleteSelected"),
            Action::ClickPanelControl(row, control) => {
                write!(f, "ClickPanelControl({}, {})", row.0, control.label())
            }
            Action::ToggleEditNotice => write!(f, "ToggleEditNotice"),
            Action::OpenCta => write!(f, "OpenCta"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::CyclePageLength => write!(f, "CyclePageLength"),
            Action::ExportCsv => write!(f, "ExportCsv"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::DismissNotification => write!(f, "DismissNotification"),
            Action::DismissNotificationId(id) => write!(f, "DismissNotificationId({})", id),
            Action::ToggleMenu => write!(f, "ToggleMenu"),
            Action::CloseMenu => write!(f, "CloseMenu"),
            Action::MenuUp => write!(f, "MenuUp"),
            Action::MenuDown => write!(f, "MenuDown"),
            Action::FollowMenuLink => write!(f, "FollowMenuLink"),
            Action::ToggleDropdown => write!(f, "ToggleDropdown"),
            Action::Logout => write!(f, "Logout"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
        }
    }
}
