//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Table behaviour lives in the model controllers; App routes Actions to them
//! and turns their results into notifications and pending work for the main
//! loop.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_listing_screen, ConfirmDialog, HelpDialog, ListingComponent, ListingRenderContext,
    NavbarComponent,
};
use crate::config::Config;
use crate::model::action_panel::{render_panel, EditControl, PanelControl};
use crate::model::modal::{Modal, ModalStack};
use crate::model::notification::{NotificationCenter, NotificationLevel};
use crate::model::page::MenuLink;
use crate::model::responsive::ResponsiveController;
use crate::model::sort;
use crate::model::table::{key_str, SortDriver};
use crate::model::viewport::viewport_width;
use crate::model::{
    ActionPanelController, ClickTarget, Grid, Page, PageContext, RowId, Table, TableRow,
    ViewportClass,
};
use crate::services::requests::ADD_PATH;
use crate::services::{
    absolute_url, build_delete_command, build_logout_command, export_table, ControlRegistry,
    DeleteOutcome, Enhance, JobRunner,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::collections::HashSet;
use std::time::Instant;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Page title from the page document
    pub title: String,

    /// Viewer privilege and location, fixed at load
    pub context: PageContext,

    /// Records plus the open action panel row
    pub table: Table,

    /// Paging, search and typed sorting
    pub grid: Grid,

    /// Single-open-row panel state
    pub panels: ActionPanelController,

    /// Mouse bindings for panel controls (`None` when enhancement is off)
    pub registry: Option<ControlRegistry>,

    /// Viewport classification and call-to-action style
    pub responsive: ResponsiveController,

    pub notifications: NotificationCenter,

    /// Background delete requests
    pub requests: JobRunner,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub cta_label: String,
    pub edit_notice: String,
    pub show_edit_notice: bool,
    pub menu: Vec<MenuLink>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// URL to open (set by edit/menu/CTA actions, handled by main loop)
    pub pending_navigation: Option<String>,

    /// Logout request to run once the terminal is restored
    pub pending_logout: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub listing: ListingComponent,
    pub navbar: NavbarComponent,
    pub help_dialog: HelpDialog,
    pub quit_dialog: ConfirmDialog,
    pub delete_dialog: ConfirmDialog,
}

impl App {
    /// Create the app for a loaded page
    pub fn new(config: Config, page: Page) -> App {
        let Page {
            title,
            context,
            mut table,
            cta_label,
            edit_notice,
            menu,
        } = page;

        let grid = match table.driver {
            SortDriver::Grid => Grid::init(&mut table, config.page_length),
            SortDriver::Manual => Grid::attach(&table, config.page_length),
        };

        let mut registry = config.enhance_controls.then(ControlRegistry::new);
        let mut panels = ActionPanelController::new(config.panel_strategy);
        panels.prepare(
            &table,
            &context,
            registry.as_mut().map(|r| r as &mut dyn Enhance),
        );

        App {
            config,
            title,
            context,
            table,
            grid,
            panels,
            registry,
            responsive: ResponsiveController::new(),
            notifications: NotificationCenter::new(),
            requests: JobRunner::new(),
            modals: ModalStack::new(),
            cta_label,
            edit_notice,
            show_edit_notice: false,
            menu,
            should_quit: false,
            error: None,
            status_message: None,
            pending_navigation: None,
            pending_logout: None,
            listing: ListingComponent::new(),
            navbar: NavbarComponent::new(),
            help_dialog: HelpDialog::default(),
            quit_dialog: ConfirmDialog::quit(),
            delete_dialog: ConfirmDialog::delete(""),
        }
    }

    /// Current viewport class; desktop until the first resize is applied
    pub fn viewport(&self) -> ViewportClass {
        self.responsive.class().unwrap_or(ViewportClass::Desktop)
    }

    fn selected_record_id(&self) -> Option<RowId> {
        let rows = self.grid.page_rows(&self.table);
        self.listing.selected_record(&rows).map(|row| row.id)
    }

    fn reselect(&mut self, id: Option<RowId>) {
        let rows = self.grid.page_rows(&self.table);
        if let Some(id) = id {
            self.listing.select_row(id, &rows);
        }
        self.listing.clamp(&rows);
    }

    /// Record whose edit/delete controls the keyboard acts on.
    ///
    /// Narrow viewports expose actions only through the open panel; wide
    /// ones show them inline on the selected row.
    fn action_row(&self) -> Option<RowId> {
        if self.viewport().is_mobile() {
            self.panels.open_owner()
        } else {
            self.selected_record_id()
        }
    }

    /// After paging or searching: close a panel whose owner is no longer shown
    fn after_view_change(&mut self) {
        let visible: HashSet<RowId> = self
            .grid
            .page_rows(&self.table)
            .iter()
            .filter_map(|row| row.as_record())
            .map(|row| row.id)
            .collect();
        if let Some(owner) = self
            .panels
            .retain_visible(&mut self.table, |id| visible.contains(&id))
        {
            tracing::debug!(owner = owner.0, "panel closed, owner no longer displayed");
        }
        let rows = self.grid.page_rows(&self.table);
        self.listing.select_first(&rows);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row Clicks
    // ─────────────────────────────────────────────────────────────────────────

    fn click_row(&mut self, index: usize) {
        let target = self
            .grid
            .page_rows(&self.table)
            .get(index)
            .map(|row| TableRow::target(row));
        let Some(target) = target else {
            return;
        };

        let viewport = self.viewport();
        self.panels.click(
            &mut self.table,
            target,
            &self.context,
            viewport,
            self.registry.as_mut().map(|r| r as &mut dyn Enhance),
        );

        if let ClickTarget::Record(id) = target {
            self.reselect(Some(id));
        }
    }

    fn click_panel_control(&mut self, owner: RowId, control: PanelControl) {
        // inline controls are part of the row itself; stacked ones need binding
        let resolved = if self.viewport().is_mobile() {
            self.registry
                .as_ref()
                .and_then(|registry| registry.resolve(owner, control))
        } else {
            self.reselect(Some(owner));
            Some(control)
        };

        match resolved {
            Some(PanelControl::Edit) => self.edit_record(owner),
            Some(PanelControl::Delete) => self.request_delete(owner),
            None => {
                tracing::debug!(owner = owner.0, control = control.label(), "click on unbound control");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edit
    // ─────────────────────────────────────────────────────────────────────────

    fn edit_record(&mut self, id: RowId) {
        let markup = match self.table.panel() {
            Some(panel) if panel.owner == id => panel.markup.clone(),
            _ => {
                let Some(row) = self.table.record(id) else {
                    return;
                };
                render_panel(row, &self.context, self.viewport(), self.table.columns.len())
            }
        };

        match markup.edit {
            EditControl::Navigate { href } => {
                let url = absolute_url(&self.config.base_url, &href);
                tracing::info!(url = %url, "opening edit page");
                self.pending_navigation = Some(url);
            }
            EditControl::Notice => {
                self.show_edit_notice = !self.show_edit_notice;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete
    // ─────────────────────────────────────────────────────────────────────────

    fn request_delete(&mut self, id: RowId) {
        if self.requests.is_pending(id) {
            self.status_message = Some("Delete already in progress".to_string());
            return;
        }
        let Some(row) = self.table.record(id) else {
            return;
        };

        let summary = (0..self.table.columns.len())
            .map(|column| row.cell_text(column))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" · ");
        self.delete_dialog = ConfirmDialog::delete(&summary);
        self.modals.push(Modal::DeleteConfirm { row: id, summary });
    }

    fn start_delete(&mut self, id: RowId) {
        let Some(row) = self.table.record(id) else {
            return;
        };
        let key = row.key.clone();
        if key.is_none() {
            tracing::warn!(row = id.0, "deleting a record without a primary key");
        }

        let command = build_delete_command(
            &self.config.request_command,
            &self.config.base_url,
            key.as_ref(),
        );
        let message = format!("Deleting entry {}...", key_str(key.as_ref()));
        if self.requests.spawn_delete(id, key, command) {
            self.notifications.push(message, NotificationLevel::Info);
        }
    }

    /// Apply a finished delete: remove the row on success, report otherwise
    pub fn apply_delete_outcome(&mut self, outcome: DeleteOutcome) {
        let DeleteOutcome { row, key, result } = outcome;
        match result {
            Ok(()) => {
                let removed = self.panels.record_deleted(&mut self.table, row);
                if let Some(registry) = self.registry.as_mut() {
                    registry.forget(row);
                }
                self.modals.discard_for_row(row);
                self.grid.clamp_page(&self.table);
                self.reselect(None);

                if removed.is_some() {
                    tracing::info!(row = row.0, key = key_str(key.as_ref()), "entry deleted");
                    self.notifications
                        .push("Entry deleted", NotificationLevel::Success);
                }
                self.status_message = None;
            }
            Err(err) => {
                tracing::warn!(row = row.0, key = key_str(key.as_ref()), error = %err, "delete failed");
                self.notifications.push(
                    format!("Could not delete entry {}: {}", key_str(key.as_ref()), err),
                    NotificationLevel::Danger,
                );
                self.status_message = None;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    fn export(&mut self) {
        let rows = self.grid.export_rows(&self.table);
        let count = rows.len();
        match export_table(
            &self.config.export_dir(),
            &self.table.id,
            &self.table.columns,
            &rows,
        ) {
            Ok(path) => {
                self.notifications.push(
                    format!("Exported {} rows to {}", count, path.display()),
                    NotificationLevel::Success,
                );
            }
            Err(err) => {
                tracing::error!(error = %err, "export failed");
                self.notifications
                    .push(format!("Export failed: {}", err), NotificationLevel::Danger);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        tracing::info!(
            table = %self.table.id,
            location = self.context.location(),
            records = self.table.record_count(),
            strategy = ?self.panels.strategy(),
            "listing ready"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }
        if self.navbar.is_open() {
            return self.navbar.handle_key_event(key);
        }
        if key.code == KeyCode::Esc && self.show_edit_notice && !self.listing.search_mode {
            return Ok(Some(Action::ToggleEditNotice));
        }
        self.listing.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.modals.is_empty() {
            return Ok(None);
        }
        if let Some(action) = self.navbar.handle_mouse_event(mouse)? {
            return Ok(Some(action));
        }
        self.listing.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        tracing::trace!(%action, "update");
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                for outcome in self.requests.poll() {
                    self.apply_delete_outcome(outcome);
                }
                self.notifications.expire(Instant::now());
            }
            Action::Resize(width, _) => {
                let width = viewport_width(width, self.config.cell_width);
                if let Some(class) = self.responsive.apply(width) {
                    self.panels.viewport_changed(&mut self.table, class);
                    self.reselect(None);
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Navigation (delegate to ListingComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => {
                let rows = self.grid.page_rows(&self.table);
                self.listing.next(&rows);
            }
            Action::PrevRow => {
                let rows = self.grid.page_rows(&self.table);
                self.listing.previous(&rows);
            }
            Action::FirstRow => {
                let rows = self.grid.page_rows(&self.table);
                self.listing.select_first(&rows);
            }
            Action::LastRow => {
                let rows = self.grid.page_rows(&self.table);
                self.listing.select_last(&rows);
            }

            // ─────────────────────────────────────────────────────────────────
            // Table
            // ─────────────────────────────────────────────────────────────────
            Action::SortColumn(column) => {
                if column >= self.table.columns.len() {
                    return Ok(None);
                }
                let selected = self.selected_record_id();
                let direction = match self.table.driver {
                    SortDriver::Manual => sort::sort_by_header(&mut self.table, column),
                    SortDriver::Grid => self.grid.sort_by_header(&mut self.table, column),
                };
                self.status_message = Some(format!(
                    "Sorted by {} {}",
                    self.table.columns[column].label,
                    direction.indicator()
                ));
                self.reselect(selected);
            }
            Action::ClickRow(index) => self.click_row(index),
            Action::ActivateSelected => {
                return Ok(Some(Action::ClickRow(self.listing.selected)));
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Actions
            // ─────────────────────────────────────────────────────────────────
            Action::EditSelected => match self.action_row() {
                Some(id) => self.edit_record(id),
                None => self.status_message = Some("Select a row first".to_string()),
            },
            Action::DeleteSelected => match self.action_row() {
                Some(id) => self.request_delete(id),
                None => self.status_message = Some("Select a row first".to_string()),
            },
            Action::ClickPanelControl(owner, control) => self.click_panel_control(owner, control),
            Action::ToggleEditNotice => {
                self.show_edit_notice = !self.show_edit_notice;
            }
            Action::OpenCta => {
                self.pending_navigation = Some(absolute_url(&self.config.base_url, ADD_PATH));
            }

            // ─────────────────────────────────────────────────────────────────
            // Grid Controls
            // ─────────────────────────────────────────────────────────────────
            Action::NextPage => {
                self.grid.next_page(&self.table);
                self.after_view_change();
            }
            Action::PrevPage => {
                self.grid.prev_page();
                self.after_view_change();
            }
            Action::FirstPage => {
                self.grid.first_page();
                self.after_view_change();
            }
            Action::LastPage => {
                self.grid.last_page(&self.table);
                self.after_view_change();
            }
            Action::CyclePageLength => {
                let length = self.grid.cycle_page_length();
                self.status_message = Some(format!("Showing {} entries per page", length));
                self.after_view_change();
            }
            Action::ExportCsv => self.export(),
            Action::EnterSearchMode => self.listing.enter_search_mode(),
            Action::ExitSearchMode => self.listing.exit_search_mode(),
            Action::SearchInput(c) => {
                self.grid.push_query_char(c);
                self.after_view_change();
            }
            Action::SearchBackspace => {
                self.grid.pop_query_char();
                self.after_view_change();
            }

            // ─────────────────────────────────────────────────────────────────
            // Notifications
            // ─────────────────────────────────────────────────────────────────
            Action::DismissNotification => {
                self.notifications.dismiss_latest();
            }
            Action::DismissNotificationId(id) => {
                if !self.notifications.dismiss(id) {
                    tracing::debug!(id, "notification already gone");
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Navbar
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleMenu => self.navbar.toggle_menu(),
            Action::CloseMenu => self.navbar.close_menu(),
            Action::MenuDown => self.navbar.next_link(self.menu.len()),
            Action::MenuUp => self.navbar.previous_link(self.menu.len()),
            Action::FollowMenuLink => {
                if let Some(link) = self.menu.get(self.navbar.selected_link) {
                    self.pending_navigation = Some(absolute_url(&self.config.base_url, &link.href));
                }
                self.navbar.close_menu();
            }
            Action::ToggleDropdown => self.navbar.toggle_dropdown(),
            Action::Logout => {
                self.navbar.close_all();
                self.pending_logout = Some(build_logout_command(
                    &self.config.request_command,
                    &self.config.base_url,
                ));
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(Modal::DeleteConfirm { row, .. }) = self.modals.pop() {
                    self.start_delete(row);
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = ListingRenderContext {
            title: &self.title,
            table: &self.table,
            grid: &self.grid,
            context: &self.context,
            viewport: self.responsive.class().unwrap_or(ViewportClass::Desktop),
            cta: self.responsive.cta(),
            cta_label: &self.cta_label,
            menu: &self.menu,
            notifications: &self.notifications,
            edit_notice: self.show_edit_notice.then_some(self.edit_notice.as_str()),
            requests: &self.requests,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        draw_listing_screen(frame, area, &mut self.listing, &mut self.navbar, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::DeleteConfirm { .. } => self.delete_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::DeleteConfirm { .. } => self.delete_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
