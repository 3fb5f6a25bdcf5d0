//! Listing component - Main application screen
//!
//! Displays the navbar, grid controls, the record table (with the action
//! panel row or the inline actions cell), notifications and status bars.
//! Owns row selection and the click areas used for mouse input.

use crate::action::Action;
use crate::component::Component;
use crate::components::cta::render_cta;
use crate::components::layout::{calculate_controls_layout, calculate_listing_layout};
use crate::components::navbar::{draw_navbar, draw_navbar_overlays, NavbarComponent};
use crate::components::notifications::render_notifications;
use crate::model::action_panel::PanelControl;
use crate::model::context::PageContext;
use crate::model::grid::Grid;
use crate::model::notification::NotificationCenter;
use crate::model::page::MenuLink;
use crate::model::responsive::CtaStyle;
use crate::model::table::{Row, RowId, Table, TableRow};
use crate::model::viewport::ViewportClass;
use crate::services::JobRunner;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before its cells are truncated
const MAX_COLUMN_WIDTH: usize = 32;

const SELECTION_MARKER: &str = "▶ ";
const COLUMN_SEPARATOR: &str = " │ ";
const INLINE_EDIT: &str = "[Edit]";
const INLINE_DELETE: &str = "[Delete]";
const PANEL_EDIT: &str = "[ Edit ]";
const PANEL_DELETE: &str = "[ Delete ]";

// ═══════════════════════════════════════════════════════════════════════════════
// Click Areas
// ═══════════════════════════════════════════════════════════════════════════════

/// Screen areas recorded during the last draw, used to resolve mouse clicks
#[derive(Debug, Default)]
struct HitMap {
    headers: Vec<(Rect, usize)>,
    rows: Vec<(Rect, usize)>,
    controls: Vec<(Rect, RowId, PanelControl)>,
    dismiss: Vec<(Rect, u64)>,
    length: Option<Rect>,
    export: Option<Rect>,
    search: Option<Rect>,
    cta: Option<Rect>,
}

impl HitMap {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

pub(crate) fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Listing Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Listing component for the main application view
/// Owns row selection and handles table interactions
#[derive(Debug, Default)]
pub struct ListingComponent {
    /// Selected index into the rows of the current page
    pub selected: usize,

    /// Whether search mode is active
    pub search_mode: bool,

    /// First visible row
    pub scroll_offset: usize,

    hits: HitMap,
}

impl ListingComponent {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    fn record_indices(rows: &[&TableRow]) -> Vec<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| !row.is_panel())
            .map(|(index, _)| index)
            .collect()
    }

    /// Select the next record (skipping the panel row)
    pub fn next(&mut self, rows: &[&TableRow]) {
        let records = Self::record_indices(rows);
        let Some(&first) = records.first() else {
            return;
        };
        self.selected = records
            .iter()
            .find(|&&index| index > self.selected)
            .copied()
            .unwrap_or(first);
    }

    /// Select the previous record (skipping the panel row)
    pub fn previous(&mut self, rows: &[&TableRow]) {
        let records = Self::record_indices(rows);
        let Some(&last) = records.last() else {
            return;
        };
        self.selected = records
            .iter()
            .rev()
            .find(|&&index| index < self.selected)
            .copied()
            .unwrap_or(last);
    }

    pub fn select_first(&mut self, rows: &[&TableRow]) {
        self.selected = Self::record_indices(rows).first().copied().unwrap_or(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, rows: &[&TableRow]) {
        if let Some(&last) = Self::record_indices(rows).last() {
            self.selected = last;
        }
    }

    /// Move the selection onto the record `id`, if it is displayed
    pub fn select_row(&mut self, id: RowId, rows: &[&TableRow]) {
        if let Some(index) = rows
            .iter()
            .position(|row| row.as_record().is_some_and(|r| r.id == id))
        {
            self.selected = index;
        }
    }

    /// Keep the selection on a displayed record after rows change
    pub fn clamp(&mut self, rows: &[&TableRow]) {
        if rows.is_empty() {
            self.selected = 0;
            return;
        }
        if self.selected >= rows.len() {
            self.selected = rows.len() - 1;
        }
        if rows[self.selected].is_panel() {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn selected_record<'a>(&self, rows: &[&'a TableRow]) -> Option<&'a Row> {
        rows.get(self.selected).and_then(|row| row.as_record())
    }

    fn ensure_visible(&mut self, rows: &[&TableRow], height: usize) {
        if height == 0 {
            return;
        }
        // keep an open panel under the selection on screen too
        let bottom = match rows.get(self.selected + 1) {
            Some(row) if row.is_panel() => self.selected + 1,
            _ => self.selected,
        };
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if bottom >= self.scroll_offset + height {
            self.scroll_offset = bottom + 1 - height;
        }
        let max_offset = rows.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for ListingComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return self.handle_search_key_event(key);
        }

        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') => Some(Action::FirstRow),
            KeyCode::Char('G') => Some(Action::LastRow),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ActivateSelected),

            // Sorting by header number
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|digit| Action::SortColumn(digit as usize - 1)),

            // Row actions
            KeyCode::Char('e') => Some(Action::EditSelected),
            KeyCode::Char('d') => Some(Action::DeleteSelected),
            KeyCode::Char('a') => Some(Action::OpenCta),

            // Paging
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Home => Some(Action::FirstPage),
            KeyCode::End => Some(Action::LastPage),
            KeyCode::Char('l') => Some(Action::CyclePageLength),

            // Export & search
            KeyCode::Char('x') => Some(Action::ExportCsv),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            // Overlays
            KeyCode::Char('c') => Some(Action::DismissNotification),
            KeyCode::Char('m') => Some(Action::ToggleMenu),
            KeyCode::Char('u') => Some(Action::ToggleDropdown),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let (x, y) = (mouse.column, mouse.row);
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::NextRow),
            MouseEventKind::ScrollUp => Some(Action::PrevRow),
            MouseEventKind::Down(MouseButton::Left) => {
                let hits = &self.hits;
                if let Some((_, id)) = hits.dismiss.iter().find(|(rect, _)| contains(*rect, x, y)) {
                    Some(Action::DismissNotificationId(*id))
                // controls sit on top of their row, so test them first
                } else if let Some((_, owner, control)) =
                    hits.controls.iter().find(|(rect, _, _)| contains(*rect, x, y))
                {
                    Some(Action::ClickPanelControl(*owner, *control))
                } else if let Some((_, column)) =
                    hits.headers.iter().find(|(rect, _)| contains(*rect, x, y))
                {
                    Some(Action::SortColumn(*column))
                } else if let Some((_, index)) =
                    hits.rows.iter().find(|(rect, _)| contains(*rect, x, y))
                {
                    Some(Action::ClickRow(*index))
                } else if hits.cta.is_some_and(|rect| contains(rect, x, y)) {
                    Some(Action::OpenCta)
                } else if hits.length.is_some_and(|rect| contains(rect, x, y)) {
                    Some(Action::CyclePageLength)
                } else if hits.export.is_some_and(|rect| contains(rect, x, y)) {
                    Some(Action::ExportCsv)
                } else if hits.search.is_some_and(|rect| contains(rect, x, y)) {
                    Some(Action::EnterSearchMode)
                } else {
                    None
                }
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_listing_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the listing screen
pub struct ListingRenderContext<'a> {
    pub title: &'a str,
    pub table: &'a Table,
    pub grid: &'a Grid,
    pub context: &'a PageContext,
    pub viewport: ViewportClass,
    pub cta: &'a CtaStyle,
    pub cta_label: &'a str,
    pub menu: &'a [MenuLink],
    pub notifications: &'a NotificationCenter,
    pub edit_notice: Option<&'a str>,
    pub requests: &'a JobRunner,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the listing screen
pub fn draw_listing_screen(
    frame: &mut Frame,
    area: Rect,
    listing: &mut ListingComponent,
    navbar: &mut NavbarComponent,
    ctx: &ListingRenderContext,
) -> Result<()> {
    let notification_lines = ctx.notifications.len().min(3) as u16;
    let layout = calculate_listing_layout(area, notification_lines, ctx.edit_notice.is_some());
    listing.hits.clear();

    // The inline button lives at the right end of the navbar
    let navbar_area = if ctx.cta.is_floating() {
        layout.navbar
    } else {
        let cta_width = (UnicodeWidthStr::width(ctx.cta_label) as u16 + 4).min(layout.navbar.width);
        let cta_area = Rect::new(
            layout.navbar.x + layout.navbar.width - cta_width,
            layout.navbar.y,
            cta_width,
            1,
        );
        listing.hits.cta = Some(render_cta(frame, cta_area, ctx.cta, ctx.cta_label));
        Rect::new(
            layout.navbar.x,
            layout.navbar.y,
            layout.navbar.width - cta_width,
            1,
        )
    };
    draw_navbar(frame, navbar_area, navbar, ctx);

    if let Some(notification_area) = layout.notifications {
        listing.hits.dismiss = render_notifications(frame, notification_area, ctx.notifications);
    }
    if let (Some(notice_area), Some(notice)) = (layout.notice, ctx.edit_notice) {
        render_edit_notice(frame, notice_area, notice);
    }

    render_controls(frame, layout.controls, listing, ctx);
    render_table(frame, layout.table, listing, ctx);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, listing, ctx);

    if ctx.cta.is_floating() {
        listing.hits.cta = Some(render_cta(frame, area, ctx.cta, ctx.cta_label));
    }

    draw_navbar_overlays(frame, area, navbar, ctx);
    Ok(())
}

fn render_edit_notice(frame: &mut Frame, area: Rect, notice: &str) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(notice.to_string(), Style::default().fg(Color::White)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Notice ")
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_controls(
    frame: &mut Frame,
    area: Rect,
    listing: &mut ListingComponent,
    ctx: &ListingRenderContext,
) {
    let layout = calculate_controls_layout(area);
    let border = Style::default().fg(Color::DarkGray);

    let length = Paragraph::new(Line::from(vec![
        Span::styled("◂ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            ctx.grid.page_length().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▸", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(ratatui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(border).title(" Show "));
    frame.render_widget(length, layout.length);

    let export = Paragraph::new(Span::styled(
        "CSV",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ))
    .alignment(ratatui::layout::Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(border).title(" Export "));
    frame.render_widget(export, layout.export);

    let search_style = if listing.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        border
    };
    let cursor = if listing.search_mode { "_" } else { "" };
    let search = Paragraph::new(Span::styled(
        format!("{}{}", ctx.grid.query(), cursor),
        Style::default().fg(Color::White),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search "),
    );
    frame.render_widget(search, layout.search);

    listing.hits.length = Some(layout.length);
    listing.hits.export = Some(layout.export);
    listing.hits.search = Some(layout.search);
}

/// Pad or truncate `text` to exactly `width` terminal cells
fn fit(text: &str, width: usize) -> String {
    let total = UnicodeWidthStr::width(text);
    if total <= width {
        return format!("{}{}", text, " ".repeat(width - total));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    if width > 0 {
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn column_widths(table: &Table, rows: &[&TableRow]) -> Vec<usize> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            // room for the sort indicator
            let header = UnicodeWidthStr::width(column.label.as_str()) + 2;
            let cells = rows
                .iter()
                .filter_map(|row| row.as_record())
                .map(|row| UnicodeWidthStr::width(row.cell_text(index).as_str()))
                .max()
                .unwrap_or(0);
            header.max(cells).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Accumulates spans on one line while tracking the x position
struct LineBuilder {
    x: u16,
    y: u16,
    spans: Vec<Span<'static>>,
}

impl LineBuilder {
    fn new(x: u16, y: u16) -> Self {
        Self { x, y, spans: Vec::new() }
    }

    /// Append `text`, returning the area it occupies
    fn push(&mut self, text: String, style: Style) -> Rect {
        let width = UnicodeWidthStr::width(text.as_str()) as u16;
        let rect = Rect::new(self.x, self.y, width, 1);
        self.x = self.x.saturating_add(width);
        self.spans.push(Span::styled(text, style));
        rect
    }

    fn finish(self) -> Line<'static> {
        Line::from(self.spans)
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    listing: &mut ListingComponent,
    ctx: &ListingRenderContext,
) {
    let rows = ctx.grid.page_rows(ctx.table);
    listing.clamp(&rows);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", ctx.title))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let inline_actions = !ctx.viewport.is_mobile();
    let widths = column_widths(ctx.table, &rows);
    let sort = ctx.table.sort_state();
    let mut lines: Vec<Line> = Vec::new();

    // Header
    let mut header = LineBuilder::new(inner.x, inner.y);
    header.push("  ".to_string(), Style::default());
    for (index, column) in ctx.table.columns.iter().enumerate() {
        if index > 0 {
            header.push(COLUMN_SEPARATOR.to_string(), Style::default().fg(Color::DarkGray));
        }
        let indicator = match sort {
            Some(state) if state.column == index => state.direction.indicator(),
            _ => "",
        };
        let label = format!("{} {}", column.label, indicator);
        let rect = header.push(
            fit(label.trim_end(), widths[index]),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        );
        listing.hits.headers.push((rect, index));
    }
    if inline_actions {
        header.push(COLUMN_SEPARATOR.to_string(), Style::default().fg(Color::DarkGray));
        header.push("Actions".to_string(), Style::default().fg(Color::DarkGray));
    }
    lines.push(header.finish());
    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(Color::DarkGray),
    )));

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No matching records found",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let body_height = inner.height.saturating_sub(2) as usize;
    listing.ensure_visible(&rows, body_height);

    for (index, row) in rows
        .iter()
        .enumerate()
        .skip(listing.scroll_offset)
        .take(body_height)
    {
        let y = inner.y + 2 + (index - listing.scroll_offset) as u16;
        let line = match row {
            TableRow::Record(record) => {
                render_record_line(listing, ctx, record, &widths, index, y, inline_actions, inner.x)
            }
            TableRow::Panel(panel) => {
                let mut line = LineBuilder::new(inner.x, y);
                line.push("  └ ".to_string(), Style::default().fg(Color::DarkGray));
                let edit = line.push(
                    PANEL_EDIT.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                );
                line.push("  ".to_string(), Style::default());
                let delete = line.push(
                    PANEL_DELETE.to_string(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                );
                if !panel.markup.navigates_on_edit() {
                    line.push(
                        "  edit shows a notice".to_string(),
                        Style::default().fg(Color::DarkGray),
                    );
                }
                listing.hits.controls.push((edit, panel.owner, PanelControl::Edit));
                listing.hits.controls.push((delete, panel.owner, PanelControl::Delete));
                line.finish()
            }
        };
        listing
            .hits
            .rows
            .push((Rect::new(inner.x, y, inner.width, 1), index));
        lines.push(line);
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[allow(clippy::too_many_arguments)]
fn render_record_line(
    listing: &mut ListingComponent,
    ctx: &ListingRenderContext,
    record: &Row,
    widths: &[usize],
    index: usize,
    y: u16,
    inline_actions: bool,
    x: u16,
) -> Line<'static> {
    let is_selected = index == listing.selected;
    let is_pending = ctx.requests.is_pending(record.id);

    let mut style = Style::default().fg(Color::White);
    if is_pending {
        style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT);
    }
    if is_selected {
        style = style.bg(Color::Blue).add_modifier(Modifier::BOLD);
    }

    let mut line = LineBuilder::new(x, y);
    let marker = if is_selected { SELECTION_MARKER } else { "  " };
    line.push(marker.to_string(), Style::default().fg(Color::Cyan));
    for (column, width) in widths.iter().enumerate() {
        if column > 0 {
            line.push(COLUMN_SEPARATOR.to_string(), style.fg(Color::DarkGray));
        }
        line.push(fit(&record.cell_text(column), *width), style);
    }

    if inline_actions {
        line.push(COLUMN_SEPARATOR.to_string(), Style::default().fg(Color::DarkGray));
        let (edit_style, delete_style) = if is_selected {
            (
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };
        let edit = line.push(INLINE_EDIT.to_string(), edit_style);
        line.push(" ".to_string(), Style::default());
        let delete = line.push(INLINE_DELETE.to_string(), delete_style);
        listing.hits.controls.push((edit, record.id, PanelControl::Edit));
        listing.hits.controls.push((delete, record.id, PanelControl::Delete));
    }

    line.finish()
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &ListingRenderContext) {
    let info = ctx.grid.page_info(ctx.table);
    let mut spans = vec![
        Span::styled(
            format!(" {} ", ctx.viewport.name()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!(
                "Showing {} to {} of {} entries (page {}/{})",
                info.start, info.end, info.total, info.page, info.pages
            ),
            Style::default().fg(Color::White),
        ),
    ];

    if ctx.requests.pending() > 0 {
        spans.push(Span::styled(
            format!("  {} request(s) in flight", ctx.requests.pending()),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!("  Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!("  {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_hint(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(
    frame: &mut Frame,
    area: Rect,
    listing: &ListingComponent,
    ctx: &ListingRenderContext,
) {
    let help_spans = if listing.search_mode {
        vec![
            key_hint("Esc", Color::Yellow),
            Span::raw("Done  "),
            key_hint("Backspace", Color::Yellow),
            Span::raw("Delete char  "),
            Span::styled(
                format!("Search: {}", ctx.grid.query()),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        let activate = if ctx.viewport.is_mobile() {
            "Actions "
        } else {
            "Select "
        };
        vec![
            key_hint("q", Color::Yellow),
            Span::raw("Quit "),
            key_hint("Enter", Color::Green),
            Span::raw(activate),
            key_hint("e", Color::Cyan),
            Span::raw("Edit "),
            key_hint("d", Color::Red),
            Span::raw("Delete "),
            key_hint("1-9", Color::Cyan),
            Span::raw("Sort "),
            key_hint("/", Color::Cyan),
            Span::raw("Search "),
            key_hint("n/p", Color::Cyan),
            Span::raw("Page "),
            key_hint("x", Color::Green),
            Span::raw("Export "),
            key_hint("m", Color::Magenta),
            Span::raw("Menu "),
            key_hint("?", Color::White),
            Span::raw("Help"),
        ]
    };

    let paragraph =
        Paragraph::new(Line::from(help_spans)).alignment(ratatui::layout::Alignment::Left);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::action_panel::render_panel;
    use crate::model::context::PageContext;
    use crate::model::table::tests::create_test_table;
    use crate::model::table::ActionPanel;
    use crossterm::event::KeyModifiers;

    fn open_panel_under(table: &mut Table, id: RowId) {
        let record = table.record(id).unwrap().clone();
        let markup = render_panel(&record, &PageContext::default(), ViewportClass::Mobile, 3);
        assert!(table.insert_panel(ActionPanel { owner: id, markup }));
    }

    #[test]
    fn test_navigation_skips_panel_row() {
        let mut table = create_test_table(&[
            ("1", &["Alice", "3", "a"]),
            ("2", &["Bob", "5", "b"]),
            ("3", &["Carol", "1", "c"]),
        ]);
        open_panel_under(&mut table, RowId(0));
        let rows: Vec<&TableRow> = table.rows().iter().collect();

        let mut listing = ListingComponent::new();
        listing.next(&rows);
        assert_eq!(listing.selected, 2);
        listing.previous(&rows);
        assert_eq!(listing.selected, 0);
        listing.previous(&rows);
        assert_eq!(listing.selected, 3);
    }

    #[test]
    fn test_clamp_moves_off_panel_and_past_end() {
        let mut table = create_test_table(&[("1", &["Alice", "3", "a"]), ("2", &["Bob", "5", "b"])]);
        open_panel_under(&mut table, RowId(0));
        let rows: Vec<&TableRow> = table.rows().iter().collect();

        let mut listing = ListingComponent::new();
        listing.selected = 1;
        listing.clamp(&rows);
        assert_eq!(listing.selected, 0);

        listing.selected = 10;
        listing.clamp(&rows);
        assert_eq!(listing.selected, 2);
    }

    #[test]
    fn test_select_row_follows_record() {
        let table = create_test_table(&[("1", &["Alice", "3", "a"]), ("2", &["Bob", "5", "b"])]);
        let rows: Vec<&TableRow> = table.rows().iter().collect();

        let mut listing = ListingComponent::new();
        listing.select_row(RowId(1), &rows);
        assert_eq!(listing.selected_record(&rows).map(|r| r.id), Some(RowId(1)));
    }

    #[test]
    fn test_digit_keys_sort_columns() {
        let mut listing = ListingComponent::new();
        let key = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(listing.handle_key_event(key).unwrap(), Some(Action::SortColumn(1)));
    }

    #[test]
    fn test_search_mode_captures_characters() {
        let mut listing = ListingComponent::new();
        listing.enter_search_mode();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(listing.handle_key_event(key).unwrap(), Some(Action::SearchInput('q')));

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(listing.handle_key_event(esc).unwrap(), Some(Action::ExitSearchMode));
    }

    #[test]
    fn test_mouse_click_resolves_control_before_row() {
        let mut listing = ListingComponent::new();
        listing.hits.rows.push((Rect::new(0, 5, 40, 1), 1));
        listing
            .hits
            .controls
            .push((Rect::new(4, 5, 8, 1), RowId(0), PanelControl::Edit));

        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        assert_eq!(
            listing.handle_mouse_event(click(6, 5)).unwrap(),
            Some(Action::ClickPanelControl(RowId(0), PanelControl::Edit))
        );
        assert_eq!(
            listing.handle_mouse_event(click(20, 5)).unwrap(),
            Some(Action::ClickRow(1))
        );
        assert_eq!(listing.handle_mouse_event(click(20, 9)).unwrap(), None);
    }

    #[test]
    fn test_mouse_click_on_dismiss_control_names_notification() {
        let mut listing = ListingComponent::new();
        listing.hits.dismiss.push((Rect::new(0, 1, 3, 1), 7));
        listing.hits.dismiss.push((Rect::new(0, 2, 3, 1), 9));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            listing.handle_mouse_event(click).unwrap(),
            Some(Action::DismissNotificationId(7))
        );
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("日本語", 4), "日… ");
    }
}
