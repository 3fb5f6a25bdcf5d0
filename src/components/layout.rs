//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Listing screen layout areas
pub struct ListingLayout {
    pub navbar: Rect,
    pub notifications: Option<Rect>,
    pub notice: Option<Rect>,
    pub controls: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Grid control bar areas: page length, export button, search box
pub struct ControlsLayout {
    pub length: Rect,
    pub export: Rect,
    pub search: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = (area.width.saturating_sub(width)) / 2;
    let popup_y = (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Floating call-to-action area, pinned to the bottom-right corner
pub fn floating_button_area(area: Rect, width: u16, height: u16) -> Rect {
    let margin_x = 3;
    let margin_y = 2;
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + area.width.saturating_sub(width + margin_x),
        area.y + area.height.saturating_sub(height + margin_y),
        width,
        height,
    )
}

/// Calculate listing screen layout
pub fn calculate_listing_layout(
    area: Rect,
    notification_lines: u16,
    show_notice: bool,
) -> ListingLayout {
    let mut constraints = vec![Constraint::Length(1)];
    if notification_lines > 0 {
        constraints.push(Constraint::Length(notification_lines));
    }
    if show_notice {
        constraints.push(Constraint::Length(3));
    }
    constraints.extend([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut index = 0;
    let mut next = || {
        let rect = chunks[index];
        index += 1;
        rect
    };

    let navbar = next();
    let notifications = if notification_lines > 0 { Some(next()) } else { None };
    let notice = if show_notice { Some(next()) } else { None };

    ListingLayout {
        navbar,
        notifications,
        notice,
        controls: next(),
        table: next(),
        status: next(),
        help: next(),
    }
}

/// Split the control bar: two narrow cells for page length and export,
/// the rest for the search box
pub fn calculate_controls_layout(area: Rect) -> ControlsLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18),
            Constraint::Length(14),
            Constraint::Min(10),
        ])
        .split(area);

    ControlsLayout {
        length: chunks[0],
        export: chunks[1],
        search: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_layout_without_overlays() {
        let layout = calculate_listing_layout(Rect::new(0, 0, 100, 40), 0, false);

        assert!(layout.notifications.is_none());
        assert!(layout.notice.is_none());
        assert_eq!(layout.navbar.height, 1);
        assert_eq!(layout.controls.y, 1);
        assert_eq!(layout.table.y, 4);
        assert_eq!(layout.help.y, 39);
    }

    #[test]
    fn test_listing_layout_with_notice_and_notifications() {
        let layout = calculate_listing_layout(Rect::new(0, 0, 100, 40), 2, true);

        assert_eq!(layout.notifications.map(|r| (r.y, r.height)), Some((1, 2)));
        assert_eq!(layout.notice.map(|r| (r.y, r.height)), Some((3, 3)));
        assert_eq!(layout.controls.y, 6);
    }

    #[test]
    fn test_controls_search_takes_remaining_width() {
        let layout = calculate_controls_layout(Rect::new(0, 0, 80, 3));

        assert_eq!(layout.length.width, 18);
        assert_eq!(layout.export.width, 14);
        assert_eq!(layout.search.width, 48);
    }

    #[test]
    fn test_floating_button_stays_inside_area() {
        let area = Rect::new(0, 0, 60, 20);
        let button = floating_button_area(area, 7, 3);

        assert_eq!(button.x + button.width + 3, 60);
        assert_eq!(button.y + button.height + 2, 20);
    }
}
