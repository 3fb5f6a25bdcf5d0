//! Notification banner

use crate::model::notification::{NotificationCenter, NotificationLevel};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Per-notification close control, drawn at the start of its line
const DISMISS_CONTROL: &str = "[x]";

fn level_color(level: NotificationLevel) -> Color {
    match level {
        NotificationLevel::Info => Color::Cyan,
        NotificationLevel::Success => Color::Green,
        NotificationLevel::Danger => Color::Red,
    }
}

/// Render the newest notifications, one per line.
///
/// Returns the area of each line's dismiss control with the notification id.
pub fn render_notifications(
    frame: &mut Frame,
    area: Rect,
    notifications: &NotificationCenter,
) -> Vec<(Rect, u64)> {
    if notifications.is_empty() || area.height == 0 {
        return Vec::new();
    }
    let visible = area.height as usize;
    let skip = notifications.len().saturating_sub(visible);

    let mut controls = Vec::new();
    let lines: Vec<Line> = notifications
        .iter()
        .skip(skip)
        .enumerate()
        .map(|(index, notification)| {
            controls.push((
                Rect::new(
                    area.x,
                    area.y + index as u16,
                    (DISMISS_CONTROL.len() as u16).min(area.width),
                    1,
                ),
                notification.id,
            ));
            let color = level_color(notification.level);
            Line::from(vec![
                Span::styled(DISMISS_CONTROL, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(
                    format!(" {} ", notification.formatted_time()),
                    Style::default().fg(Color::Black).bg(color),
                ),
                Span::raw(" "),
                Span::styled(
                    notification.message.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
    controls
}
