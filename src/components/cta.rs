//! Call-to-action button
//!
//! Drawn inline with its label on wide viewports, or as a floating circular
//! button pinned to the bottom-right corner on narrow ones.

use crate::components::layout::floating_button_area;
use crate::model::responsive::CtaStyle;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const FLOATING_WIDTH: u16 = 7;
const FLOATING_HEIGHT: u16 = 3;

fn button_style(style: &CtaStyle) -> Style {
    if style.classes.iter().any(|c| c == "is-primary") {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }
}

/// Draw the button, returning the clickable area.
///
/// `area` is the inline slot, or the whole screen when the button floats.
pub fn render_cta(frame: &mut Frame, area: Rect, style: &CtaStyle, label: &str) -> Rect {
    if style.is_floating() {
        let button = floating_button_area(area, FLOATING_WIDTH, FLOATING_HEIGHT);
        frame.render_widget(Clear, button);
        let paragraph = Paragraph::new(Span::styled(
            "+",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Green)),
        );
        frame.render_widget(paragraph, button);
        return button;
    }

    let text = if style.label_visible {
        format!("[+ {}]", label)
    } else {
        "[+]".to_string()
    };
    let paragraph = Paragraph::new(Span::styled(text, button_style(style))).alignment(Alignment::Right);
    frame.render_widget(paragraph, area);
    area
}
