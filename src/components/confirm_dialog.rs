//! Confirmation dialog component
//!
//! Used for quitting and for deleting a record. `y`/Enter confirms,
//! `n`/Esc cancels.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::action_panel::DELETE_CONFIRMATION;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Confirmation dialog
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    title: String,
    message: String,
    detail: Option<String>,
    confirm_action: Action,
    accent: Color,
}

impl ConfirmDialog {
    pub fn quit() -> Self {
        Self {
            title: " Quit? ".to_string(),
            message: "Are you sure you want to quit?".to_string(),
            detail: None,
            confirm_action: Action::ForceQuit,
            accent: Color::Yellow,
        }
    }

    /// Delete confirmation; `summary` identifies the record
    pub fn delete(summary: &str) -> Self {
        Self {
            title: " Delete entry ".to_string(),
            message: DELETE_CONFIRMATION.to_string(),
            detail: Some(summary.to_string()),
            confirm_action: Action::ConfirmModal,
            accent: Color::Red,
        }
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(self.confirm_action.clone())
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let width = self
            .detail
            .as_ref()
            .map(|detail| detail.chars().count() as u16 + 6)
            .unwrap_or(0)
            .clamp(40, area.width.max(40));
        let popup_area = centered_popup(area, width, 8);

        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        match &self.detail {
            Some(detail) => content.push(Line::from(Span::styled(
                detail.clone(),
                Style::default().fg(Color::Cyan),
            ))),
            None => content.push(Line::from("")),
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " y ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Yes  "),
            Span::styled(
                " n/Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("No, cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent))
                    .title(self.title.clone())
                    .title_style(
                        Style::default()
                            .fg(self.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_confirms_with_force_quit() {
        let mut dialog = ConfirmDialog::quit();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('y'))).unwrap(),
            Some(Action::ForceQuit)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }

    #[test]
    fn test_delete_asks_the_standard_question() {
        let mut dialog = ConfirmDialog::delete("Alice · 3");
        assert_eq!(dialog.message, DELETE_CONFIRMATION);
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::ConfirmModal)
        );
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('x'))).unwrap(), None);
    }
}
