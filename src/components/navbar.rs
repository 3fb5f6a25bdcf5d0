//! Navbar component
//!
//! Top line of the screen: menu toggle, page title and the account dropdown.
//! The menu and dropdown open as overlays below it.

use crate::action::Action;
use crate::component::Component;
use crate::components::listing::{contains, ListingRenderContext};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const MENU_TOGGLE: &str = " ☰ Menu ";
const LOGOUT_LABEL: &str = "Log out";

#[derive(Debug, Default)]
pub struct NavbarComponent {
    pub menu_open: bool,
    pub dropdown_open: bool,
    pub selected_link: usize,
    menu_toggle: Option<Rect>,
    dropdown_toggle: Option<Rect>,
    links: Vec<(Rect, usize)>,
    logout: Option<Rect>,
}

impl NavbarComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.dropdown_open = false;
        self.selected_link = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
        self.menu_open = false;
    }

    pub fn close_all(&mut self) {
        self.menu_open = false;
        self.dropdown_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.menu_open || self.dropdown_open
    }

    pub fn next_link(&mut self, count: usize) {
        if count > 0 {
            self.selected_link = (self.selected_link + 1) % count;
        }
    }

    pub fn previous_link(&mut self, count: usize) {
        if count > 0 {
            self.selected_link = (self.selected_link + count - 1) % count;
        }
    }
}

impl Component for NavbarComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = if self.menu_open {
            match key.code {
                KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => Some(Action::CloseMenu),
                KeyCode::Char('j') | KeyCode::Down => Some(Action::MenuDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Action::MenuUp),
                KeyCode::Enter => Some(Action::FollowMenuLink),
                _ => None,
            }
        } else if self.dropdown_open {
            match key.code {
                KeyCode::Esc | KeyCode::Char('u') | KeyCode::Char('q') => {
                    Some(Action::ToggleDropdown)
                }
                KeyCode::Enter | KeyCode::Char('o') => Some(Action::Logout),
                _ => None,
            }
        } else {
            None
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return Ok(None);
        };
        let (x, y) = (mouse.column, mouse.row);

        if let Some((_, index)) = self.links.iter().find(|(rect, _)| contains(*rect, x, y)) {
            self.selected_link = *index;
            return Ok(Some(Action::FollowMenuLink));
        }
        if self.logout.is_some_and(|rect| contains(rect, x, y)) {
            return Ok(Some(Action::Logout));
        }
        if self.menu_toggle.is_some_and(|rect| contains(rect, x, y)) {
            return Ok(Some(Action::ToggleMenu));
        }
        if self.dropdown_toggle.is_some_and(|rect| contains(rect, x, y)) {
            return Ok(Some(Action::ToggleDropdown));
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_navbar which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

fn account_label(ctx: &ListingRenderContext) -> String {
    let role = if ctx.context.privilege().is_elevated() {
        "Staff"
    } else {
        "Account"
    };
    format!(" {} ▾ ", role)
}

/// Draw the navbar line
pub fn draw_navbar(
    frame: &mut Frame,
    area: Rect,
    navbar: &mut NavbarComponent,
    ctx: &ListingRenderContext,
) {
    let toggle_style = if navbar.menu_open {
        Style::default().fg(Color::Black).bg(Color::Magenta)
    } else {
        Style::default().fg(Color::Magenta)
    };
    let account = account_label(ctx);
    let toggle_width = MENU_TOGGLE.chars().count() as u16;
    let account_width = (account.chars().count() as u16).min(area.width);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(MENU_TOGGLE, toggle_style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(
            ctx.title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(title, area);

    let account_area = Rect::new(
        area.x + area.width.saturating_sub(account_width + 1),
        area.y,
        account_width,
        1,
    );
    let account_style = if navbar.dropdown_open {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(Paragraph::new(Span::styled(account, account_style)), account_area);

    navbar.menu_toggle = Some(Rect::new(area.x, area.y, toggle_width.min(area.width), 1));
    navbar.dropdown_toggle = Some(account_area);
}

/// Draw the open menu or dropdown on top of the listing
pub fn draw_navbar_overlays(
    frame: &mut Frame,
    area: Rect,
    navbar: &mut NavbarComponent,
    ctx: &ListingRenderContext,
) {
    navbar.links.clear();
    navbar.logout = None;

    if navbar.menu_open {
        let height = (ctx.menu.len() as u16 + 2).max(3).min(area.height.saturating_sub(1));
        let width = ctx
            .menu
            .iter()
            .map(|link| link.label.chars().count() as u16 + 6)
            .max()
            .unwrap_or(16)
            .max(16)
            .min(area.width);
        let menu_area = Rect::new(area.x, area.y + 1, width, height);
        frame.render_widget(Clear, menu_area);

        let items: Vec<ListItem> = if ctx.menu.is_empty() {
            vec![ListItem::new(Span::styled(
                "No links",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            ctx.menu
                .iter()
                .map(|link| ListItem::new(Span::raw(link.label.clone())))
                .collect()
        };
        let mut state = ListState::default();
        if !ctx.menu.is_empty() {
            state.select(Some(navbar.selected_link.min(ctx.menu.len() - 1)));
        }
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Menu "),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Magenta)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, menu_area, &mut state);

        for index in 0..ctx.menu.len() {
            let y = menu_area.y + 1 + index as u16;
            if y + 1 >= menu_area.y + menu_area.height {
                break;
            }
            navbar
                .links
                .push((Rect::new(menu_area.x + 1, y, width.saturating_sub(2), 1), index));
        }
    }

    if navbar.dropdown_open {
        let width = 14u16.min(area.width);
        let dropdown_area = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1,
            width,
            3,
        );
        frame.render_widget(Clear, dropdown_area);
        let paragraph = Paragraph::new(Span::styled(
            LOGOUT_LABEL,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(paragraph, dropdown_area);
        navbar.logout = Some(Rect::new(
            dropdown_area.x + 1,
            dropdown_area.y + 1,
            width.saturating_sub(2),
            1,
        ));
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
    fn test_menu_and_dropdown_are_exclusive() {
        let mut navbar = NavbarComponent::new();
        navbar.toggle_menu();
        assert!(navbar.menu_open);

        navbar.toggle_dropdown();
        assert!(navbar.dropdown_open);
        assert!(!navbar.menu_open);

        navbar.close_all();
        assert!(!navbar.is_open());
    }

    #[test]
    fn test_menu_keys() {
        let mut navbar = NavbarComponent::new();
        assert_eq!(navbar.handle_key_event(key(KeyCode::Enter)).unwrap(), None);

        navbar.toggle_menu();
        assert_eq!(
            navbar.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::FollowMenuLink)
        );
        assert_eq!(
            navbar.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseMenu)
        );
    }

    #[test]
    fn test_dropdown_enter_logs_out() {
        let mut navbar = NavbarComponent::new();
        navbar.toggle_dropdown();
        assert_eq!(
            navbar.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::Logout)
        );
    }

    #[test]
    fn test_link_selection_wraps() {
        let mut navbar = NavbarComponent::new();
        navbar.previous_link(3);
        assert_eq!(navbar.selected_link, 2);
        navbar.next_link(3);
        assert_eq!(navbar.selected_link, 0);
        navbar.next_link(0);
        assert_eq!(navbar.selected_link, 0);
    }

    #[test]
    fn test_link_click_follows_link() {
        let mut navbar = NavbarComponent::new();
        navbar.links.push((Rect::new(1, 2, 10, 1), 1));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            navbar.handle_mouse_event(click).unwrap(),
            Some(Action::FollowMenuLink)
        );
        assert_eq!(navbar.selected_link, 1);
    }
}
