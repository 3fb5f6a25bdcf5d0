//! Component trait shared by the App and its child views
//!
//! Input is turned into an [`Action`] first and applied second. The main
//! loop feeds each Action to `App::update` and keeps going while updates
//! return a follow-up, e.g. Enter on the listing yields `ActivateSelected`,
//! which the App resolves into `ClickRow(selected)` for the panel controller.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

/// A piece of the listing UI
///
/// Only the App overrides every method. Dialogs map keys and draw, while
/// the listing and navbar also map mouse clicks against the areas they
/// recorded during their last draw.
pub trait Component {
    /// One-time setup once the page is loaded
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key press to an Action; state is left untouched
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Map a mouse event to an Action using the last drawn click areas
    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let _ = mouse;
        Ok(None)
    }

    /// Apply an Action, optionally returning the next one in the chain
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render into `area`
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
