//! Terminal ownership for the listing
//!
//! Owns the alternate screen and mouse capture (row, header and panel
//! clicks all arrive as mouse events), and polls crossterm at the tick
//! rate the App uses to drain finished delete requests and expire
//! notifications.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

/// Poll interval between ticks when no input arrives
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(100);

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// How long `next_event` waits before reporting a tick
    pub tick_rate: Duration,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            tick_rate: DEFAULT_TICK_RATE,
        })
    }

    /// Take over the terminal: raw mode, alternate screen, mouse capture
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Hand the terminal back.
    ///
    /// Also runs on Drop, so a failing event loop still restores the
    /// terminal before the logout request runs.
    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, cursor::Show)?;
        Ok(())
    }

    /// Wait up to one tick for input; `None` means the tick elapsed
    pub fn next_event(&self) -> Result<Option<Event>> {
        if !event::poll(self.tick_rate)? {
            return Ok(None);
        }
        match event::read()? {
            // release/repeat events would fire row actions twice on Windows
            Event::Key(key) if key.kind != KeyEventKind::Press => Ok(None),
            event => Ok(Some(event)),
        }
    }

    /// Current terminal size as (columns, rows), used for the first viewport class
    pub fn dimensions(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
