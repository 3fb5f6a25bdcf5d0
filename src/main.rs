//! hourtracker-tui - A terminal front-end for the hour tracker listing
//!
//! Loads a rendered listing page (JSON or YAML) and drives it from the
//! terminal using the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::logging::LoggingConfig;
use crate::model::load_page;
use crate::services::run_request;
use crate::tui::Tui;
use anyhow::{Context, Result};
use crossterm::event::Event;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_PAGE: &str = "page.json";

fn main() -> Result<()> {
    let page_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGE));

    let config = Config::load_or_default();
    let guard = logging::init(&LoggingConfig {
        log_dir: Config::log_dir(),
        default_filter: config.log_filter.clone(),
    })?;

    let page = load_page(&page_path)
        .with_context(|| format!("Failed to load page {}", page_path.display()))?;
    tracing::info!(path = %page_path.display(), "page loaded");

    // Setup terminal
    let mut tui = Tui::new()?;
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, page);
    app.init()?;
    let (width, height) = tui.dimensions()?;
    app.update(Action::Resize(width, height))?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        report_fatal(&err, guard);
        std::process::exit(1);
    }

    if let Some(command) = app.pending_logout.take() {
        tracing::info!("logging out");
        if let Err(err) = run_request(&command) {
            tracing::warn!(error = %err, "logout request failed");
            eprintln!("Logout failed: {}", err);
        }
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Open pages requested by edit, menu or add actions
        if let Some(url) = app.pending_navigation.take() {
            launch_navigation(app, &url);
            continue;
        }

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}

/// Log a fatal error and flush the log file; `exit` would skip the guard's drop
fn report_fatal(err: &anyhow::Error, guard: WorkerGuard) {
    tracing::error!(error = ?err, "event loop failed");
    drop(guard);
    eprintln!("Error: {:?}", err);
}

/// Start the opener for `url`; a detached thread reaps it when it exits
fn spawn_opener(opener: &str, url: &str) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = Command::new(opener)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || child.wait()))
}

/// Hand a URL to the configured opener, falling back to showing it
fn launch_navigation(app: &mut App, url: &str) {
    let opener = app.config.opener_command.trim().to_string();
    if opener.is_empty() {
        app.status_message = Some(format!("Open {}", url));
        return;
    }

    match spawn_opener(&opener, url) {
        Ok(_) => {
            tracing::info!(%url, %opener, "navigation opened");
            app.status_message = Some(format!("Opened {}", url));
        }
        Err(err) => {
            tracing::warn!(%url, %opener, error = %err, "opener failed");
            app.status_message = Some(format!("Open {} ({} failed: {})", url, opener, err));
        }
    }
}
