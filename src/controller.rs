//! Application controller.
//!
//! This module orchestrates the main application loop:
//! - Terminal initialization and cleanup
//! - Event polling and handling
//! - State updates and rendering

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::event::{apply_action, handle_event, poll_event, Action};
use crate::model::AppState;
use crate::ui::{calculate_field_width, calculate_visible_dimensions, render};

/// The main application controller.
pub struct App {
    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: AppState,
    /// Event poll timeout
    tick_rate: Duration,
}

impl App {
    /// Creates a new application with the given state.
    pub fn new(state: AppState) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        // Drop only runs once App exists, so undo raw mode by hand until then
        let terminal = rollback_on_error(Self::enter_terminal(), || {
            let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        Ok(Self {
            terminal,
            state,
            tick_rate: Duration::from_millis(50),
        })
    }

    fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        Ok(Terminal::new(backend)?)
    }

    /// Runs the main application loop.
    pub fn run(&mut self) -> Result<()> {
        info!(layout = %self.state.layout, "editor started");
        self.update_viewport_size()?;

        loop {
            // Render
            self.terminal.draw(|frame| {
                render(frame, &self.state);
            })?;

            // Handle events
            if let Some(event) = poll_event(self.tick_rate) {
                let action = handle_event(event, &self.state.mode, self.state.show_help);
                debug!(?action, "event");

                let resized = matches!(action, Action::Resize(_, _));
                let layout = self.state.layout;
                self.state = apply_action(std::mem::take(&mut self.state), action);

                // Panel sizes depend on both the terminal and the layout
                if resized || layout != self.state.layout {
                    self.update_viewport_size()?;
                }

                if self.state.should_quit {
                    break;
                }
            }
        }

        info!("editor closed");
        Ok(())
    }

    /// Updates the panel sizes based on terminal dimensions.
    fn update_viewport_size(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        let (visible_rows, visible_cols) =
            calculate_visible_dimensions(size.width, size.height, self.state.layout);
        self.state.update_viewport_size(visible_rows, visible_cols);
        self.state
            .update_field_width(calculate_field_width(size.width, size.height));
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

/// Runs `restore` when `result` is an error, then passes the result through.
fn rollback_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// Convenience function to run the editor with a prepared state.
pub fn run_app(state: AppState) -> Result<()> {
    let mut app = App::new(state)?;
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_rollback_runs_on_setup_error() {
        let restored = Cell::new(false);
        let result: Result<()> =
            rollback_on_error(Err(anyhow::anyhow!("no tty")), || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_rollback_skipped_on_success() {
        let restored = Cell::new(false);
        let result = rollback_on_error(Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
