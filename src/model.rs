//! Data model for the sequence editor.
//!
//! This module contains all data structures for representing:
//! - Cursor and viewport state of the text buffers
//! - Layout, focus and input mode
//! - Application state, including the request/response cycle that reads a
//!   buffer, applies an operation and writes the result back

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info};

use crate::buffer::TextBuffer;
use crate::ops::{line_count, Affixes, Operation};

/// The viewport defines what portion of a buffer is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible line
    pub first_row: usize,
    /// Index of the first visible column
    pub first_col: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Number of visible columns
    pub visible_cols: usize,
}

impl Viewport {
    /// Creates a new viewport.
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            first_row: 0,
            first_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    /// Updates the viewport dimensions.
    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) {
        self.visible_rows = visible_rows;
        self.visible_cols = visible_cols;
    }
}

/// A cursor position inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Line index
    pub row: usize,
    /// Character index within the line
    pub col: usize,
}

impl Cursor {
    /// Creates a new cursor at origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor at a specific position.
    pub fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Where operation results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Separate input and output buffers
    #[default]
    Split,
    /// Results overwrite the input buffer
    InPlace,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Split => write!(f, "split"),
            Layout::InPlace => write!(f, "in-place"),
        }
    }
}

/// Error returned when a layout name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown layout: {0}")]
pub struct ParseLayoutError(pub String);

impl FromStr for Layout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(Layout::Split),
            "inplace" | "in-place" => Ok(Layout::InPlace),
            other => Err(ParseLayoutError(other.to_string())),
        }
    }
}

/// The field receiving typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Output,
    Head,
    Tail,
}

impl Focus {
    /// Next field in Tab order for the given layout.
    pub fn next(self, layout: Layout) -> Focus {
        match (self, layout) {
            (Focus::Input, Layout::Split) => Focus::Output,
            (Focus::Input, Layout::InPlace) => Focus::Head,
            (Focus::Output, _) => Focus::Head,
            (Focus::Head, _) => Focus::Tail,
            (Focus::Tail, _) => Focus::Input,
        }
    }

    /// Previous field in Tab order for the given layout.
    pub fn previous(self, layout: Layout) -> Focus {
        match (self, layout) {
            (Focus::Input, _) => Focus::Tail,
            (Focus::Output, _) => Focus::Input,
            (Focus::Head, Layout::Split) => Focus::Output,
            (Focus::Head, Layout::InPlace) => Focus::Input,
            (Focus::Tail, _) => Focus::Head,
        }
    }
}

/// Application mode for handling different input states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Keys edit the focused field
    #[default]
    Insert,
    /// Single keys trigger operations
    Normal,
    /// Command input mode (after pressing ':')
    Command(String),
}

/// The complete application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Sequence input box
    pub input: TextBuffer,
    /// Sequence output box (split layout only)
    pub output: TextBuffer,
    /// Text prepended by "add head"
    pub head: TextBuffer,
    /// Text appended by "add tail"
    pub tail: TextBuffer,
    pub layout: Layout,
    pub focus: Focus,
    pub mode: AppMode,
    /// Whether the help overlay is shown
    pub show_help: bool,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl AppState {
    /// Creates a new application state with the given layout and empty buffers.
    pub fn new(layout: Layout) -> Self {
        Self {
            input: TextBuffer::new(),
            output: TextBuffer::new(),
            head: TextBuffer::single_line(),
            tail: TextBuffer::single_line(),
            layout,
            focus: Focus::Input,
            mode: AppMode::Insert,
            show_help: false,
            should_quit: false,
            status_message: None,
        }
    }

    /// Builder-style preload of the input buffer.
    pub fn with_input(mut self, text: &str) -> Self {
        self.input.set_text(text);
        self
    }

    /// Builder-style preload of the head/tail fields.
    pub fn with_affixes(mut self, head: &str, tail: &str) -> Self {
        self.head.set_text(head);
        self.tail.set_text(tail);
        self
    }

    /// Returns the buffer that receives typed text.
    pub fn focused_mut(&mut self) -> &mut TextBuffer {
        match self.focus {
            Focus::Input => &mut self.input,
            Focus::Output => &mut self.output,
            Focus::Head => &mut self.head,
            Focus::Tail => &mut self.tail,
        }
    }

    /// Updates the text panel sizes based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.input.resize(rows, cols);
        self.output.resize(rows, cols);
    }

    /// Updates the width of the head/tail fields.
    pub fn update_field_width(&mut self, cols: usize) {
        self.head.resize(1, cols);
        self.tail.resize(1, cols);
    }

    /// Reads the input buffer, applies `op` to every line and writes the
    /// result to the output buffer (split) or back into the input (in place).
    pub fn apply_operation(&mut self, op: Operation) {
        let source = self.input.text();
        let head = self.head.text();
        let tail = self.tail.text();
        let result = op.apply(&source, Affixes::new(&head, &tail));
        let lines = line_count(&source);

        match self.layout {
            Layout::Split => self.output.set_text(&result),
            Layout::InPlace => self.input.set_text(&result),
        }

        info!(operation = %op, lines, layout = %self.layout, "applied operation");
        self.status_message = Some(format!("{}: {} line(s)", op.label(), lines));
    }

    /// Copies the output buffer back into the input buffer.
    pub fn exchange(&mut self) {
        if self.layout == Layout::InPlace {
            self.status_message = Some("Nothing to exchange in in-place layout".to_string());
            return;
        }
        let text = self.output.text();
        self.input.set_text(text.trim_end());
        debug!(bytes = text.len(), "copied output into input");
        self.status_message = Some("Output copied to input".to_string());
    }

    /// Empties the input and output buffers.
    pub fn clear_buffers(&mut self) {
        self.input.clear();
        self.output.clear();
        self.status_message = Some("Cleared".to_string());
    }

    /// Switches the result placement.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        if layout == Layout::InPlace && self.focus == Focus::Output {
            self.focus = Focus::Input;
        }
        info!(%layout, "layout changed");
        self.status_message = Some(format!("Layout: {}", layout));
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.layout);
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous(self.layout);
    }

    /// Enters normal mode.
    pub fn enter_normal_mode(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Enters insert mode.
    pub fn enter_insert_mode(&mut self) {
        self.mode = AppMode::Insert;
    }

    /// Enters command mode.
    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command(String::new());
    }

    /// Handles a character input in command mode.
    pub fn command_input(&mut self, c: char) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            cmd.push(c);
        }
    }

    /// Handles backspace in command mode.
    pub fn command_backspace(&mut self) {
        if let AppMode::Command(ref mut cmd) = self.mode {
            if cmd.pop().is_none() {
                self.mode = AppMode::Normal;
            }
        }
    }

    /// Executes the current command.
    pub fn execute_command(&mut self) {
        let cmd = match &self.mode {
            AppMode::Command(cmd) => cmd.clone(),
            _ => return,
        };
        self.mode = AppMode::Normal;

        let (name, arg) = match cmd.split_once(' ') {
            Some((name, arg)) => (name, Some(arg)),
            None => (cmd.as_str(), None),
        };

        match (name, arg) {
            ("q" | "quit", _) => self.should_quit = true,
            ("h" | "help", _) => self.show_help = true,
            ("x" | "exchange", _) => self.exchange(),
            ("clear", _) => self.clear_buffers(),
            ("head", Some(text)) => {
                self.head.set_text(text);
                self.apply_operation(Operation::AddHead);
            }
            ("tail", Some(text)) => {
                self.tail.set_text(text);
                self.apply_operation(Operation::AddTail);
            }
            ("layout", Some(arg)) => match arg.trim().parse::<Layout>() {
                Ok(layout) => self.set_layout(layout),
                Err(e) => self.status_message = Some(e.to_string()),
            },
            (name, _) => match name.parse::<Operation>() {
                Ok(op) => self.apply_operation(op),
                Err(_) => self.status_message = Some(format!("Unknown command: {}", cmd)),
            },
        }
    }

    /// Cancels command mode and returns to normal mode.
    pub fn cancel_command(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Hides the help overlay.
    pub fn dismiss_help(&mut self) {
        self.show_help = false;
    }
}
