//! Keyboard event handling.
//!
//! Input is modal:
//! - Insert mode: keys edit the focused field, `Tab` moves focus,
//!   `Esc` switches to normal mode
//! - Normal mode: single keys run operations
//!   - `u`: upper, `l`: lower, `r`: reverse
//!   - `c`: complement, `R`: reverse complement
//!   - `H`: add head, `T`: add tail, `x`: copy output to input
//!   - `i` or `Enter`: back to insert mode
//!   - `?`: help, `q`: quit, `:` command mode
//! - Command mode: `:q`, `:help`, `:upper`, `:revcomp`, `:head <text>`, ...
//!
//! Function keys act as the button row in every mode (`F1` help through
//! `F9` exchange).

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState};
use crate::ops::Operation;

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Resize event (terminal resized)
    Resize(u16, u16),
    /// Run an operation on the input buffer
    Apply(Operation),
    /// Copy the output buffer into the input buffer
    Exchange,
    /// Show the help overlay
    ShowHelp,
    /// Dismiss the help overlay
    DismissHelp,
    EnterNormalMode,
    EnterInsertMode,
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Type a character into the focused field
    InsertChar(char),
    /// Insert pasted text into the focused field
    InsertText(String),
    Newline,
    Backspace,
    Delete,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Home,
    End,
    FocusNext,
    FocusPrevious,
}

/// Polls for terminal events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key_event(key_event, mode, show_help)
        }
        Event::Paste(text) if *mode == AppMode::Insert && !show_help => Action::InsertText(text),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool) -> Action {
    // Ctrl+C quits from anywhere
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    if let Some(action) = handle_function_key(key) {
        return action;
    }

    match mode {
        AppMode::Insert => handle_insert_mode(key),
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Maps the button row to function keys.
fn handle_function_key(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::F(1) => Action::ShowHelp,
        KeyCode::F(2) => Action::Apply(Operation::Upper),
        KeyCode::F(3) => Action::Apply(Operation::Lower),
        KeyCode::F(4) => Action::Apply(Operation::Reverse),
        KeyCode::F(5) => Action::Apply(Operation::Complement),
        KeyCode::F(6) => Action::Apply(Operation::ReverseComplement),
        KeyCode::F(7) => Action::Apply(Operation::AddHead),
        KeyCode::F(8) => Action::Apply(Operation::AddTail),
        KeyCode::F(9) => Action::Exchange,
        _ => return None,
    };
    Some(action)
}

/// Handles key events in insert mode (text editing).
fn handle_insert_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::EnterNormalMode,
        KeyCode::Enter => Action::Newline,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Delete => Action::Delete,
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Home => Action::Home,
        KeyCode::End => Action::End,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrevious,
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Action::None
        }
        KeyCode::Char(c) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Handles key events in normal mode (one key per operation).
fn handle_normal_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('u') => Action::Apply(Operation::Upper),
        KeyCode::Char('l') => Action::Apply(Operation::Lower),
        KeyCode::Char('r') => Action::Apply(Operation::Reverse),
        KeyCode::Char('c') => Action::Apply(Operation::Complement),
        KeyCode::Char('R') => Action::Apply(Operation::ReverseComplement),
        KeyCode::Char('H') => Action::Apply(Operation::AddHead),
        KeyCode::Char('T') => Action::Apply(Operation::AddTail),
        KeyCode::Char('x') => Action::Exchange,

        KeyCode::Char('i') | KeyCode::Enter => Action::EnterInsertMode,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrevious,

        // Arrow keys still move the cursor of the focused field
        KeyCode::Up => Action::MoveUp,
        KeyCode::Down => Action::MoveDown,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,

        KeyCode::Char(':') => Action::EnterCommandMode,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('q') => Action::Quit,

        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state and returns the next state.
pub fn apply_action(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
        Action::Apply(op) => {
            state.apply_operation(op);
        }
        Action::Exchange => {
            state.exchange();
        }
        Action::ShowHelp => {
            state.show_help = true;
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::EnterNormalMode => {
            state.enter_normal_mode();
        }
        Action::EnterInsertMode => {
            state.enter_insert_mode();
        }
        Action::EnterCommandMode => {
            state.enter_command_mode();
        }
        Action::CommandChar(c) => {
            state.command_input(c);
        }
        Action::ExecuteCommand => {
            state.execute_command();
        }
        Action::CancelCommand => {
            state.cancel_command();
        }
        Action::CommandBackspace => {
            state.command_backspace();
        }
        Action::InsertChar(c) => state.focused_mut().insert_char(c),
        Action::InsertText(text) => state.focused_mut().insert_str(&text),
        Action::Newline => state.focused_mut().newline(),
        Action::Backspace => state.focused_mut().backspace(),
        Action::Delete => state.focused_mut().delete(),
        Action::MoveUp => state.focused_mut().move_up(),
        Action::MoveDown => state.focused_mut().move_down(),
        Action::MoveLeft => state.focused_mut().move_left(),
        Action::MoveRight => state.focused_mut().move_right(),
        Action::Home => state.focused_mut().home(),
        Action::End => state.focused_mut().end(),
        Action::FocusNext => {
            state.focus_next();
        }
        Action::FocusPrevious => {
            state.focus_previous();
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Focus, Layout};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn feed(mut state: AppState, events: Vec<Event>) -> AppState {
        for event in events {
            let action = handle_event(event, &state.mode, state.show_help);
            state = apply_action(state, action);
        }
        state
    }

    #[test]
    fn test_insert_mode_typing() {
        let mode = AppMode::Insert;
        assert_eq!(handle_key_event(key(KeyCode::Char('A')), &mode, false), Action::InsertChar('A'));
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mode, false), Action::InsertChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mode, false), Action::Newline);
        assert_eq!(handle_key_event(key(KeyCode::Tab), &mode, false), Action::FocusNext);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode, false), Action::EnterNormalMode);
    }

    #[test]
    fn test_normal_mode_operations() {
        let mode = AppMode::Normal;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c')), &mode, false),
            Action::Apply(Operation::Complement)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('R')), &mode, false),
            Action::Apply(Operation::ReverseComplement)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &mode, false), Action::Exchange);
        assert_eq!(handle_key_event(key(KeyCode::Char('i')), &mode, false), Action::EnterInsertMode);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mode, false), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char(':')), &mode, false), Action::EnterCommandMode);
    }

    #[test]
    fn test_function_keys_in_every_mode() {
        for mode in [AppMode::Insert, AppMode::Normal, AppMode::Command(String::new())] {
            assert_eq!(
                handle_key_event(key(KeyCode::F(6)), &mode, false),
                Action::Apply(Operation::ReverseComplement)
            );
            assert_eq!(handle_key_event(key(KeyCode::F(9)), &mode, false), Action::Exchange);
        }
    }

    #[test]
    fn test_command_mode_input() {
        let mode = AppMode::Command(String::new());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &mode, false), Action::CommandChar('q'));
        assert_eq!(handle_key_event(key(KeyCode::Enter), &mode, false), Action::ExecuteCommand);
        assert_eq!(handle_key_event(key(KeyCode::Esc), &mode, false), Action::CancelCommand);
    }

    #[test]
    fn test_ctrl_c_quit() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, &AppMode::Insert, false), Action::Quit);
        assert_eq!(handle_key_event(ctrl_c, &AppMode::Normal, true), Action::Quit);
    }

    #[test]
    fn test_dismiss_help() {
        let mode = AppMode::Normal;
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), &mode, true), Action::DismissHelp);
        assert_eq!(handle_key_event(key(KeyCode::F(5)), &mode, true), Action::DismissHelp);
    }

    #[test]
    fn test_paste_only_in_insert_mode() {
        let paste = Event::Paste("ATG\nCCA".to_string());
        assert_eq!(
            handle_event(paste.clone(), &AppMode::Insert, false),
            Action::InsertText("ATG\nCCA".to_string())
        );
        assert_eq!(handle_event(paste, &AppMode::Normal, false), Action::None);
    }

    #[test]
    fn test_paste_then_add_head() {
        let state = AppState::new(Layout::Split);
        let state = feed(
            state,
            vec![
                Event::Paste("ATG\nCCA\n".to_string()),
                Event::Key(key(KeyCode::Tab)),
                Event::Key(key(KeyCode::Tab)),
                Event::Key(key(KeyCode::Char('X'))),
                Event::Key(key(KeyCode::Char('X'))),
                Event::Key(key(KeyCode::F(7))),
            ],
        );
        assert_eq!(state.focus, Focus::Head);
        assert_eq!(state.head.text(), "XX");
        assert_eq!(state.output.text(), "XXATG\nXXCCA");
    }

    #[test]
    fn test_in_place_reverse_complement() {
        let state = AppState::new(Layout::InPlace);
        let state = feed(
            state,
            vec![
                Event::Paste("ATGC\nAAAC".to_string()),
                Event::Key(key(KeyCode::Esc)),
                Event::Key(key(KeyCode::Char('R'))),
            ],
        );
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.input.text(), "GCAT\nGTTT");
    }

    #[test]
    fn test_command_line_round_trip() {
        let state = AppState::new(Layout::Split).with_input("atgc");
        let mut events = vec![Event::Key(key(KeyCode::Esc)), Event::Key(key(KeyCode::Char(':')))];
        events.extend("upper".chars().map(|c| Event::Key(key(KeyCode::Char(c)))));
        events.push(Event::Key(key(KeyCode::Enter)));
        let state = feed(state, events);
        assert_eq!(state.output.text(), "ATGC");
        assert_eq!(state.mode, AppMode::Normal);
    }
}
