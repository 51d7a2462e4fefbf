//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Input box, plus an output box in the split layout
//! - Colored nucleotide display
//! - Head/tail fields and the button row
//! - Status bar with mode, message and cursor position
//! - Help overlay

use ratatui::{
    layout::{Constraint, Direction, Layout as TuiLayout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthChar;

use crate::buffer::TextBuffer;
use crate::model::{AppMode, AppState, Focus, Layout};
use crate::ops::Operation;

/// Height of the version line.
const TITLE_HEIGHT: u16 = 1;
/// Height of the head/tail row (one line plus borders).
const AFFIX_HEIGHT: u16 = 3;
/// Height of the button row.
const BUTTON_BAR_HEIGHT: u16 = 1;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Width of the help overlay.
const HELP_WIDTH: u16 = 60;

const HELP_TEXT: &[&str] = &[
    "Paste or type one sequence per line in the input box. Every operation strips trailing whitespace, then works on each line independently.",
    "",
    "F2 / u   upper case          F3 / l   lower case",
    "F4 / r   reverse             F5 / c   complement",
    "F6 / R   reverse complement  F9 / x   output -> input",
    "F7 / H   add head            F8 / T   add tail",
    "",
    "Esc leaves insert mode; the single-letter keys work in normal mode. Press i to type again, Tab to move between fields.",
    "",
    "Commands: :q  :upper  :lower  :rev  :comp  :revcomp  :head TEXT  :tail TEXT  :x  :clear  :layout split|inplace",
    "",
    "Complement pairs A-T and G-C in both cases; other characters are left unchanged.",
];

/// Color scheme for sequence symbols.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;
}

/// DNA nucleotide color scheme.
pub struct DnaColorScheme;

impl ColorScheme for DnaColorScheme {
    fn get_color(&self, c: char) -> Color {
        match c.to_ascii_uppercase() {
            'A' => Color::Red,
            'C' => Color::Green,
            'G' => Color::Yellow,
            'T' => Color::Blue,
            _ => Color::Gray,
        }
    }
}

/// Screen regions of the main layout.
struct Areas {
    title: Rect,
    input: Rect,
    output: Option<Rect>,
    head: Rect,
    tail: Rect,
    buttons: Rect,
    status: Rect,
}

fn split_areas(area: Rect, layout: Layout) -> Areas {
    let rows = TuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(AFFIX_HEIGHT),
            Constraint::Length(BUTTON_BAR_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    let (input, output) = match layout {
        Layout::Split => {
            let cols = TuiLayout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);
            (cols[0], Some(cols[1]))
        }
        Layout::InPlace => (rows[1], None),
    };

    let affixes = TuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    Areas {
        title: rows[0],
        input,
        output,
        head: affixes[0],
        tail: affixes[1],
        buttons: rows[3],
        status: rows[4],
    }
}

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState) {
    let areas = split_areas(frame.area(), state.layout);

    render_title(frame, areas.title);

    let input_title = match state.layout {
        Layout::Split => "Sequence input",
        Layout::InPlace => "Sequences",
    };
    render_text_panel(frame, state, &state.input, Focus::Input, input_title, areas.input);
    if let Some(output_area) = areas.output {
        render_text_panel(frame, state, &state.output, Focus::Output, "Sequence output", output_area);
    }

    render_field(frame, state, &state.head, Focus::Head, "Head", areas.head);
    render_field(frame, state, &state.tail, Focus::Tail, "Tail", areas.tail);
    render_button_bar(frame, state.layout, areas.buttons);
    render_status_bar(frame, state, areas.status);

    if state.show_help {
        render_help(frame);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("Tailorbird", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" v{}", env!("CARGO_PKG_VERSION"))),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn focused_block(state: &AppState, field: Focus, title: String) -> Block<'static> {
    let style = if state.focus == field {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).title(title).border_style(style)
}

/// Places the terminal cursor when `field` is focused in insert mode.
fn place_cursor(frame: &mut Frame, state: &AppState, buffer: &TextBuffer, field: Focus, inner: Rect) {
    if state.focus != field || state.mode != AppMode::Insert || state.show_help {
        return;
    }
    let vp = buffer.viewport();
    let x = buffer.cursor_display_col().saturating_sub(vp.first_col) as u16;
    let y = buffer.cursor().row.saturating_sub(vp.first_row) as u16;
    if x < inner.width && y < inner.height {
        frame.set_cursor_position(Position::new(inner.x + x, inner.y + y));
    }
}

/// Characters of `line` that fit in `width` cells starting at cell `first_col`.
///
/// A wide character cut by either edge is left out.
fn visible_chars(line: &str, first_col: usize, width: usize) -> Vec<char> {
    let mut x = 0;
    let mut visible = Vec::new();
    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if x >= first_col && x + w <= first_col + width {
            visible.push(c);
        }
        x += w;
        if x >= first_col + width {
            break;
        }
    }
    visible
}

/// Renders a multi-line buffer with colored nucleotides.
fn render_text_panel(
    frame: &mut Frame,
    state: &AppState,
    buffer: &TextBuffer,
    field: Focus,
    title: &str,
    area: Rect,
) {
    let color_scheme = DnaColorScheme;
    let vp = buffer.viewport();
    let visible_rows = area.height.saturating_sub(2) as usize;
    let visible_cols = area.width.saturating_sub(2) as usize;

    let lines: Vec<Line> = buffer
        .lines()
        .iter()
        .skip(vp.first_row)
        .take(visible_rows)
        .map(|line| {
            let spans: Vec<Span> = visible_chars(line, vp.first_col, visible_cols)
                .into_iter()
                .map(|c| Span::styled(c.to_string(), Style::default().fg(color_scheme.get_color(c))))
                .collect();
            Line::from(spans)
        })
        .collect();

    let cursor = buffer.cursor();
    let title = format!(
        "{} [Line {}/{} | Col {}]",
        title,
        cursor.row + 1,
        buffer.line_count(),
        cursor.col + 1
    );
    let block = focused_block(state, field, title);
    let inner = block.inner(area);

    frame.render_widget(Paragraph::new(lines).block(block), area);
    place_cursor(frame, state, buffer, field, inner);
}

/// Renders a single-line head/tail field.
fn render_field(frame: &mut Frame, state: &AppState, buffer: &TextBuffer, field: Focus, title: &str, area: Rect) {
    let block = focused_block(state, field, title.to_string());
    let inner = block.inner(area);
    let vp = buffer.viewport();
    let text: String = visible_chars(&buffer.text(), vp.first_col, inner.width as usize)
        .into_iter()
        .collect();

    frame.render_widget(Paragraph::new(text).block(block), area);
    place_cursor(frame, state, buffer, field, inner);
}

/// Renders the button row with key hints.
fn render_button_bar(frame: &mut Frame, layout: Layout, area: Rect) {
    let key_style = Style::default().fg(Color::Black).bg(Color::Gray);
    let mut spans = vec![Span::styled("F1", key_style), Span::raw("Help ")];

    for (i, op) in Operation::ALL.iter().enumerate() {
        spans.push(Span::styled(format!("F{}", i + 2), key_style));
        spans.push(Span::raw(format!("{} ", op.label())));
    }
    if layout == Layout::Split {
        spans.push(Span::styled("F9", key_style));
        spans.push(Span::raw("In<=Out"));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let (mode_str, command_str) = match &state.mode {
        AppMode::Insert => ("INSERT", String::new()),
        AppMode::Normal => ("NORMAL", String::new()),
        AppMode::Command(cmd) => ("COMMAND", format!(":{}", cmd)),
    };

    let position_info = format!("{} | {} line(s) ", state.layout, state.input.line_count());

    let message = state.status_message.as_deref().unwrap_or("");

    let left_content = if command_str.is_empty() {
        format!(" {} | {} ", mode_str, message)
    } else {
        format!(" {} | {} ", mode_str, command_str)
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

/// Wraps the help text to the overlay width.
fn help_lines(width: usize) -> Vec<String> {
    HELP_TEXT
        .iter()
        .flat_map(|paragraph| {
            if paragraph.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(paragraph, width)
                    .into_iter()
                    .map(|line| line.into_owned())
                    .collect()
            }
        })
        .collect()
}

fn render_help(frame: &mut Frame) {
    let area = frame.area();
    let width = HELP_WIDTH.min(area.width);
    let lines = help_lines(width.saturating_sub(4).max(1) as usize);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help (any key to close) ");
    let text: Vec<Line> = lines.into_iter().map(Line::from).collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(block), popup);
}

/// Calculates the visible rows and columns of the text panels.
pub fn calculate_visible_dimensions(terminal_width: u16, terminal_height: u16, layout: Layout) -> (usize, usize) {
    let areas = split_areas(Rect::new(0, 0, terminal_width, terminal_height), layout);
    // -2 for borders
    let visible_rows = areas.input.height.saturating_sub(2) as usize;
    let visible_cols = areas.input.width.saturating_sub(2) as usize;
    (visible_rows, visible_cols)
}

/// Calculates the visible width of the head/tail fields.
pub fn calculate_field_width(terminal_width: u16, terminal_height: u16) -> usize {
    let areas = split_areas(Rect::new(0, 0, terminal_width, terminal_height), Layout::Split);
    areas.head.width.saturating_sub(2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_dna_colors() {
        let scheme = DnaColorScheme;
        assert_eq!(scheme.get_color('A'), Color::Red);
        assert_eq!(scheme.get_color('a'), Color::Red); // Case insensitive
        assert_eq!(scheme.get_color('C'), Color::Green);
        assert_eq!(scheme.get_color('G'), Color::Yellow);
        assert_eq!(scheme.get_color('T'), Color::Blue);
        assert_eq!(scheme.get_color('N'), Color::Gray);
    }

    #[test]
    fn test_visible_dimensions() {
        // 24 - 1 (title) - 3 (affixes) - 1 (buttons) - 1 (status) - 2 (borders) = 16 rows
        let (rows, cols) = calculate_visible_dimensions(100, 24, Layout::Split);
        assert_eq!(rows, 16);
        assert_eq!(cols, 48);

        let (_, cols) = calculate_visible_dimensions(100, 24, Layout::InPlace);
        assert_eq!(cols, 98);

        assert_eq!(calculate_field_width(100, 24), 48);
    }

    #[test]
    fn test_render_split_layout() {
        let mut state = AppState::new(Layout::Split).with_input("ATGC");
        state.apply_operation(Operation::Complement);
        let screen = draw(&state, 100, 24);
        assert!(screen.contains("Sequence input"));
        assert!(screen.contains("Sequence output"));
        assert!(screen.contains("TACG"));
        assert!(screen.contains("INSERT"));
    }

    #[test]
    fn test_render_in_place_layout() {
        let state = AppState::new(Layout::InPlace).with_input("GATTACA");
        let screen = draw(&state, 100, 24);
        assert!(!screen.contains("Sequence output"));
        assert!(screen.contains("GATTACA"));
        assert!(!screen.contains("In<=Out"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut state = AppState::new(Layout::Split);
        state.show_help = true;
        let screen = draw(&state, 100, 30);
        assert!(screen.contains("Help (any key to close)"));
    }

    #[test]
    fn test_visible_chars_clip_by_cells() {
        assert_eq!(visible_chars("ACGT", 1, 2), vec!['C', 'G']);
        assert_eq!(visible_chars("中文AB", 2, 3), vec!['文', 'A']);
        // A wide char straddling the left edge is dropped
        assert_eq!(visible_chars("中文", 1, 4), vec!['文']);
    }

    #[test]
    fn test_cursor_after_wide_chars() {
        let mut state = AppState::new(Layout::Split);
        state.focus = Focus::Head;
        state.head.insert_str("中文");

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();
        // Head field inner area starts at (1, 20); two wide chars take four cells
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(5, 20));
    }

    #[test]
    fn test_help_lines_wrap() {
        let lines = help_lines(30);
        assert!(lines.iter().all(|l| l.chars().count() <= 30));
        assert!(lines.len() > HELP_TEXT.len());
    }
}
