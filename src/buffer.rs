//! Editable text buffers.
//!
//! A [`TextBuffer`] stores its content as lines plus a cursor and a viewport.
//! Cursor columns count characters, not bytes, so multi-byte text moves
//! one symbol at a time. Horizontal scrolling works in terminal cells, so
//! wide characters (CJK, emoji) take two columns on screen. Single-line buffers back the head/tail fields and
//! drop line breaks on input.

use unicode_width::UnicodeWidthChar;

use crate::model::{Cursor, Viewport};
use crate::ops::normalize_line_endings;

/// A line-oriented text buffer with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    viewport: Viewport,
    single_line: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates an empty multi-line buffer.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::new(),
            viewport: Viewport::new(0, 0),
            single_line: false,
        }
    }

    /// Creates an empty single-line buffer.
    pub fn single_line() -> Self {
        Self {
            single_line: true,
            ..Self::new()
        }
    }

    /// Creates a multi-line buffer holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Returns the whole content joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Screen column of the cursor within its line.
    pub fn cursor_display_col(&self) -> usize {
        display_width(self.lines[self.cursor.row].chars().take(self.cursor.col))
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Returns true if the buffer holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Replaces the content. The cursor is kept where possible.
    pub fn set_text(&mut self, text: &str) {
        self.lines = if self.single_line {
            vec![strip_line_breaks(text)]
        } else {
            normalize_line_endings(text).split('\n').map(str::to_string).collect()
        };
        self.clamp_cursor();
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor = Cursor::new();
        self.viewport.first_row = 0;
        self.viewport.first_col = 0;
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        if c == '\r' {
            return;
        }
        let line = &mut self.lines[self.cursor.row];
        let at = byte_index(line, self.cursor.col);
        line.insert(at, c);
        self.cursor.col += 1;
        self.ensure_cursor_visible();
    }

    /// Inserts a block of text (typically a paste) at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        if self.single_line {
            for c in strip_line_breaks(text).chars() {
                self.insert_char(c);
            }
            return;
        }
        for c in normalize_line_endings(text).chars() {
            self.insert_char(c);
        }
    }

    /// Splits the current line at the cursor. Ignored in single-line buffers.
    pub fn newline(&mut self) {
        if self.single_line {
            return;
        }
        let line = &mut self.lines[self.cursor.row];
        let at = byte_index(line, self.cursor.col);
        let rest = line.split_off(at);
        self.lines.insert(self.cursor.row + 1, rest);
        self.cursor = Cursor::at(self.cursor.row + 1, 0);
        self.ensure_cursor_visible();
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            let line = &mut self.lines[self.cursor.row];
            let at = byte_index(line, self.cursor.col - 1);
            line.remove(at);
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            let current = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            let prev = &mut self.lines[self.cursor.row];
            self.cursor.col = prev.chars().count();
            prev.push_str(&current);
        }
        self.ensure_cursor_visible();
    }

    /// Deletes the character under the cursor, joining lines at line end.
    pub fn delete(&mut self) {
        let len = self.current_line_len();
        if self.cursor.col < len {
            let line = &mut self.lines[self.cursor.row];
            let at = byte_index(line, self.cursor.col);
            line.remove(at);
        } else if self.cursor.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor.row + 1);
            self.lines[self.cursor.row].push_str(&next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.current_line_len();
        }
        self.ensure_cursor_visible();
    }

    pub fn move_right(&mut self) {
        if self.cursor.col < self.current_line_len() {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
        self.ensure_cursor_visible();
    }

    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.cursor.col.min(self.current_line_len());
            self.ensure_cursor_visible();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = self.cursor.col.min(self.current_line_len());
            self.ensure_cursor_visible();
        }
    }

    /// Moves to the start of the current line.
    pub fn home(&mut self) {
        self.cursor.col = 0;
        self.ensure_cursor_visible();
    }

    /// Moves to the end of the current line.
    pub fn end(&mut self) {
        self.cursor.col = self.current_line_len();
        self.ensure_cursor_visible();
    }

    /// Updates the visible area, in rows and terminal columns.
    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) {
        self.viewport.resize(visible_rows, visible_cols);
        self.ensure_cursor_visible();
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.cursor.row].chars().count()
    }

    fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor.row = self.cursor.row.min(self.lines.len() - 1);
        self.cursor.col = self.cursor.col.min(self.current_line_len());
        self.ensure_cursor_visible();
    }

    /// Scrolls the viewport so the cursor stays inside it.
    fn ensure_cursor_visible(&mut self) {
        let x = self.cursor_display_col();
        let vp = &mut self.viewport;
        if vp.visible_rows > 0 {
            if self.cursor.row < vp.first_row {
                vp.first_row = self.cursor.row;
            } else if self.cursor.row >= vp.first_row + vp.visible_rows {
                vp.first_row = self.cursor.row + 1 - vp.visible_rows;
            }
        }
        if vp.visible_cols > 0 {
            if x < vp.first_col {
                vp.first_col = x;
            } else if x >= vp.first_col + vp.visible_cols {
                vp.first_col = x + 1 - vp.visible_cols;
            }
        }
        vp.first_row = vp.first_row.min(self.lines.len().saturating_sub(1));
    }
}

/// Number of terminal cells taken by `chars`.
pub fn display_width(chars: impl Iterator<Item = char>) -> usize {
    chars.map(|c| c.width().unwrap_or(0)).sum()
}

/// Byte offset of the `col`-th character of `line` (or its length).
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_newline() {
        let mut buf = TextBuffer::new();
        for c in "ATG".chars() {
            buf.insert_char(c);
        }
        buf.newline();
        buf.insert_str("CCA");
        assert_eq!(buf.text(), "ATG\nCCA");
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    #[test]
    fn test_newline_splits_line() {
        let mut buf = TextBuffer::from_text("ATGCCA");
        for _ in 0..3 {
            buf.move_right();
        }
        buf.newline();
        assert_eq!(buf.lines(), &["ATG".to_string(), "CCA".to_string()]);
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buf = TextBuffer::from_text("AT\nGC");
        buf.move_down();
        buf.home();
        buf.backspace();
        assert_eq!(buf.text(), "ATGC");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));

        // Nothing to delete at the origin
        buf.home();
        buf.backspace();
        assert_eq!(buf.text(), "ATGC");
    }

    #[test]
    fn test_delete_joins_lines() {
        let mut buf = TextBuffer::from_text("AT\nGC");
        buf.end();
        buf.delete();
        assert_eq!(buf.text(), "ATGC");
        buf.delete();
        assert_eq!(buf.text(), "ATGC");
    }

    #[test]
    fn test_multibyte_cursor() {
        let mut buf = TextBuffer::from_text("aé€");
        buf.end();
        assert_eq!(buf.cursor().col, 3);
        buf.backspace();
        assert_eq!(buf.text(), "aé");
        buf.move_left();
        buf.insert_char('Z');
        assert_eq!(buf.text(), "aZé");
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let mut buf = TextBuffer::new();
        buf.insert_str("ATG\r\nCCA\rGG");
        assert_eq!(buf.text(), "ATG\nCCA\nGG");
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn test_single_line_drops_breaks() {
        let mut buf = TextBuffer::single_line();
        buf.insert_str("XX\nYY");
        buf.newline();
        assert_eq!(buf.text(), "XXYY");
        buf.set_text("a\nb");
        assert_eq!(buf.text(), "ab");
        assert!(buf.is_single_line());
    }

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut buf = TextBuffer::from_text("AAAA\nCCCC\nGGGG");
        buf.move_down();
        buf.move_down();
        buf.end();
        buf.set_text("T");
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), Cursor::new());
    }

    #[test]
    fn test_viewport_follows_cursor() {
        let mut buf = TextBuffer::from_text("A\nC\nG\nT\nN");
        buf.resize(2, 3);
        buf.move_down();
        buf.move_down();
        assert_eq!(buf.viewport().first_row, 1);
        buf.move_up();
        buf.move_up();
        assert_eq!(buf.viewport().first_row, 0);

        let mut wide = TextBuffer::from_text("ACGTACGT");
        wide.resize(1, 3);
        wide.end();
        assert_eq!(wide.viewport().first_col, 6);
        wide.home();
        assert_eq!(wide.viewport().first_col, 0);
    }

    #[test]
    fn test_wide_chars_scroll_by_cells() {
        let mut field = TextBuffer::single_line();
        field.resize(1, 3);
        field.insert_str("中文");
        assert_eq!(field.cursor().col, 2);
        assert_eq!(field.cursor_display_col(), 4);
        assert_eq!(field.viewport().first_col, 2);

        field.home();
        assert_eq!(field.cursor_display_col(), 0);
        assert_eq!(field.viewport().first_col, 0);

        assert_eq!(display_width("A中\u{1F9EC}".chars()), 5);
    }

    #[test]
    fn test_arrow_keys_wrap_between_lines() {
        let mut buf = TextBuffer::from_text("AT\nGC");
        buf.end();
        buf.move_right();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.move_left();
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }
}
