// Text editing for the contact form fields
//
// Cursors are char indices (not byte offsets) so they survive multi-byte
// input. Screen columns come from unicode-width, so wide glyphs place the
// terminal cursor correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// A single editing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

impl Edit {
    /// Map a key press to an edit, if it is one
    ///
    /// Enter is not mapped here: what it does depends on the field.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        match key.code {
            KeyCode::Char(c) => Some(Edit::Insert(c)),
            KeyCode::Backspace => Some(Edit::Backspace),
            KeyCode::Delete => Some(Edit::Delete),
            KeyCode::Left => Some(Edit::Left),
            KeyCode::Right => Some(Edit::Right),
            KeyCode::Home => Some(Edit::Home),
            KeyCode::End => Some(Edit::End),
            _ => None,
        }
    }

    /// True if the edit only moves the cursor
    pub fn is_motion(&self) -> bool {
        matches!(self, Edit::Left | Edit::Right | Edit::Home | Edit::End)
    }
}

/// Byte offset of char index `cursor` (clamped to the end)
fn byte_offset(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Clamp a cursor to the text's length in chars
pub fn clamp(text: &str, cursor: usize) -> usize {
    cursor.min(text.chars().count())
}

/// Cursor after a motion edit. Home/End work on the current line.
pub fn move_cursor(text: &str, cursor: usize, edit: Edit) -> usize {
    let cursor = clamp(text, cursor);
    let len = text.chars().count();
    match edit {
        Edit::Left => cursor.saturating_sub(1),
        Edit::Right => (cursor + 1).min(len),
        Edit::Home => {
            let before: Vec<char> = text.chars().take(cursor).collect();
            before
                .iter()
                .rposition(|&c| c == '\n')
                .map(|i| i + 1)
                .unwrap_or(0)
        }
        Edit::End => {
            let to_newline = text.chars().skip(cursor).position(|c| c == '\n');
            to_newline.map(|n| cursor + n).unwrap_or(len)
        }
        _ => cursor,
    }
}

/// Apply a mutating edit in place, returning the new cursor
pub fn apply(text: &mut String, cursor: usize, edit: Edit) -> usize {
    let cursor = clamp(text, cursor);
    match edit {
        Edit::Insert(c) => {
            text.insert(byte_offset(text, cursor), c);
            cursor + 1
        }
        Edit::Backspace if cursor > 0 => {
            text.remove(byte_offset(text, cursor - 1));
            cursor - 1
        }
        Edit::Delete if cursor < text.chars().count() => {
            text.remove(byte_offset(text, cursor));
            cursor
        }
        Edit::Backspace | Edit::Delete => cursor,
        motion => move_cursor(text, cursor, motion),
    }
}

/// (line, column) of the cursor on screen, column in terminal cells
pub fn cursor_position(text: &str, cursor: usize) -> (usize, usize) {
    let before = &text[..byte_offset(text, clamp(text, cursor))];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, before[line_start..].width())
}
