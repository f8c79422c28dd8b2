//! Single-line editing state for the filter query.
//!
//! `QueryEditor` owns the character buffer and cursor of the query input
//! rendered inside a filterable select. It is deliberately smaller than a
//! general text input: the query is transient, reset on every panel close,
//! so it carries no undo history or length limits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Editing state of the filter query.
#[derive(Debug, Clone, Default)]
pub struct QueryEditor {
    chars: Vec<char>,
    cursor: usize,
}

/// What a key press did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEdit {
    /// The buffer text changed.
    Changed,
    /// Only the cursor moved.
    CursorMoved,
    /// Backspace on an empty buffer; the owner may treat this as a
    /// tag-removal gesture in multi mode.
    BackspaceOnEmpty,
    /// The key was not an editing key.
    Ignored,
}

impl QueryEditor {
    /// Empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query text.
    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.chars = s.chars().collect();
        self.cursor = self.chars.len();
    }

    /// Current cursor position as a char index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Clear the buffer and reset the cursor.
    pub fn reset(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. Returns whether anything
    /// was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Delete the character at the cursor. Returns whether anything was
    /// deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word_back(&mut self) -> bool {
        let start = self.cursor;
        while self.cursor > 0 && self.chars[self.cursor - 1] == ' ' {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
        while self.cursor > 0 && self.chars[self.cursor - 1] != ' ' {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
        self.cursor != start
    }

    /// Kill from cursor to start of line (Ctrl+U).
    pub fn kill_to_start(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.chars.drain(..self.cursor);
        self.cursor = 0;
        true
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Apply a key press to the editor.
    ///
    /// Only editing keys are consumed; navigation and commit keys fall
    /// through as [`QueryEdit::Ignored`] so the owning widget can route
    /// them to the option list.
    pub fn handle_key(&mut self, key: KeyEvent) -> QueryEdit {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.kill_to_start() {
                    QueryEdit::Changed
                } else {
                    QueryEdit::CursorMoved
                }
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.delete_word_back() {
                    QueryEdit::Changed
                } else {
                    QueryEdit::CursorMoved
                }
            }
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_home();
                QueryEdit::CursorMoved
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_end();
                QueryEdit::CursorMoved
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if c.is_control() {
                    return QueryEdit::Ignored;
                }
                self.insert_char(c);
                QueryEdit::Changed
            }
            KeyCode::Backspace => {
                if self.is_empty() {
                    QueryEdit::BackspaceOnEmpty
                } else if self.delete_back() {
                    QueryEdit::Changed
                } else {
                    QueryEdit::CursorMoved
                }
            }
            KeyCode::Delete => {
                if self.delete_forward() {
                    QueryEdit::Changed
                } else {
                    QueryEdit::CursorMoved
                }
            }
            KeyCode::Left => {
                self.move_left();
                QueryEdit::CursorMoved
            }
            KeyCode::Right => {
                self.move_right();
                QueryEdit::CursorMoved
            }
            _ => QueryEdit::Ignored,
        }
    }
}
