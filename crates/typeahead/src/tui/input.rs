//! Single-line query editor

use crossterm::event::{KeyCode, KeyModifiers};

/// What a key press did to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    /// Text changed; the query must be re-dispatched
    Edited,
    /// Only the cursor moved
    Moved,
    /// Not an editing key
    Ignored,
}

/// Query text plus a byte-offset cursor (always on a char boundary)
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    /// Start of the word before the cursor, skipping trailing whitespace first
    fn word_start_before(&self) -> usize {
        let before = self.text[..self.cursor].trim_end();
        before
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }

    /// End of the word after the cursor, skipping leading whitespace first
    fn word_end_after(&self) -> usize {
        let after = &self.text[self.cursor..];
        let skipped = after.len() - after.trim_start().len();
        let word = after[skipped..]
            .find(char::is_whitespace)
            .unwrap_or(after.len() - skipped);
        self.cursor + skipped + word
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Returns false when there was nothing to delete
    pub fn delete_char_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete_char_at(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
        true
    }

    pub fn delete_word_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.word_start_before();
        self.text.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.text.clear();
        self.cursor = 0;
        true
    }

    /// Apply a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputChange {
        let has_ctrl = modifiers.contains(KeyModifiers::CONTROL);
        // macOS Option may report as SUPER
        let has_alt = modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER);

        let edited = match code {
            KeyCode::Char('u') if has_ctrl => self.clear(),
            KeyCode::Char('w') if has_ctrl => self.delete_word_before(),
            KeyCode::Backspace if has_alt => self.delete_word_before(),
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Char(c) if !has_ctrl && !has_alt => {
                self.insert_char(c);
                true
            }
            _ => {
                let cursor = match code {
                    KeyCode::Char('a') if has_ctrl => 0,
                    KeyCode::Char('e') if has_ctrl => self.text.len(),
                    KeyCode::Home => 0,
                    KeyCode::End => self.text.len(),
                    KeyCode::Char('b') if has_alt => self.word_start_before(),
                    KeyCode::Char('f') if has_alt => self.word_end_after(),
                    KeyCode::Left if has_alt || has_ctrl => self.word_start_before(),
                    KeyCode::Right if has_alt || has_ctrl => self.word_end_after(),
                    KeyCode::Left => self.prev_boundary(),
                    KeyCode::Right => self.next_boundary(),
                    _ => return InputChange::Ignored,
                };
                self.cursor = cursor;
                return InputChange::Moved;
            }
        };

        if edited {
            InputChange::Edited
        } else {
            InputChange::Moved
        }
    }
}
