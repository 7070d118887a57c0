//! Search text input
//!
//! Single-line editor behind the header's search field. The cursor is a
//! character index, so multi-byte input edits cleanly.

/// Search input state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    /// Current query text
    pub query: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the query (e.g. when landing on a search URL) with the cursor at the end
    pub fn set(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.cursor = self.char_len();
    }

    /// Trimmed query, or None if blank
    pub fn submission(&self) -> Option<&str> {
        Some(self.query.trim()).filter(|q| !q.is_empty())
    }

    /// Query split at the cursor, for drawing the caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_offset(self.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut input = SearchInput::new();
        for c in "dune".chars() {
            input.insert(c);
        }
        assert_eq!(input.query, "dune");
        assert_eq!(input.cursor, 4);

        input.backspace();
        assert_eq!(input.query, "dun");

        input.cursor_home();
        input.backspace();
        assert_eq!(input.query, "dun");
    }

    #[test]
    fn test_cursor_editing_mid_string() {
        let mut input = SearchInput::new();
        input.set("btman");
        input.cursor_home();
        input.cursor_right();
        input.insert('a');
        assert_eq!(input.query, "batman");
        assert_eq!(input.split_at_cursor(), ("ba", "tman"));

        input.delete();
        assert_eq!(input.query, "baman");
        input.cursor_end();
        input.delete();
        assert_eq!(input.query, "baman");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = SearchInput::new();
        input.set("기생충");
        input.cursor_left();
        input.insert('x');
        assert_eq!(input.query, "기생x충");
        input.backspace();
        input.backspace();
        assert_eq!(input.query, "기충");
    }

    #[test]
    fn test_submission_trims_blank() {
        let mut input = SearchInput::new();
        assert_eq!(input.submission(), None);
        input.set("   ");
        assert_eq!(input.submission(), None);
        input.set("  alien ");
        assert_eq!(input.submission(), Some("alien"));
    }
}
