// ABOUTME: Single-line text input with a character cursor and optional masking

/// Editable single-line value; the cursor is a character index, not a byte index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
    masked: bool,
    revealed: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Secure entry; rendered as bullets until revealed
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) {
        if self.masked {
            self.revealed = !self.revealed;
        }
    }

    /// What the user sees: bullets for hidden secure entry
    pub fn display(&self) -> String {
        if self.masked && !self.revealed {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    /// Returns true when something was removed
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        true
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_at_cursor() {
        let mut field = TextField::new();
        for c in "Ade".chars() {
            field.insert_char(c);
        }
        field.move_cursor_left();
        field.insert_char('x');
        assert_eq!(field.value(), "Adxe");
        assert!(field.backspace());
        assert_eq!(field.value(), "Ade");
        field.move_to_start();
        assert!(!field.backspace());
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = TextField::new();
        field.insert_text("Öl ñ");
        field.move_cursor_left();
        field.insert_char('é');
        assert_eq!(field.value(), "Öl éñ");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn test_masked_display_and_reveal() {
        let mut field = TextField::masked();
        field.insert_text("secret");
        assert_eq!(field.display(), "••••••");
        field.toggle_reveal();
        assert_eq!(field.display(), "secret");

        let mut plain = TextField::new();
        plain.toggle_reveal();
        assert!(!plain.is_revealed());
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut field = TextField::new();
        field.insert_text("line one\nline two\r\n");
        assert_eq!(field.value(), "line oneline two");
    }
}
