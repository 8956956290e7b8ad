//! Input field handling for the new-task form.

/// A text input field with cursor position and active state management.
///
/// `cursor` is a byte offset into `value` and always sits on a char
/// boundary, so editing stays safe for multibyte input.
#[derive(Clone)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            active: false,
        }
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    /// Move cursor one character to the left.
    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    /// Move cursor one character to the right.
    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// Clear the field and hand back what was typed.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    // Byte offset of the char boundary just before the cursor.
    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_after_multibyte_chars() {
        let mut input = InputField::new();
        for c in "Café 日本 🎉ok".chars() {
            input.handle_char(c);
        }
        assert_eq!(input.value, "Café 日本 🎉ok");
        assert_eq!(input.cursor, input.value.len());
    }

    #[test]
    fn test_backspace_removes_whole_multibyte_char() {
        let mut input = InputField::new();
        for c in "héllo".chars() {
            input.handle_char(c);
        }
        input.move_cursor_left();
        input.move_cursor_left();
        input.move_cursor_left();
        input.handle_backspace(); // removes 'é'
        assert_eq!(input.value, "hllo");

        input.handle_char('a');
        assert_eq!(input.value, "hallo");
    }

    #[test]
    fn test_cursor_moves_stay_on_char_boundaries() {
        let mut input = InputField::new();
        for c in "日本".chars() {
            input.handle_char(c);
        }
        input.move_cursor_left();
        assert_eq!(input.cursor, "日".len());
        input.move_cursor_left();
        assert_eq!(input.cursor, 0);
        input.move_cursor_left(); // already at the start
        assert_eq!(input.cursor, 0);
        input.move_cursor_right();
        input.move_cursor_right();
        input.move_cursor_right(); // already at the end
        assert_eq!(input.cursor, input.value.len());
    }

    #[test]
    fn test_insert_mid_string_after_multibyte() {
        let mut input = InputField::new();
        for c in "aé".chars() {
            input.handle_char(c);
        }
        input.move_cursor_left();
        input.handle_char('x');
        assert_eq!(input.value, "axé");
    }
}
