// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Longest text the input field accepts. 15 numbers of 2 digits each, separated by
/// ", ", fit with room to spare.
pub const INPUT_FIELD_MAX_LEN: usize = 64;

/// The single line text field for custom arrays. Nothing is validated while typing, the
/// text is only parsed when it is submitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputField {
    pub buffer: String,
    pub is_editing: bool,
}

impl InputField {
    pub fn begin_editing(&mut self) { self.is_editing = true; }

    /// Stop editing, keeping the text around for next time.
    pub fn cancel_editing(&mut self) { self.is_editing = false; }

    /// Control characters are ignored, and so is anything past
    /// [`INPUT_FIELD_MAX_LEN`].
    pub fn insert(&mut self, ch: char) {
        if ch.is_control() || self.buffer.chars().count() >= INPUT_FIELD_MAX_LEN {
            return;
        }
        self.buffer.push(ch);
    }

    pub fn backspace(&mut self) { self.buffer.pop(); }

    /// Stop editing and return the text to submit. An empty field is submitted too, so
    /// that the user sees why it was rejected.
    pub fn submit(&mut self) -> String {
        self.is_editing = false;
        self.buffer.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_editing() {
        let mut field = InputField::default();
        field.begin_editing();
        for ch in "5,3\t,9x".chars() {
            field.insert(ch);
        }
        field.backspace();
        assert_eq!(field.buffer, "5,3,9");
        assert!(field.is_editing);

        assert_eq!(field.submit(), "5,3,9");
        assert!(!field.is_editing);
        // The text stays, so that it can be fixed up after an error.
        assert_eq!(field.buffer, "5,3,9");
    }

    #[test]
    fn test_max_len() {
        let mut field = InputField::default();
        for _ in 0..INPUT_FIELD_MAX_LEN + 10 {
            field.insert('1');
        }
        assert_eq!(field.buffer.len(), INPUT_FIELD_MAX_LEN);
    }
}
