//! Single-line text buffer addressed by character offsets.
//!
//! Carets, selections and lengths throughout the crate count `char`s, never
//! bytes; this buffer does the byte translation at the edges.

use std::ops::Range;

/// Single-line text storage backed by `String`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    /// Create a StringBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get character at offset, None if out of bounds
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Get slice of text as String (by character offsets, clamped)
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.text.chars().skip(start).take(end - start).collect()
    }

    /// Text from a character offset to the end
    pub fn slice_from(&self, start: usize) -> &str {
        &self.text[self.char_to_byte(start)..]
    }

    /// Remove text in character range
    pub fn remove(&mut self, range: Range<usize>) {
        let start_byte = self.char_to_byte(range.start);
        let end_byte = self.char_to_byte(range.end).max(start_byte);
        self.text.replace_range(start_byte..end_byte, "");
    }

    /// Replace text in range with new text
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let start_byte = self.char_to_byte(range.start);
        let end_byte = self.char_to_byte(range.end).max(start_byte);
        self.text.replace_range(start_byte..end_byte, text);
    }

    /// Set content, replacing everything
    pub fn set_content(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    /// Convert char offset to byte offset (clamped to the end)
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_buffer_basics() {
        let buf = StringBuffer::from_text("hello");
        assert_eq!(buf.len_chars(), 5);
        assert_eq!(buf.char_at(1), Some('e'));
        assert_eq!(buf.char_at(5), None);
        assert_eq!(buf.slice(1..3), "el");
        assert_eq!(buf.slice(3..99), "lo");
        assert_eq!(buf.slice_from(2), "llo");
        assert_eq!(buf.slice_from(42), "");
    }

    #[test]
    fn test_string_buffer_edits() {
        let mut buf = StringBuffer::from_text("hllo");
        buf.replace(1..1, "e");
        assert_eq!(buf.as_str(), "hello");

        buf.replace(5..5, " world");
        assert_eq!(buf.as_str(), "hello world");

        buf.remove(5..11);
        assert_eq!(buf.as_str(), "hello");

        buf.replace(0..1, "J");
        assert_eq!(buf.as_str(), "Jello");

        buf.set_content("x");
        assert_eq!(buf.as_str(), "x");
    }

    #[test]
    fn test_string_buffer_multibyte_offsets() {
        let mut buf = StringBuffer::from_text("añb");
        assert_eq!(buf.len_chars(), 3);
        buf.replace(2..2, "-");
        assert_eq!(buf.as_str(), "añ-b");
        buf.remove(1..2);
        assert_eq!(buf.as_str(), "a-b");
    }
}
