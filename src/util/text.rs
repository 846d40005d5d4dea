//! Character classes used by field allow-lists and word-wise caret movement

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
            | '_'
    )
}

/// Character type for word navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    /// Whitespace characters
    Whitespace,
    /// Alphanumeric characters (word characters)
    WordChar,
    /// Punctuation and symbols
    Punctuation,
}

/// Get the character type for word navigation
pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// ASCII letters only (`a-z`, `A-Z`)
pub fn is_ascii_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Characters allowed in subject and resource labels:
/// ASCII letters, digits, whitespace and `-`
pub fn is_label_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch.is_whitespace() || ch == '-'
}

/// Case-insensitive comparison of two characters.
///
/// Falls back to full Unicode lowercase mapping for non-ASCII characters.
pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b || a.to_lowercase().eq(b.to_lowercase())
    }
}
