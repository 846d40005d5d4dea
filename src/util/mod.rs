//! Utility modules

pub mod text;

pub use text::{
    char_type, chars_eq_ignore_case, is_ascii_letter, is_label_char, is_punctuation, CharType,
};
