//! Field configuration for constrained text inputs.
//!
//! A [`FieldConfig`] fixes what a single input accepts: the allow-list, the
//! editable length, the immutable prefix and the normalization rules.

use crate::util::{is_ascii_letter, is_label_char};

/// Character filter function type
pub type CharFilter = fn(char) -> bool;

/// Prefix shown in front of every resources label
pub const RESOURCES_PREFIX: &str = "Resources_";

/// Immutable rules for one constrained input field.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Leading text the user can never edit (empty = no prefix)
    pub prefix: String,

    /// Allow-list predicate; returns true if the character is allowed
    pub char_filter: CharFilter,

    /// Maximum length of the editable portion, in characters (prefix excluded)
    pub max_length: usize,

    /// Collapse whitespace runs while typing and deleting. Paste, drop, live
    /// edits, reconcile and blur collapse regardless.
    pub collapse_whitespace: bool,

    /// Upper-case the first character, lower-case the rest
    pub capitalize_first: bool,

    /// Substrings removed case-insensitively wherever they appear
    pub forbidden_substrings: Vec<String>,

    /// Typing inside the prefix inserts right after it (true) or is blocked (false)
    pub redirect_prefix_typing: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            char_filter: |_| true,
            max_length: usize::MAX,
            collapse_whitespace: true,
            capitalize_first: false,
            forbidden_substrings: Vec::new(),
            redirect_prefix_typing: false,
        }
    }
}

impl FieldConfig {
    /// Person name: letters only, capitalized, forbidden words stripped
    pub fn name() -> Self {
        Self {
            prefix: String::new(),
            char_filter: is_ascii_letter,
            max_length: 20,
            collapse_whitespace: true,
            capitalize_first: true,
            forbidden_substrings: vec!["isk".to_string(), "admin".to_string()],
            redirect_prefix_typing: false,
        }
    }

    /// Subject label: letters, digits, spaces and hyphens
    pub fn subject() -> Self {
        Self {
            prefix: String::new(),
            char_filter: is_label_char,
            max_length: 30,
            collapse_whitespace: true,
            capitalize_first: false,
            forbidden_substrings: Vec::new(),
            redirect_prefix_typing: false,
        }
    }

    /// Resources label: like subject, behind the immutable `Resources_` prefix
    pub fn resources() -> Self {
        Self {
            prefix: RESOURCES_PREFIX.to_string(),
            char_filter: is_label_char,
            max_length: 30,
            collapse_whitespace: true,
            capitalize_first: false,
            forbidden_substrings: Vec::new(),
            redirect_prefix_typing: true,
        }
    }

    /// Length of the prefix in characters
    pub fn prefix_len(&self) -> usize {
        self.prefix.chars().count()
    }

    /// Check if a character passes the allow-list
    pub fn is_char_allowed(&self, ch: char) -> bool {
        (self.char_filter)(ch)
    }

    /// Check if inserting text would exceed max length
    pub fn would_exceed_max_length(&self, current_len: usize, insert_len: usize) -> bool {
        current_len.saturating_add(insert_len) > self.max_length
    }

    pub fn has_forbidden_substrings(&self) -> bool {
        self.forbidden_substrings.iter().any(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_config() {
        let c = FieldConfig::name();
        assert!(c.is_char_allowed('a'));
        assert!(c.is_char_allowed('Z'));
        assert!(!c.is_char_allowed('1'));
        assert!(!c.is_char_allowed(' '));
        assert!(c.capitalize_first);
        assert_eq!(c.prefix_len(), 0);
        assert!(c.has_forbidden_substrings());
    }

    #[test]
    fn test_resources_config() {
        let c = FieldConfig::resources();
        assert_eq!(c.prefix, "Resources_");
        assert_eq!(c.prefix_len(), 10);
        assert!(c.redirect_prefix_typing);
        assert!(c.is_char_allowed('-'));
        assert!(!c.is_char_allowed('_'));
        assert!(!c.has_forbidden_substrings());
    }

    #[test]
    fn test_subject_config() {
        let c = FieldConfig::subject();
        assert!(c.prefix.is_empty());
        assert!(c.is_char_allowed(' '));
        assert!(!c.is_char_allowed('!'));
    }

    #[test]
    fn test_max_length() {
        let c = FieldConfig::subject();
        assert!(!c.would_exceed_max_length(25, 5));
        assert!(c.would_exceed_max_length(28, 3));
        assert!(!FieldConfig::default().would_exceed_max_length(usize::MAX, 1));
    }
}
