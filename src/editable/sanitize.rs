//! Normalization of candidate text against a [`FieldConfig`].
//!
//! The pipeline is:
//!
//! 1. drop characters failing the allow-list (recording them),
//! 2. trim leading/trailing whitespace (optional),
//! 3. collapse whitespace runs into one space (optional),
//! 4. strip forbidden substrings case-insensitively until none remain,
//! 5. truncate to `max_length`,
//! 6. capitalize (optional), going back to step 4 if that formed a match.
//!
//! Every surviving character keeps the index it had in the input, so callers
//! can move a caret by exactly the number of characters removed before it.

use crate::util::chars_eq_ignore_case;

use super::constraints::FieldConfig;

/// Per-call normalization switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeOptions {
    pub collapse_whitespace: bool,
    pub trim: bool,
}

impl SanitizeOptions {
    /// Mid-typing: collapse runs but keep edge whitespace the user may still be building on
    pub const LIVE: Self = Self {
        collapse_whitespace: true,
        trim: false,
    };

    /// Paste, drop and blur: collapse and trim
    pub const FINAL: Self = Self {
        collapse_whitespace: true,
        trim: true,
    };

    pub const fn new(collapse_whitespace: bool, trim: bool) -> Self {
        Self {
            collapse_whitespace,
            trim,
        }
    }
}

/// Result of a tracked sanitization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sanitized {
    /// The normalized text
    pub text: String,
    /// Input index (in chars) of each character of `text`, strictly increasing
    pub source_indices: Vec<usize>,
    /// Distinct characters dropped by the allow-list, in first-seen order
    pub rejected: Vec<char>,
    /// Whether step 5 cut anything off
    pub truncated: bool,
    /// Whether any forbidden substring was removed
    pub forbidden_removed: bool,
}

impl Sanitized {
    /// Length of the normalized text in characters
    pub fn len(&self) -> usize {
        self.source_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_indices.is_empty()
    }

    /// Map a char position in the input to the matching position in the output.
    ///
    /// The result is `pos` minus the number of input characters before `pos`
    /// that did not survive.
    pub fn map_position(&self, pos: usize) -> usize {
        self.source_indices.partition_point(|&i| i < pos)
    }
}

type Tracked = Vec<(usize, char)>;

/// Sanitize `text`, returning only the normalized string.
pub fn sanitize(config: &FieldConfig, text: &str, options: SanitizeOptions) -> String {
    sanitize_tracked(config, text, options).text
}

/// Distinct characters of `text` that fail the allow-list, in first-seen order.
pub fn rejected_chars(config: &FieldConfig, text: &str) -> Vec<char> {
    let mut rejected = Vec::new();
    for ch in text.chars() {
        if !config.is_char_allowed(ch) && !rejected.contains(&ch) {
            rejected.push(ch);
        }
    }
    rejected
}

/// Sanitize `text` and keep the index mapping and diagnostics.
pub fn sanitize_tracked(config: &FieldConfig, text: &str, options: SanitizeOptions) -> Sanitized {
    let mut rejected = Vec::new();
    let mut chars: Tracked = Vec::with_capacity(text.len());

    for (i, ch) in text.chars().enumerate() {
        if config.is_char_allowed(ch) {
            chars.push((i, ch));
        } else if !rejected.contains(&ch) {
            rejected.push(ch);
        }
    }

    normalize_whitespace(&mut chars, options);

    let words: Vec<Vec<char>> = if config.has_forbidden_substrings() {
        config
            .forbidden_substrings
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| w.chars().collect())
            .collect()
    } else {
        Vec::new()
    };

    let mut forbidden_removed = false;
    let mut truncated = false;
    loop {
        // Removal can join text into a new match (or a new whitespace run), so
        // repeat until a full pass changes nothing.
        while strip_forbidden(&mut chars, &words) {
            forbidden_removed = true;
            normalize_whitespace(&mut chars, options);
        }

        if chars.len() > config.max_length {
            chars.truncate(config.max_length);
            truncated = true;
            if options.trim {
                while chars.last().is_some_and(|(_, c)| c.is_whitespace()) {
                    chars.pop();
                }
            }
        }

        if !config.capitalize_first {
            break;
        }
        capitalize(&mut chars);

        // Case mapping can turn a near miss into a match ("ı" -> "I")
        if !contains_forbidden(&chars, &words) {
            break;
        }
    }

    if !rejected.is_empty() || truncated || forbidden_removed {
        tracing::trace!(
            rejected = ?rejected,
            truncated,
            forbidden_removed,
            "sanitized field input"
        );
    }

    let (source_indices, text): (Vec<usize>, String) = chars.into_iter().unzip();
    Sanitized {
        text,
        source_indices,
        rejected,
        truncated,
        forbidden_removed,
    }
}

fn normalize_whitespace(chars: &mut Tracked, options: SanitizeOptions) {
    if options.trim {
        let start = chars
            .iter()
            .position(|(_, c)| !c.is_whitespace())
            .unwrap_or(chars.len());
        chars.drain(..start);
        while chars.last().is_some_and(|(_, c)| c.is_whitespace()) {
            chars.pop();
        }
    }

    if options.collapse_whitespace {
        let mut prev_whitespace = false;
        chars.retain_mut(|(_, c)| {
            if c.is_whitespace() {
                let keep = !prev_whitespace;
                prev_whitespace = true;
                *c = ' ';
                keep
            } else {
                prev_whitespace = false;
                true
            }
        });
    }
}

/// One left-to-right pass removing every match. Returns true if anything was removed.
fn strip_forbidden(chars: &mut Tracked, words: &[Vec<char>]) -> bool {
    let mut removed = false;
    let mut i = 0;
    while i < chars.len() {
        let hit = words.iter().find(|word| {
            i + word.len() <= chars.len()
                && word
                    .iter()
                    .zip(&chars[i..i + word.len()])
                    .all(|(w, (_, c))| chars_eq_ignore_case(*w, *c))
        });
        match hit {
            Some(word) => {
                chars.drain(i..i + word.len());
                removed = true;
            }
            None => i += 1,
        }
    }
    removed
}

fn contains_forbidden(chars: &Tracked, words: &[Vec<char>]) -> bool {
    words.iter().any(|word| {
        chars.windows(word.len()).any(|window| {
            word.iter()
                .zip(window)
                .all(|(w, (_, c))| chars_eq_ignore_case(*w, *c))
        })
    })
}

fn capitalize(chars: &mut Tracked) {
    for (n, (_, ch)) in chars.iter_mut().enumerate() {
        *ch = if n == 0 { single_upper(*ch) } else { single_lower(*ch) };
    }
}

fn single_upper(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => ch,
    }
}

fn single_lower(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => ch,
    }
}
