//! Advisory signals and operation results.

use serde::Serialize;

use super::selection::Selection;

/// Advisory feedback for the host. Never an error: the field is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "signal", content = "chars", rename_all = "snake_case")]
pub enum Signal {
    /// Characters rejected by the allow-list (distinct, first-seen order)
    InvalidCharacter(Vec<char>),
    /// Input was refused or truncated at the length limit
    LimitReached,
    /// The edit targeted the immutable prefix and was ignored
    Blocked,
}

/// What happened to a single typed character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Inserted at the caret
    Inserted,
    /// Typed inside the prefix and inserted just after it instead
    Redirected,
    /// Not inserted
    Rejected(Signal),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Decision::Rejected(_))
    }

    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Decision::Rejected(signal) => Some(signal),
            _ => None,
        }
    }
}

/// Field value and caret after an operation, plus any signals it raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    /// Full value including the prefix
    pub value: String,
    /// Caret/selection to show
    pub selection: Selection,
    /// Advisory signals raised by the operation
    pub signals: Vec<Signal>,
    /// Whether the value differs from before the operation
    pub changed: bool,
}

impl EditOutcome {
    /// Caret position (selection head)
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    pub fn has_signal(&self, signal: &Signal) -> bool {
        self.signals.contains(signal)
    }

    /// Characters reported as invalid, if any
    pub fn invalid_chars(&self) -> &[char] {
        self.signals
            .iter()
            .find_map(|s| match s {
                Signal::InvalidCharacter(chars) => Some(chars.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}
