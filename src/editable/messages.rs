//! Message types for driving a constrained field.
//!
//! A host adapter translates its native input events into [`FieldMsg`] and
//! hands them to [`ConstrainedTextField::update`](super::ConstrainedTextField::update).

use serde::{Deserialize, Serialize};

/// Target for caret movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveTarget {
    /// Move one character left
    Left,
    /// Move one character right
    Right,
    /// Move to start of the editable region (just after the prefix)
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move one word left
    WordLeft,
    /// Move one word right
    WordRight,
}

/// Raw edit events a host delivers to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FieldMsg {
    // === Insertion ===
    /// A single typed character and the caret at the time of the keystroke
    TypeChar { ch: char, caret: usize },
    /// Clipboard paste over `[start, end)`
    Paste {
        text: String,
        start: usize,
        end: usize,
    },
    /// Drag-and-drop; the hint is accepted but the text is always appended
    Drop {
        text: String,
        #[serde(default)]
        hint: Option<usize>,
    },
    /// The control already holds a new full value (composed input, autofill)
    LiveEdit { value: String, caret: usize },

    // === Deletion ===
    /// Backspace
    DeleteBackward,
    /// Delete key
    DeleteForward,

    // === Caret & selection ===
    /// Move the caret, optionally extending the selection
    Move {
        target: MoveTarget,
        #[serde(default)]
        extend: bool,
    },
    /// Select the editable region
    SelectAll,
    /// Host placed the caret or selection (click, drag, programmatic)
    SetSelection { start: usize, end: usize },

    // === Focus ===
    Focus,
    Blur,

    // === Out-of-band ===
    /// Periodic check of the value currently shown by the host control
    Reconcile { value: String },
    /// Form reset
    Reset,
}

impl FieldMsg {
    /// Check if this message may modify the value
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            FieldMsg::TypeChar { .. }
                | FieldMsg::Paste { .. }
                | FieldMsg::Drop { .. }
                | FieldMsg::LiveEdit { .. }
                | FieldMsg::DeleteBackward
                | FieldMsg::DeleteForward
                | FieldMsg::Blur
                | FieldMsg::Reconcile { .. }
                | FieldMsg::Reset
        )
    }
}
