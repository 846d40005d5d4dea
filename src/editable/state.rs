//! ConstrainedTextField - a single-line field that is valid after every event.
//!
//! The field owns its value, caret and the value seen at the last
//! reconciliation tick. Every edit origin (typing, paste, drop, composed
//! input, deletion, blur, out-of-band mutation) funnels into the same
//! sanitizer and the same caret mapping, so the prefix, allow-list and
//! length rules hold no matter how the text arrived.

use crate::util::{char_type, CharType};

use super::buffer::StringBuffer;
use super::constraints::FieldConfig;
use super::messages::{FieldMsg, MoveTarget};
use super::outcome::{Decision, EditOutcome, Signal};
use super::sanitize::{sanitize_tracked, SanitizeOptions, Sanitized};
use super::selection::Selection;

/// Editable single-line value guarded by a [`FieldConfig`].
#[derive(Debug, Clone)]
pub struct ConstrainedTextField {
    config: FieldConfig,
    /// Full displayed value, always starting with the prefix
    buffer: StringBuffer,
    /// Caret/selection in char offsets into `buffer`
    selection: Selection,
    /// Value observed at the last reconcile tick
    last_observed: String,
    focused: bool,
}

impl ConstrainedTextField {
    /// Create a field showing only its prefix, caret right after it
    pub fn new(config: FieldConfig) -> Self {
        let prefix_len = config.prefix_len();
        let buffer = StringBuffer::from_text(&config.prefix);
        let last_observed = config.prefix.clone();
        Self {
            config,
            buffer,
            selection: Selection::collapsed(prefix_len),
            last_observed,
            focused: false,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Full value including the prefix
    pub fn value(&self) -> &str {
        self.buffer.as_str()
    }

    /// The editable part of the value (prefix excluded)
    pub fn editable_value(&self) -> &str {
        self.buffer.slice_from(self.prefix_len())
    }

    /// Value to submit: prefix stripped, surrounding whitespace trimmed
    pub fn semantic_value(&self) -> String {
        let value = self.value();
        value
            .strip_prefix(self.config.prefix.as_str())
            .unwrap_or(value)
            .trim()
            .to_string()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret position (selection head)
    pub fn caret(&self) -> usize {
        self.selection.head
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn last_observed_value(&self) -> &str {
        &self.last_observed
    }

    fn prefix_len(&self) -> usize {
        self.config.prefix_len()
    }

    fn len(&self) -> usize {
        self.buffer.len_chars()
    }

    fn editable_len(&self) -> usize {
        self.len() - self.prefix_len()
    }

    /// Keystroke previews honor the field's collapse rule; every other path
    /// always collapses
    fn typing_options(&self) -> SanitizeOptions {
        SanitizeOptions::new(self.config.collapse_whitespace, false)
    }

    fn outcome(&self, signals: Vec<Signal>, before: &str) -> EditOutcome {
        EditOutcome {
            value: self.value().to_string(),
            selection: self.selection,
            signals,
            changed: self.value() != before,
        }
    }

    /// Split a full candidate value into its editable text and the char offset
    /// where that text starts in the candidate.
    ///
    /// A candidate that lost its prefix keeps whatever followed the first
    /// intact prefix occurrence, or everything if the prefix is gone entirely.
    fn split_candidate<'a>(&self, candidate: &'a str) -> (&'a str, usize) {
        let prefix = self.config.prefix.as_str();
        if let Some(rest) = candidate.strip_prefix(prefix) {
            return (rest, self.prefix_len());
        }

        match candidate.find(prefix) {
            Some(byte_idx) => {
                let rest = &candidate[byte_idx + prefix.len()..];
                let offset = candidate[..byte_idx].chars().count() + self.prefix_len();
                tracing::debug!(
                    dropped = offset - self.prefix_len(),
                    "repaired field prefix, dropped text before it"
                );
                (rest, offset)
            }
            None => {
                tracing::debug!("field prefix missing, re-attaching it");
                (candidate, 0)
            }
        }
    }

    /// Store `prefix + sanitized` and place the caret at `editable_caret`
    /// (a position in the pre-sanitization editable text).
    fn commit(&mut self, sanitized: &Sanitized, editable_caret: usize) {
        let prefix_len = self.prefix_len();
        let mut value = String::with_capacity(self.config.prefix.len() + sanitized.text.len());
        value.push_str(&self.config.prefix);
        value.push_str(&sanitized.text);
        self.buffer.set_content(&value);

        let caret = (prefix_len + sanitized.map_position(editable_caret)).min(self.len());
        self.selection = Selection::collapsed(caret);
    }

    /// Re-sanitize the editable text after a keystroke or deletion
    fn commit_live(&mut self, editable: &str, editable_caret: usize) -> Sanitized {
        let sanitized = sanitize_tracked(&self.config, editable, self.typing_options());
        self.commit(&sanitized, editable_caret);
        sanitized
    }

    fn signals_for(sanitized: &Sanitized) -> Vec<Signal> {
        let mut signals = Vec::new();
        if !sanitized.rejected.is_empty() {
            signals.push(Signal::InvalidCharacter(sanitized.rejected.clone()));
        }
        if sanitized.truncated {
            signals.push(Signal::LimitReached);
        }
        signals
    }

    /// Keep the selection inside the value without touching the prefix rule
    fn clamp_selection(&mut self) {
        self.selection = self.selection.clamped(self.prefix_len(), self.len());
    }
}

// =============================================================================
// Insertion
// =============================================================================

impl ConstrainedTextField {
    /// Handle a single typed character with the caret at `caret_pos`.
    ///
    /// A non-empty selection starting at the caret is replaced. Typing inside
    /// the prefix is redirected to just after it, or blocked when the field
    /// does not redirect.
    pub fn on_character_typed(&mut self, ch: char, caret_pos: usize) -> Decision {
        let prefix_len = self.prefix_len();
        let caret_pos = caret_pos.min(self.len());

        if caret_pos < prefix_len {
            if !self.config.redirect_prefix_typing {
                tracing::debug!(caret_pos, "typing inside prefix blocked");
                self.selection = Selection::collapsed(prefix_len);
                return Decision::Rejected(Signal::Blocked);
            }
            if !self.config.is_char_allowed(ch) {
                tracing::debug!(?ch, "invalid character typed");
                return Decision::Rejected(Signal::InvalidCharacter(vec![ch]));
            }
            if self.config.would_exceed_max_length(self.editable_len(), 1) {
                return Decision::Rejected(Signal::LimitReached);
            }

            let mut editable = self.editable_value().to_string();
            editable.insert(0, ch);
            self.commit_live(&editable, 1);
            tracing::trace!(?ch, "typed character redirected past prefix");
            return Decision::Redirected;
        }

        if !self.config.is_char_allowed(ch) {
            tracing::debug!(?ch, "invalid character typed");
            return Decision::Rejected(Signal::InvalidCharacter(vec![ch]));
        }

        let sel = self.selection.clamped(prefix_len, self.len());
        let replacing = !sel.is_empty() && sel.start() == caret_pos;
        if !replacing && self.config.would_exceed_max_length(self.editable_len(), 1) {
            tracing::debug!(max = self.config.max_length, "field at length limit");
            return Decision::Rejected(Signal::LimitReached);
        }

        let range = if replacing {
            sel.start()..sel.end()
        } else {
            caret_pos..caret_pos
        };
        let mut candidate = self.buffer.clone();
        candidate.replace(range.clone(), &ch.to_string());

        let editable = candidate.slice_from(prefix_len).to_string();
        self.commit_live(&editable, range.start + 1 - prefix_len);
        Decision::Inserted
    }

    /// Paste `text` over `[selection_start, selection_end)`.
    ///
    /// The pasted text is trimmed and collapsed first, then the combined
    /// value is normalized again and cut to the length limit.
    pub fn on_paste(
        &mut self,
        text: &str,
        selection_start: usize,
        selection_end: usize,
    ) -> EditOutcome {
        let prefix_len = self.prefix_len();
        let len = self.len();
        let start = selection_start.min(selection_end).clamp(prefix_len, len);
        let end = selection_start.max(selection_end).clamp(prefix_len, len);
        self.splice(text, start, end)
    }

    /// Drop `text` onto the field. The text is always appended: a pointer
    /// position does not reliably reduce to a caret index.
    pub fn on_drop(&mut self, text: &str, _drop_position_hint: Option<usize>) -> EditOutcome {
        let len = self.len();
        let mut outcome = self.splice(text, len, len);
        self.selection = Selection::collapsed(self.len());
        outcome.selection = self.selection;
        outcome
    }

    fn splice(&mut self, text: &str, start: usize, end: usize) -> EditOutcome {
        let before = self.value().to_string();
        let prefix_len = self.prefix_len();
        let forced = SanitizeOptions::FINAL;

        let inserted = sanitize_tracked(&self.config, text, forced);

        let head = self.buffer.slice(prefix_len..start);
        let tail = self.buffer.slice(end..self.len());
        let combined = format!("{}{}{}", head, inserted.text, tail);
        let combined_caret = head.chars().count() + inserted.len();

        let sanitized = sanitize_tracked(&self.config, &combined, forced);
        self.commit(&sanitized, combined_caret);

        let mut signals = Vec::new();
        if !inserted.rejected.is_empty() {
            signals.push(Signal::InvalidCharacter(inserted.rejected.clone()));
        }
        if inserted.truncated || sanitized.truncated {
            tracing::debug!(max = self.config.max_length, "inserted text truncated");
            signals.push(Signal::LimitReached);
        }
        self.outcome(signals, &before)
    }

    /// Accept a full value produced outside the field (composed input,
    /// autofill) with the caret at `caret` in that value.
    ///
    /// Whitespace collapses but is not trimmed. The caret moves left by the
    /// number of characters removed before it.
    pub fn on_live_edit(&mut self, candidate: &str, caret: usize) -> EditOutcome {
        let before = self.value().to_string();
        let (editable, offset) = self.split_candidate(candidate);
        let editable_caret = caret.saturating_sub(offset);
        let sanitized = sanitize_tracked(&self.config, editable, SanitizeOptions::LIVE);
        self.commit(&sanitized, editable_caret);
        self.outcome(Self::signals_for(&sanitized), &before)
    }

    /// Replace the value programmatically; the caret goes to the end
    pub fn set_value(&mut self, value: &str) -> EditOutcome {
        let before = self.value().to_string();
        let (editable, _) = self.split_candidate(value);
        let sanitized = sanitize_tracked(&self.config, editable, SanitizeOptions::FINAL);
        self.commit(&sanitized, usize::MAX);
        self.outcome(Self::signals_for(&sanitized), &before)
    }
}

// =============================================================================
// Deletion
// =============================================================================

impl ConstrainedTextField {
    /// Delete the selection or the character before the caret (Backspace).
    /// Nothing before the prefix end can be deleted.
    pub fn on_backspace(&mut self) -> EditOutcome {
        let before = self.value().to_string();
        let prefix_len = self.prefix_len();

        if !self.selection.is_empty() {
            return self.delete_selection(&before);
        }

        let caret = self.selection.head.min(self.len());
        if caret <= prefix_len {
            if prefix_len > 0 {
                self.selection = Selection::collapsed(prefix_len);
                return self.outcome(vec![Signal::Blocked], &before);
            }
            return self.outcome(Vec::new(), &before);
        }

        let mut candidate = self.buffer.clone();
        candidate.remove(caret - 1..caret);
        let editable = candidate.slice_from(prefix_len).to_string();
        let sanitized = self.commit_live(&editable, caret - 1 - prefix_len);
        self.outcome(Self::signals_for(&sanitized), &before)
    }

    /// Delete the selection or the character after the caret (Delete key)
    pub fn on_delete_forward(&mut self) -> EditOutcome {
        let before = self.value().to_string();
        let prefix_len = self.prefix_len();

        if !self.selection.is_empty() {
            return self.delete_selection(&before);
        }

        let caret = self.selection.head.min(self.len());
        if caret < prefix_len {
            self.selection = Selection::collapsed(prefix_len);
            return self.outcome(vec![Signal::Blocked], &before);
        }
        if caret >= self.len() {
            return self.outcome(Vec::new(), &before);
        }

        let mut candidate = self.buffer.clone();
        candidate.remove(caret..caret + 1);
        let editable = candidate.slice_from(prefix_len).to_string();
        let sanitized = self.commit_live(&editable, caret - prefix_len);
        self.outcome(Self::signals_for(&sanitized), &before)
    }

    /// Delete the part of the selection that lies in the editable region
    fn delete_selection(&mut self, before: &str) -> EditOutcome {
        let prefix_len = self.prefix_len();
        let sel = self.selection.clamped(prefix_len, self.len());
        if sel.is_empty() {
            // Selection was entirely inside the prefix
            self.selection = Selection::collapsed(prefix_len);
            return self.outcome(vec![Signal::Blocked], before);
        }

        let mut candidate = self.buffer.clone();
        candidate.remove(sel.start()..sel.end());
        let editable = candidate.slice_from(prefix_len).to_string();
        let sanitized = self.commit_live(&editable, sel.start() - prefix_len);
        self.outcome(Self::signals_for(&sanitized), before)
    }
}

// =============================================================================
// Caret & selection
// =============================================================================

impl ConstrainedTextField {
    /// Clamp a caret/selection reported by the host.
    ///
    /// If either bound falls inside the prefix, both collapse to the prefix
    /// end; a selection can never straddle into the prefix.
    pub fn enforce_caret_bounds(&mut self, caret_start: usize, caret_end: usize) -> (usize, usize) {
        let prefix_len = self.prefix_len();
        let len = self.len();
        let start = caret_start.min(caret_end).min(len);
        let end = caret_start.max(caret_end).min(len);

        let (start, end) = if start < prefix_len || end < prefix_len {
            tracing::trace!(caret_start, caret_end, "caret pushed out of prefix");
            (prefix_len, prefix_len)
        } else {
            (start, end)
        };

        self.selection = if caret_end < caret_start {
            Selection::new(end, start)
        } else {
            Selection::new(start, end)
        };
        (start, end)
    }

    /// Select the editable region only
    pub fn select_all(&mut self) {
        self.selection = Selection::new(self.prefix_len(), self.len());
    }

    /// Move the caret, never into the prefix
    pub fn move_caret(&mut self, target: MoveTarget, extend_selection: bool) {
        let prefix_len = self.prefix_len();
        self.clamp_selection();
        let sel = self.selection;

        // Collapse an existing selection to the side being moved towards
        if !extend_selection && !sel.is_empty() {
            match target {
                MoveTarget::Left | MoveTarget::WordLeft => {
                    self.selection.collapse_to_start();
                    return;
                }
                MoveTarget::Right | MoveTarget::WordRight => {
                    self.selection.collapse_to_end();
                    return;
                }
                MoveTarget::LineStart | MoveTarget::LineEnd => {}
            }
        }

        let head = sel.head;
        let new_head = match target {
            MoveTarget::Left => head.saturating_sub(1).max(prefix_len),
            MoveTarget::Right => (head + 1).min(self.len()),
            MoveTarget::LineStart => prefix_len,
            MoveTarget::LineEnd => self.len(),
            MoveTarget::WordLeft => self.word_left_from(head),
            MoveTarget::WordRight => self.word_right_from(head),
        };

        if extend_selection {
            self.selection.extend_to(new_head);
        } else {
            self.selection = Selection::collapsed(new_head);
        }
    }

    fn word_left_from(&self, head: usize) -> usize {
        let prefix_len = self.prefix_len();
        let mut pos = head;

        // Skip any whitespace/punctuation first (moving backwards)
        while pos > prefix_len {
            match self.buffer.char_at(pos - 1) {
                Some(ch) if char_type(ch) == CharType::WordChar => break,
                _ => pos -= 1,
            }
        }

        // Then skip word characters
        while pos > prefix_len {
            match self.buffer.char_at(pos - 1) {
                Some(ch) if char_type(ch) != CharType::WordChar => break,
                _ => pos -= 1,
            }
        }

        pos
    }

    fn word_right_from(&self, head: usize) -> usize {
        let len = self.len();
        let mut pos = head;

        // Skip current word type
        if let Some(first_ch) = self.buffer.char_at(pos) {
            let start_type = char_type(first_ch);
            while pos < len {
                match self.buffer.char_at(pos) {
                    Some(ch) if char_type(ch) == start_type => pos += 1,
                    _ => break,
                }
            }
        }

        // Skip any following whitespace
        while pos < len {
            match self.buffer.char_at(pos) {
                Some(ch) if char_type(ch) == CharType::Whitespace => pos += 1,
                _ => break,
            }
        }

        pos
    }
}

// =============================================================================
// Focus, reconciliation, reset
// =============================================================================

impl ConstrainedTextField {
    /// Host focused the control; the caret is pushed out of the prefix
    pub fn on_focus(&mut self) -> (usize, usize) {
        self.focused = true;
        let sel = self.selection;
        self.enforce_caret_bounds(sel.anchor, sel.head)
    }

    /// Final normalization when the control loses focus (whitespace trimmed).
    /// Returns the final value.
    pub fn on_blur(&mut self) -> String {
        self.finalize().value
    }

    fn finalize(&mut self) -> EditOutcome {
        let before = self.value().to_string();
        let prefix_len = self.prefix_len();
        let editable = self.editable_value().to_string();
        let editable_caret = self.selection.head.saturating_sub(prefix_len);

        let sanitized = sanitize_tracked(&self.config, &editable, SanitizeOptions::FINAL);
        self.commit(&sanitized, editable_caret);
        self.focused = false;
        self.outcome(Self::signals_for(&sanitized), &before)
    }

    /// Periodic check of the value the host control currently shows.
    ///
    /// Returns the corrected value when the observed one changed since the
    /// last tick and is not valid; `None` otherwise. Ticking twice with the
    /// same value is a no-op.
    pub fn reconcile(&mut self, current_external_value: &str) -> Option<String> {
        if current_external_value == self.last_observed {
            if self.focused {
                self.clamp_selection();
            }
            return None;
        }
        self.last_observed = current_external_value.to_string();

        let (editable, _) = self.split_candidate(current_external_value);
        let sanitized = sanitize_tracked(&self.config, editable, SanitizeOptions::LIVE);

        let mut corrected = String::with_capacity(current_external_value.len());
        corrected.push_str(&self.config.prefix);
        corrected.push_str(&sanitized.text);

        self.buffer.set_content(&corrected);
        self.clamp_selection();

        if corrected != current_external_value {
            tracing::debug!(
                observed = current_external_value,
                corrected = corrected.as_str(),
                "reconcile corrected out-of-band edit"
            );
            Some(corrected)
        } else {
            None
        }
    }

    /// Form reset: back to the bare prefix
    pub fn reset(&mut self) {
        self.buffer.set_content(&self.config.prefix);
        self.selection = Selection::collapsed(self.prefix_len());
        self.last_observed = self.config.prefix.clone();
        self.focused = false;
    }
}

// =============================================================================
// Message dispatch
// =============================================================================

impl ConstrainedTextField {
    /// Apply a [`FieldMsg`] and report the resulting value and caret.
    pub fn update(&mut self, msg: FieldMsg) -> EditOutcome {
        let before = self.value().to_string();
        tracing::trace!(?msg, editing = msg.is_editing(), "field update");

        match msg {
            FieldMsg::TypeChar { ch, caret } => {
                let decision = self.on_character_typed(ch, caret);
                let signals = decision.signal().cloned().into_iter().collect();
                self.outcome(signals, &before)
            }
            FieldMsg::Paste { text, start, end } => self.on_paste(&text, start, end),
            FieldMsg::Drop { text, hint } => self.on_drop(&text, hint),
            FieldMsg::LiveEdit { value, caret } => self.on_live_edit(&value, caret),
            FieldMsg::DeleteBackward => self.on_backspace(),
            FieldMsg::DeleteForward => self.on_delete_forward(),
            FieldMsg::Move { target, extend } => {
                self.move_caret(target, extend);
                self.outcome(Vec::new(), &before)
            }
            FieldMsg::SelectAll => {
                self.select_all();
                self.outcome(Vec::new(), &before)
            }
            FieldMsg::SetSelection { start, end } => {
                self.enforce_caret_bounds(start, end);
                self.outcome(Vec::new(), &before)
            }
            FieldMsg::Focus => {
                self.on_focus();
                self.outcome(Vec::new(), &before)
            }
            FieldMsg::Blur => self.finalize(),
            FieldMsg::Reconcile { value } => {
                self.reconcile(&value);
                // Compare against what the host showed, not our previous value
                self.outcome(Vec::new(), &value)
            }
            FieldMsg::Reset => {
                self.reset();
                self.outcome(Vec::new(), &before)
            }
        }
    }
}
