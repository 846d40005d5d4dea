//! Caret and selection for a single-line field.

use serde::Serialize;

/// A selection with anchor (fixed point) and head (caret), both char offsets.
/// A collapsed selection is a plain caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the caret is (moving point)
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn collapsed(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start offset (minimum of anchor and head)
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end offset (maximum of anchor and head)
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Extend selection to new head position
    pub fn extend_to(&mut self, pos: usize) {
        self.head = pos;
    }

    /// Collapse selection to start position
    pub fn collapse_to_start(&mut self) {
        let start = self.start();
        self.anchor = start;
        self.head = start;
    }

    /// Collapse selection to end position
    pub fn collapse_to_end(&mut self) {
        let end = self.end();
        self.anchor = end;
        self.head = end;
    }

    /// Clamp both ends into `[min, max]`
    pub fn clamped(&self, min: usize, max: usize) -> Self {
        let clamp = |v: usize| v.clamp(min, max.max(min));
        Self {
            anchor: clamp(self.anchor),
            head: clamp(self.head),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(5);
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(2, 7);
        assert_eq!(forward.start(), 2);
        assert_eq!(forward.end(), 7);
        assert_eq!(forward.len(), 5);

        let backward = Selection::new(7, 2);
        assert_eq!(backward.start(), 2);
        assert_eq!(backward.end(), 7);
        assert_eq!(backward.head, 2);
    }

    #[test]
    fn test_selection_collapse() {
        let mut sel = Selection::new(0, 10);
        sel.collapse_to_end();
        assert!(sel.is_empty());
        assert_eq!(sel.head, 10);

        let mut sel2 = Selection::new(10, 0);
        sel2.collapse_to_start();
        assert_eq!(sel2.head, 0);
        assert_eq!(sel2.anchor, 0);
    }

    #[test]
    fn test_selection_extend() {
        let mut sel = Selection::collapsed(3);
        sel.extend_to(8);
        assert_eq!(sel.anchor, 3);
        assert_eq!(sel.head, 8);
    }

    #[test]
    fn test_selection_clamped() {
        let sel = Selection::new(2, 40).clamped(10, 25);
        assert_eq!(sel, Selection::new(10, 25));
    }
}
