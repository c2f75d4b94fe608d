//! Selection ranges inside the field value.

use crate::text::clamp_to_char_boundary;

/// A byte range of selected text, normalized so `start <= end`.
///
/// Ranges produced by [`TextBuffer`](crate::TextBuffer) always sit on
/// character boundaries of the value they were taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Build a range from an anchor and a caret, or `None` when they coincide
    /// once clamped to `value`.
    pub fn between(value: &str, anchor: usize, caret: usize) -> Option<Self> {
        let a = clamp_to_char_boundary(value, anchor);
        let c = clamp_to_char_boundary(value, caret);
        (a != c).then(|| Self::new(a, c))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if `offset` lies inside the range (end exclusive).
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// The selected substring, or `""` if the range does not fit `value`.
    pub fn slice<'a>(&self, value: &'a str) -> &'a str {
        value.get(self.start..self.end).unwrap_or("")
    }
}
