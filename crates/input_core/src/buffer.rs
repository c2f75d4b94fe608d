//! The single-line buffer behind the mention field.
//!
//! The buffer is UI-agnostic: it does not perform layout or text measurement.
//! Hosts translate key presses into [`EditCommand`]s and pointer positions into
//! byte offsets, then read back what changed from the returned [`EditOutcome`].

use crate::selection::SelectionRange;
use crate::text::{
    clamp_to_char_boundary, filter_single_line, next_cursor_boundary, prev_cursor_boundary,
};

/// One edit routed into a [`TextBuffer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditCommand {
    /// Insert text at the caret, replacing the selection if any.
    Insert(String),
    Backspace,
    Delete,
    CaretLeft { selecting: bool },
    CaretRight { selecting: bool },
    CaretHome { selecting: bool },
    CaretEnd { selecting: bool },
    SetCaret { offset: usize, selecting: bool },
    SelectAll,
}

/// What an edit changed.
///
/// A caret move without a text change is what a browser would report as a
/// `selectionchange` without an `input` event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditOutcome {
    pub text_changed: bool,
    pub caret_moved: bool,
}

impl EditOutcome {
    #[inline]
    pub fn is_noop(&self) -> bool {
        !self.text_changed && !self.caret_moved
    }
}

/// Value, caret, selection and horizontal scroll of the mention field.
///
/// # Example
///
/// ```
/// use input_core::{EditCommand, TextBuffer};
///
/// let mut buf = TextBuffer::new();
/// buf.apply(EditCommand::Insert("hi @bo".into()));
/// assert_eq!(buf.value(), "hi @bo");
/// assert_eq!(buf.caret(), 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    value: String,
    /// Byte caret, always on a char boundary of `value`.
    caret: usize,
    /// When set, the selection spans `anchor..caret` (normalized).
    selection_anchor: Option<usize>,
    /// Horizontal scroll in px, so a long value keeps the caret in view.
    scroll_x: f32,
    /// Incremented on every text change.
    revision: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `value` with the caret at the end.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut buf = Self::new();
        buf.set_value(value.into(), usize::MAX);
        buf
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn scroll_x(&self) -> f32 {
        self.scroll_x
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.selection_anchor?;
        SelectionRange::between(&self.value, anchor, self.caret)
    }

    /// Replace the whole value (e.g. a native field reporting its contents)
    /// and place the caret, clamped to the new value.
    ///
    /// Returns what changed relative to the previous state.
    pub fn set_value(&mut self, value: String, caret: usize) -> EditOutcome {
        let value = if value.contains(['\n', '\r']) {
            filter_single_line(&value).into_owned()
        } else {
            value
        };
        let text_changed = value != self.value;
        let caret = clamp_to_char_boundary(&value, caret);
        let caret_moved = caret != self.caret;

        self.value = value;
        self.caret = caret;
        self.selection_anchor = None;
        if text_changed {
            self.bump_revision();
        }
        EditOutcome {
            text_changed,
            caret_moved,
        }
    }

    /// Remove `range` from the value and put the caret where it started.
    pub fn remove_range(&mut self, start: usize, end: usize) -> EditOutcome {
        let start = clamp_to_char_boundary(&self.value, start);
        let end = clamp_to_char_boundary(&self.value, end).max(start);
        let before = self.caret;
        if start < end {
            self.value.drain(start..end);
            self.bump_revision();
        }
        self.caret = start;
        self.selection_anchor = None;
        EditOutcome {
            text_changed: start < end,
            caret_moved: before != start,
        }
    }

    /// Empty the field and reset caret, selection and scroll.
    pub fn clear(&mut self) -> EditOutcome {
        let outcome = EditOutcome {
            text_changed: !self.value.is_empty(),
            caret_moved: self.caret != 0,
        };
        if outcome.text_changed {
            self.value.clear();
            self.bump_revision();
        }
        self.caret = 0;
        self.selection_anchor = None;
        self.scroll_x = 0.0;
        outcome
    }

    pub fn apply(&mut self, cmd: EditCommand) -> EditOutcome {
        let rev_before = self.revision;
        let caret_before = self.caret;
        self.clamp_state();

        match cmd {
            EditCommand::Insert(s) => self.insert(&s),
            EditCommand::Backspace => {
                if !self.delete_selection() && self.caret > 0 {
                    let prev = prev_cursor_boundary(&self.value, self.caret);
                    self.value.drain(prev..self.caret);
                    self.caret = prev;
                    self.bump_revision();
                }
            }
            EditCommand::Delete => {
                if !self.delete_selection() && self.caret < self.value.len() {
                    let next = next_cursor_boundary(&self.value, self.caret);
                    self.value.drain(self.caret..next);
                    self.bump_revision();
                }
            }
            EditCommand::CaretLeft { selecting } => {
                let target = match (selecting, self.selection()) {
                    (false, Some(sel)) => sel.start,
                    _ => prev_cursor_boundary(&self.value, self.caret),
                };
                self.move_caret(target, selecting);
            }
            EditCommand::CaretRight { selecting } => {
                let target = match (selecting, self.selection()) {
                    (false, Some(sel)) => sel.end,
                    _ => next_cursor_boundary(&self.value, self.caret),
                };
                self.move_caret(target, selecting);
            }
            EditCommand::CaretHome { selecting } => self.move_caret(0, selecting),
            EditCommand::CaretEnd { selecting } => self.move_caret(self.value.len(), selecting),
            EditCommand::SetCaret { offset, selecting } => {
                let offset = clamp_to_char_boundary(&self.value, offset);
                self.move_caret(offset, selecting);
            }
            EditCommand::SelectAll => {
                self.caret = self.value.len();
                self.selection_anchor = Some(0);
                self.normalize_anchor();
            }
        }

        EditOutcome {
            text_changed: self.revision != rev_before,
            caret_moved: self.caret != caret_before,
        }
    }

    /// Keep the caret visible inside a viewport of `available_w` px.
    ///
    /// `caret_px` and `text_w` are in text coordinates (unscrolled). The scroll
    /// only moves once the caret leaves a 4 px inset, so typing does not
    /// re-center the text on every keystroke.
    pub fn update_scroll_for_caret(&mut self, caret_px: f32, text_w: f32, available_w: f32) {
        let available_w = available_w.max(0.0);
        let text_w = text_w.max(0.0);
        let caret_px = caret_px.clamp(0.0, text_w);

        if available_w <= 0.0 || text_w <= available_w {
            self.scroll_x = 0.0;
            return;
        }

        let max_scroll = text_w - available_w;
        let mut scroll_x = self.scroll_x.clamp(0.0, max_scroll);

        let margin: f32 = 4.0;
        let left_limit = margin.min(available_w);
        let right_limit = (available_w - margin).max(left_limit);

        let caret_in_view = caret_px - scroll_x;
        if caret_in_view < left_limit {
            scroll_x = (caret_px - left_limit).max(0.0);
        } else if caret_in_view > right_limit {
            scroll_x = (caret_px - right_limit).min(max_scroll);
        }

        self.scroll_x = scroll_x;
    }

    fn insert(&mut self, s: &str) {
        let s = filter_single_line(s);
        if s.is_empty() {
            return;
        }
        self.delete_selection();
        self.value.insert_str(self.caret, &s);
        self.caret += s.len();
        self.bump_revision();
    }

    fn move_caret(&mut self, target: usize, selecting: bool) {
        if selecting {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.caret);
            }
            self.caret = target;
            self.normalize_anchor();
        } else {
            self.caret = target;
            self.selection_anchor = None;
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some(sel) = self.selection() else {
            self.selection_anchor = None;
            return false;
        };
        self.value.drain(sel.start..sel.end);
        self.caret = sel.start;
        self.selection_anchor = None;
        self.bump_revision();
        true
    }

    fn normalize_anchor(&mut self) {
        // A collapsed selection must not stick around as an anchor.
        if self
            .selection_anchor
            .is_some_and(|a| clamp_to_char_boundary(&self.value, a) == self.caret)
        {
            self.selection_anchor = None;
        }
    }

    fn clamp_state(&mut self) {
        self.caret = clamp_to_char_boundary(&self.value, self.caret);
        if let Some(a) = self.selection_anchor {
            self.selection_anchor = Some(clamp_to_char_boundary(&self.value, a));
        }
        self.scroll_x = self.scroll_x.max(0.0);
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
