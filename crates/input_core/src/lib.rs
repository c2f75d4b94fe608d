//! # input_core
//!
//! UI-agnostic editing state for the single-line mention field.
//!
//! This crate provides:
//! - [`TextBuffer`]: the field's value, byte caret, selection anchor and
//!   horizontal scroll offset (the InputState of the mention control)
//! - [`EditCommand`] / [`EditOutcome`]: the edit vocabulary a host routes key
//!   and pointer events into, and what each edit changed
//! - [`SelectionRange`]: a normalized byte range
//!
//! ## Design Principles
//!
//! Offsets are UTF-8 byte indices and are always kept on character
//! boundaries. Nothing here measures text or knows about a rendering backend;
//! measurement is injected as a closure where a pixel position must be turned
//! back into a caret (see [`caret_from_x_with_boundaries`]).

mod buffer;
mod selection;
mod text;

pub use buffer::{EditCommand, EditOutcome, TextBuffer};
pub use selection::SelectionRange;

pub use text::{
    caret_from_x, caret_from_x_with_boundaries, clamp_to_char_boundary, filter_single_line,
    next_cursor_boundary, prev_cursor_boundary, rebuild_cursor_boundaries,
};

