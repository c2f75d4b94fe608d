//! UTF-8 caret utilities.
//!
//! Every offset handed to the mention engine by a host may be stale or point
//! into the middle of a multi-byte character; these helpers snap such offsets
//! to valid caret positions instead of faulting.

use std::borrow::Cow;

/// Clamp a byte index into `0..=s.len()` and back onto a character boundary.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// The caret position one character before `i` (0 at the start).
///
/// ```
/// use input_core::prev_cursor_boundary;
///
/// assert_eq!(prev_cursor_boundary("a€b", 4), 1);
/// assert_eq!(prev_cursor_boundary("a€b", 0), 0);
/// ```
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().next_back().map_or(0, |(idx, _)| idx)
}

/// The caret position one character after `i` (`s.len()` at the end).
///
/// ```
/// use input_core::next_cursor_boundary;
///
/// assert_eq!(next_cursor_boundary("a€b", 1), 4);
/// assert_eq!(next_cursor_boundary("a€b", 5), 5);
/// ```
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map_or(s.len(), |ch| i + ch.len_utf8())
}

/// Collect every caret position of `value`, including `0` and `value.len()`.
pub fn rebuild_cursor_boundaries(value: &str, out: &mut Vec<usize>) {
    out.clear();
    out.extend(value.char_indices().map(|(i, _)| i));
    out.push(value.len());
    if out.first().copied() != Some(0) {
        out.insert(0, 0);
    }
}

/// Strip CR/LF so pasted text stays on the single line of the field.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("@ali\r\nce"), "@alice");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !matches!(c, '\n' | '\r')).collect())
}

/// Map an x coordinate (relative to the text origin) back to the nearest
/// caret position, using `measure_prefix` to size candidate prefixes.
///
/// `boundaries` must come from [`rebuild_cursor_boundaries`] for `value`.
pub fn caret_from_x_with_boundaries(
    value: &str,
    boundaries: &[usize],
    x: f32,
    mut measure_prefix: impl FnMut(&str) -> f32,
) -> usize {
    if value.is_empty() || boundaries.is_empty() {
        return 0;
    }

    let x = x.max(0.0);

    // Largest boundary whose prefix width is still <= x.
    let mut lo = 0usize;
    let mut hi = boundaries.len() - 1;
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if measure_prefix(&value[..boundaries[mid]]).max(0.0) <= x {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let left_idx = boundaries[lo];
    let Some(&right_idx) = boundaries.get(lo + 1) else {
        return left_idx;
    };

    // Snap to whichever neighbour is closer.
    let left_w = measure_prefix(&value[..left_idx]).max(0.0);
    let right_w = measure_prefix(&value[..right_idx]).max(0.0);
    if x - left_w > right_w - x {
        right_idx
    } else {
        left_idx
    }
}

/// [`caret_from_x_with_boundaries`] for a one-off lookup.
pub fn caret_from_x(value: &str, x: f32, measure_prefix: impl FnMut(&str) -> f32) -> usize {
    let mut boundaries = Vec::new();
    rebuild_cursor_boundaries(value, &mut boundaries);
    caret_from_x_with_boundaries(value, &boundaries, x, measure_prefix)
}
