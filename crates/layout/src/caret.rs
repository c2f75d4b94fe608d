use thiserror::Error;

use crate::geometry::{Point, Rectangle};
use crate::mirror::{Mirror, MirrorGuard, MirrorHost};
use crate::style::FieldStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaretError {
    #[error("text field is not mounted")]
    Unmounted,
    #[error("caret marker was detached before it could be measured")]
    MarkerDetached,
}

/// What caret resolution needs to know about a live text field.
pub trait TextField {
    /// Border box in viewport px; `None` while the field is not mounted.
    fn bounding_rect(&self) -> Option<Rectangle>;
    fn value(&self) -> &str;
    fn style(&self) -> &FieldStyle;

    /// Horizontal scroll of the field's content, in px.
    fn scroll_left(&self) -> f32 {
        0.0
    }
}

/// A borrowed snapshot of a field, for hosts that keep the pieces apart.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    pub rect: Option<Rectangle>,
    pub value: &'a str,
    pub style: &'a FieldStyle,
    pub scroll_left: f32,
}

impl TextField for FieldView<'_> {
    fn bounding_rect(&self) -> Option<Rectangle> {
        self.rect
    }

    fn value(&self) -> &str {
        self.value
    }

    fn style(&self) -> &FieldStyle {
        self.style
    }

    fn scroll_left(&self) -> f32 {
        self.scroll_left
    }
}

/// Viewport position of the caret placed before byte `offset` of the field's
/// value.
///
/// `offset` is clamped into the value (and back onto a char boundary). The
/// mirror used for measuring is always detached before returning, on success
/// and on error alike.
pub fn caret_point(
    field: Option<&dyn TextField>,
    offset: usize,
    host: &mut dyn MirrorHost,
) -> Result<Point, CaretError> {
    let field = field.ok_or(CaretError::Unmounted)?;
    let rect = field.bounding_rect().ok_or(CaretError::Unmounted)?;

    let value = field.value();
    let offset = clamp_offset(value, offset);
    let mirror = Mirror::new(rect, field.style(), &value[..offset], field.scroll_left());

    let guard = MirrorGuard::attach(host, mirror);
    let marker = guard.marker_rect().ok_or(CaretError::MarkerDetached)?;
    drop(guard);

    log::trace!(target: "layout.caret", "caret at byte {offset}: ({}, {})", marker.x, marker.y);
    Ok(Point::new(marker.x, marker.y))
}

/// Distance of the caret from the field's left border edge, floored at 0.
///
/// This is the horizontal offset a menu anchored on the field needs to line
/// up with the caret.
pub fn caret_offset_from_left(
    field: Option<&dyn TextField>,
    offset: usize,
    host: &mut dyn MirrorHost,
) -> Result<f32, CaretError> {
    let point = caret_point(field, offset, host)?;
    // caret_point already proved the field is mounted.
    let left = field
        .and_then(|f| f.bounding_rect())
        .map_or(point.x, |r| r.left());
    Ok((point.x - left).max(0.0))
}

// Same rule as input_core::clamp_to_char_boundary; layout sits below input_core.
fn clamp_offset(value: &str, offset: usize) -> usize {
    let mut offset = offset.min(value.len());
    while offset > 0 && !value.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
