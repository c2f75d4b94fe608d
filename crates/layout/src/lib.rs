//! # layout
//!
//! Geometry for the mention control, independent of any rendering backend:
//! - [`FieldStyle`]: the layout-affecting style of a single-line field
//! - [`TextMeasurer`]: injected glyph measurement
//! - [`caret_point`]: caret position via a hidden mirror of the field
//! - [`place`]: viewport-aware placement of the menu box

mod caret;
mod geometry;
mod mirror;
mod placement;
mod style;
mod text;

pub use caret::{CaretError, FieldView, TextField, caret_offset_from_left, caret_point};
pub use geometry::{Edges, Point, Rectangle, Size};
pub use mirror::{MARKER, MeasuringMirrorHost, Mirror, MirrorGuard, MirrorHost, MirrorId};
pub use placement::{Placement, PlacementConfig, Side, place};
pub use style::{
    BoxSizing, Direction, FieldStyle, FontStyle, FontVariant, LineHeight, MIRRORED_PROPERTIES,
    Overflow, PhysicalAlign, StyleProperty, StyleValue, TextAlign, TextTransform, WhiteSpace,
};
pub use text::{FixedAdvanceMeasurer, TextMeasurer, shaped_width};
