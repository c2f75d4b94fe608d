//! Viewport-aware placement of a floating box next to an anchor.

use crate::geometry::{Rectangle, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Minimum distance kept between the box and every viewport edge.
    pub margin: f32,
    /// Distance between the anchor and the box.
    pub gap: f32,
    /// The box is never shrunk below this, unless the viewport itself is smaller.
    pub min_height: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 8.0,
            gap: 4.0,
            min_height: 100.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub rect: Rectangle,
    pub side: Side,
    /// The box did not fit on either side at its requested height.
    pub shrunk: bool,
}

/// Place a `size` box under (or over) `anchor`, starting `offset_x` px right
/// of the anchor's left edge.
///
/// Preference order: below at full height, above at full height, then the
/// roomier side with the height cut down to what fits (but not under
/// `min_height`). The result is always clamped so it stays `margin` px inside
/// the viewport; when the viewport is narrower or shorter than two margins the
/// box collapses to zero size at the margin.
pub fn place(
    anchor: Rectangle,
    offset_x: f32,
    size: Size,
    viewport: Size,
    cfg: &PlacementConfig,
) -> Placement {
    let margin = finite_or_zero(cfg.margin).max(0.0);
    let gap = finite_or_zero(cfg.gap).max(0.0);
    let min_height = finite_or_zero(cfg.min_height).max(0.0);
    let vw = finite_or_zero(viewport.width).max(0.0);
    let vh = finite_or_zero(viewport.height).max(0.0);
    let anchor = if anchor.is_finite() {
        anchor
    } else {
        log::debug!(target: "layout.placement", "non-finite anchor {anchor:?}");
        Rectangle::default()
    };

    let usable_w = (vw - 2.0 * margin).max(0.0);
    let usable_h = (vh - 2.0 * margin).max(0.0);

    // Horizontal: follow the caret, slide left if it would overflow.
    let width = finite_or_zero(size.width).max(0.0).min(usable_w);
    let mut x = anchor.left() + finite_or_zero(offset_x).max(0.0);
    if x + width > vw - margin {
        x = vw - width - margin;
    }
    x = x.max(margin);

    // Vertical: pick a side.
    let wanted_h = finite_or_zero(size.height).max(0.0);
    let space_below = vh - anchor.bottom();
    let space_above = anchor.top();
    let fits = |space: f32| space >= wanted_h + gap + margin;

    let (side, mut height, shrunk) = if fits(space_below) {
        (Side::Below, wanted_h, false)
    } else if fits(space_above) {
        (Side::Above, wanted_h, false)
    } else if space_below >= space_above {
        let h = (space_below - gap - margin).max(min_height);
        (Side::Below, h.min(wanted_h), true)
    } else {
        let h = (space_above - gap - margin).max(min_height);
        (Side::Above, h.min(wanted_h), true)
    };
    height = height.min(usable_h);

    let y = match side {
        Side::Below => anchor.bottom() + gap,
        Side::Above => anchor.top() - gap - height,
    };
    let y = y.min(vh - height - margin).max(margin);

    let rect = Rectangle {
        x,
        y,
        width,
        height,
    };
    log::trace!(target: "layout.placement", "{side:?} shrunk={shrunk} {rect:?} in {vw}x{vh}");

    Placement { rect, side, shrunk }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}
