//! Hidden "mirror" copies of a text field.
//!
//! A mirror is laid out at the field's position with the field's
//! layout-affecting style and the text before the caret, followed by a
//! zero-width marker. Wherever the host's layout puts the marker is where the
//! caret would be.

use crate::geometry::{Point, Rectangle};
use crate::style::{BoxSizing, Direction, FieldStyle, PhysicalAlign};
use crate::text::{TextMeasurer, shaped_width};

/// Content of the marker span; zero width so it never pushes the text.
pub const MARKER: char = '\u{200B}';

const NBSP: char = '\u{00A0}';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MirrorId(u64);

impl MirrorId {
    /// For [`MirrorHost`] implementations that mint their own ids.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A hidden, non-interactive copy of a field, ready to be attached to a host.
#[derive(Clone, Debug, PartialEq)]
pub struct Mirror {
    /// Border box of the field being mirrored, in viewport px.
    pub origin: Point,
    pub border_box_width: f32,
    pub border_box_height: f32,
    pub style: FieldStyle,
    /// Text before the caret with ordinary spaces swapped for NBSP, so a
    /// trailing space still takes room.
    pub prefix: String,
    pub scroll_left: f32,
}

impl Mirror {
    pub fn new(field_rect: Rectangle, style: &FieldStyle, prefix: &str, scroll_left: f32) -> Self {
        Self {
            origin: field_rect.origin(),
            border_box_width: field_rect.width.max(0.0),
            border_box_height: field_rect.height.max(0.0),
            style: style.mirror(),
            prefix: prefix.replace(' ', &NBSP.to_string()),
            scroll_left: if scroll_left.is_finite() { scroll_left } else { 0.0 },
        }
    }

    /// Prefix plus the marker, as inserted into a document-like host.
    pub fn content(&self) -> String {
        let mut s = String::with_capacity(self.prefix.len() + MARKER.len_utf8());
        s.push_str(&self.prefix);
        s.push(MARKER);
        s
    }

    /// Content box of the mirror, honoring `box-sizing` and a fixed width or
    /// height when the style has one.
    pub fn content_box(&self) -> Rectangle {
        let s = &self.style;
        let outer_w = match (s.width, s.box_sizing) {
            (Some(w), BoxSizing::ContentBox) => w + s.padding.horizontal() + s.border.horizontal(),
            (Some(w), BoxSizing::BorderBox) => w,
            (None, _) => self.border_box_width,
        };
        let outer_h = match (s.height, s.box_sizing) {
            (Some(h), BoxSizing::ContentBox) => h + s.padding.vertical() + s.border.vertical(),
            (Some(h), BoxSizing::BorderBox) => h,
            (None, _) => self.border_box_height,
        };
        Rectangle {
            x: self.origin.x + s.border.left + s.padding.left,
            y: self.origin.y + s.border.top + s.padding.top,
            width: (outer_w - s.padding.horizontal() - s.border.horizontal()).max(0.0),
            height: (outer_h - s.padding.vertical() - s.border.vertical()).max(0.0),
        }
    }
}

/// Something that can host mirrors and report where the marker lands.
///
/// A browser-like host inserts a hidden element into its document; a native
/// host can lay the mirror out itself (see [`MeasuringMirrorHost`]).
pub trait MirrorHost {
    fn attach(&mut self, mirror: Mirror) -> MirrorId;

    /// Viewport rect of the marker of an attached mirror, or `None` once it
    /// has been detached.
    fn marker_rect(&self, id: MirrorId) -> Option<Rectangle>;

    fn detach(&mut self, id: MirrorId) -> Option<Mirror>;

    /// Number of mirrors currently attached.
    fn attached(&self) -> usize;
}

/// Detaches its mirror when dropped, so an early return never leaks one.
pub struct MirrorGuard<'h> {
    host: &'h mut dyn MirrorHost,
    id: MirrorId,
}

impl<'h> MirrorGuard<'h> {
    pub fn attach(host: &'h mut dyn MirrorHost, mirror: Mirror) -> Self {
        let id = host.attach(mirror);
        Self { host, id }
    }

    pub fn marker_rect(&self) -> Option<Rectangle> {
        self.host.marker_rect(self.id)
    }
}

impl Drop for MirrorGuard<'_> {
    fn drop(&mut self) {
        if self.host.detach(self.id).is_none() {
            log::debug!(target: "layout.caret", "mirror {:?} already detached", self.id);
        }
    }
}

/// Lays mirrors out itself with a [`TextMeasurer`].
///
/// Single line: the marker sits after the shaped prefix, shifted by
/// alignment and indent and pulled back by the field's horizontal scroll.
/// Vertically the line box is centered in the content box, the same way the
/// field paints its text.
pub struct MeasuringMirrorHost<'m> {
    measurer: &'m dyn TextMeasurer,
    mirrors: Vec<(MirrorId, Mirror)>,
    next_id: u64,
}

impl<'m> MeasuringMirrorHost<'m> {
    pub fn new(measurer: &'m dyn TextMeasurer) -> Self {
        Self {
            measurer,
            mirrors: Vec::new(),
            next_id: 0,
        }
    }

    fn layout_marker(&self, mirror: &Mirror) -> Rectangle {
        let style = &mirror.style;
        let content = mirror.content_box();

        let prefix_w = shaped_width(self.measurer, &mirror.prefix, style);
        let line_w = prefix_w + style.text_indent;
        let free = (content.width - line_w).max(0.0);
        let line_left = content.x
            + match style.physical_align() {
                PhysicalAlign::Left => 0.0,
                PhysicalAlign::Right => free,
                PhysicalAlign::Center => free / 2.0,
            };

        // The end of the prefix is its right edge in LTR and its left edge in RTL.
        let x = match style.direction {
            Direction::Ltr => line_left + style.text_indent + prefix_w,
            Direction::Rtl => line_left,
        } - mirror.scroll_left;

        let line_h = self.measurer.line_height(style).max(0.0);
        let caret_h = if content.height > 0.0 {
            line_h.min(content.height)
        } else {
            line_h
        };
        let y = content.y + ((content.height - caret_h) / 2.0).max(0.0);

        Rectangle {
            x,
            y,
            width: 0.0,
            height: caret_h,
        }
    }
}

impl MirrorHost for MeasuringMirrorHost<'_> {
    fn attach(&mut self, mirror: Mirror) -> MirrorId {
        let id = MirrorId(self.next_id);
        self.next_id += 1;
        self.mirrors.push((id, mirror));
        id
    }

    fn marker_rect(&self, id: MirrorId) -> Option<Rectangle> {
        self.mirrors
            .iter()
            .find(|(mid, _)| *mid == id)
            .map(|(_, m)| self.layout_marker(m))
    }

    fn detach(&mut self, id: MirrorId) -> Option<Mirror> {
        let pos = self.mirrors.iter().position(|(mid, _)| *mid == id)?;
        Some(self.mirrors.swap_remove(pos).1)
    }

    fn attached(&self) -> usize {
        self.mirrors.len()
    }
}
