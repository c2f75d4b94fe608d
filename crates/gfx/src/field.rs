//! The single-line text field: geometry, painting and horizontal scroll.

use egui::{Align2, Color32, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};
use input_core::{TextBuffer, caret_from_x, clamp_to_char_boundary};
use layout::{FieldStyle, Rectangle, TextMeasurer, shaped_width};

use crate::text_measurer::{color32, font_id};

/// Height of a field whose content box holds exactly one line.
pub(crate) fn field_height(style: &FieldStyle, measurer: &dyn TextMeasurer) -> f32 {
    measurer.line_height(style).max(1.0) + style.padding.vertical() + style.border.vertical()
}

/// Content box of a field painted in `rect`.
pub(crate) fn content_rect(rect: Rect, style: &FieldStyle) -> Rect {
    let min = Pos2::new(
        rect.min.x + style.border.left + style.padding.left,
        rect.min.y + style.border.top + style.padding.top,
    );
    let max = Pos2::new(
        (rect.max.x - style.border.right - style.padding.right).max(min.x),
        (rect.max.y - style.border.bottom - style.padding.bottom).max(min.y),
    );
    Rect::from_min_max(min, max)
}

/// egui rect in screen points to a viewport rectangle.
pub(crate) fn to_viewport(rect: Rect, screen: Rect) -> Rectangle {
    Rectangle::new(
        rect.min.x - screen.min.x,
        rect.min.y - screen.min.y,
        rect.width(),
        rect.height(),
    )
}

pub(crate) fn from_viewport(r: Rectangle, screen: Rect) -> Rect {
    Rect::from_min_size(
        Pos2::new(r.x + screen.min.x, r.y + screen.min.y),
        Vec2::new(r.width, r.height),
    )
}

/// Byte caret nearest to the pointer at `pos`.
pub(crate) fn caret_at_pointer(
    rect: Rect,
    pos: Pos2,
    buffer: &TextBuffer,
    style: &FieldStyle,
    measurer: &dyn TextMeasurer,
) -> usize {
    let inner = content_rect(rect, style);
    let x = pos.x - inner.min.x - style.text_indent + buffer.scroll_x();
    caret_from_x(buffer.value(), x, |prefix| shaped_width(measurer, prefix, style))
}

/// `(caret_px, text_w, available_w)` for keeping the caret in view.
pub(crate) fn scroll_metrics(
    rect: Rect,
    buffer: &TextBuffer,
    style: &FieldStyle,
    measurer: &dyn TextMeasurer,
) -> (f32, f32, f32) {
    let value = buffer.value();
    let caret = clamp_to_char_boundary(value, buffer.caret());
    let available_w = (content_rect(rect, style).width() - style.text_indent).max(0.0);
    (
        shaped_width(measurer, &value[..caret], style),
        shaped_width(measurer, value, style),
        available_w,
    )
}

pub(crate) struct FieldPaint<'a> {
    pub painter: &'a Painter,
    pub measurer: &'a dyn TextMeasurer,
    pub focused: bool,
    pub focus_stroke: Stroke,
    pub selection_fill: Color32,
}

pub(crate) fn paint_field(
    rect: Rect,
    style: &FieldStyle,
    buffer: &TextBuffer,
    placeholder: &str,
    ctx: FieldPaint<'_>,
) {
    let FieldPaint {
        painter,
        measurer,
        focused,
        focus_stroke,
        selection_fill,
    } = ctx;

    let text_color = color32(style.color);
    painter.rect_filled(rect, 2.0, color32(style.background_color));
    let border = if focused {
        focus_stroke
    } else {
        Stroke::new(style.border.top.max(1.0), text_color.gamma_multiply(0.4))
    };
    painter.rect_stroke(rect, 2.0, border, StrokeKind::Inside);

    let inner = content_rect(rect, style);
    let line_h = measurer.line_height(style);
    let caret_h = line_h.min(inner.height()).max(1.0);
    let text_y = inner.min.y + ((inner.height() - caret_h) * 0.5).max(0.0);

    let value = buffer.value();
    let is_placeholder = value.is_empty();
    let clip_painter = painter.with_clip_rect(inner);

    let scroll_x = if is_placeholder { 0.0 } else { buffer.scroll_x() };
    let text_x = inner.min.x + style.text_indent - scroll_x;

    if let Some(sel) = buffer.selection().filter(|s| !s.is_empty()) {
        let x0 = shaped_width(measurer, &value[..sel.start], style);
        let x1 = shaped_width(measurer, &value[..sel.end], style);
        let sel_rect = Rect::from_min_max(
            Pos2::new(text_x + x0, text_y),
            Pos2::new(text_x + x1, text_y + caret_h),
        );
        clip_painter.rect_filled(sel_rect, 0.0, selection_fill);
    }

    let (paint_text, paint_color) = if is_placeholder {
        (placeholder.to_owned(), text_color.gamma_multiply(0.6))
    } else {
        (style.text_transform.apply(value), text_color)
    };
    clip_painter.text(
        Pos2::new(text_x, text_y),
        Align2::LEFT_TOP,
        paint_text,
        font_id(style),
        paint_color,
    );

    if focused {
        let caret = clamp_to_char_boundary(value, buffer.caret());
        let caret_x = text_x + shaped_width(measurer, &value[..caret], style);
        let caret_max_x = (inner.max.x - 1.0).max(inner.min.x);
        let caret_x = caret_x.clamp(inner.min.x, caret_max_x).round();
        let caret_rect = Rect::from_min_size(Pos2::new(caret_x, text_y), Vec2::new(1.0, caret_h));
        clip_painter.rect_filled(caret_rect, 0.0, text_color);
    }
}
