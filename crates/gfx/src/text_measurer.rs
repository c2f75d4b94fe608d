use std::cell::RefCell;
use std::collections::HashMap;

use egui::{Color32, Context, FontId};
use layout::{FieldStyle, TextMeasurer};

/// `egui`-backed adapter for measuring text during caret resolution and
/// field painting.
pub struct EguiTextMeasurer {
    ctx: Context,
    space_width_cache: RefCell<HashMap<u32, f32>>,
}

impl EguiTextMeasurer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            space_width_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn space_width(&self, font_id: &FontId, color: Color32) -> f32 {
        // `Color32` does not affect text metrics; cache width per font size.
        let key = font_id.size.round().max(0.0) as u32;
        if let Some(w) = self.space_width_cache.borrow().get(&key).copied() {
            return w;
        }

        // NBSP is the most stable in egui; plain spaces at the end of a run
        // can measure as zero.
        let nbsp = "\u{00A0}";
        let w_nbsp = self.ctx.fonts(|f| {
            f.layout_no_wrap(nbsp.to_owned(), font_id.clone(), color)
                .rect
                .width()
        });

        let w = if w_nbsp.is_finite() && w_nbsp > 0.0 {
            w_nbsp
        } else {
            // Difference method as fallback (chars with low kerning risk).
            let w_with = self.ctx.fonts(|f| {
                f.layout_no_wrap(format!("x{nbsp}x"), font_id.clone(), color)
                    .rect
                    .width()
            });
            let w_without = self.ctx.fonts(|f| {
                f.layout_no_wrap("xx".to_owned(), font_id.clone(), color)
                    .rect
                    .width()
            });
            let w = (w_with - w_without).max(0.0);

            if w.is_finite() && w > 0.0 {
                w
            } else {
                (font_id.size * 0.33).max(1.0)
            }
        };

        self.space_width_cache.borrow_mut().insert(key, w);
        w
    }
}

impl TextMeasurer for EguiTextMeasurer {
    fn measure(&self, text: &str, style: &FieldStyle) -> f32 {
        let font_id = font_id(style);
        let color = color32(style.color);

        if text == " " || text == "\u{00A0}" {
            return self.space_width(&font_id, color);
        }

        self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), font_id, color)
                .rect
                .width()
        })
    }
}

/// egui only ships a proportional and a monospace family.
pub(crate) fn font_id(style: &FieldStyle) -> FontId {
    let px = if style.font_size.is_finite() {
        style.font_size.max(1.0)
    } else {
        16.0
    };
    if style.font_family.to_ascii_lowercase().contains("mono") {
        FontId::monospace(px)
    } else {
        FontId::proportional(px)
    }
}

pub(crate) fn color32([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}
