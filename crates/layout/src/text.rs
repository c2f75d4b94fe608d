use crate::style::FieldStyle;

/// Layout can depend on this without knowing about egui, wgpu, etc.
pub trait TextMeasurer {
    /// Return the width of `text` in px when rendered with `style`.
    ///
    /// Letter spacing and text transform are applied by the caller; this
    /// measures the glyph run as given.
    fn measure(&self, text: &str, style: &FieldStyle) -> f32;

    /// Return the line-height in px for the given `style`.
    fn line_height(&self, style: &FieldStyle) -> f32 {
        style.line_height_px()
    }
}

/// Every character advances by `font_size * ratio`.
///
/// Deterministic stand-in for a font backend in headless hosts, benches and
/// tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMeasurer {
    pub ratio: f32,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { ratio: 0.5 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: &FieldStyle) -> f32 {
        text.chars().count() as f32 * style.font_size * self.ratio
    }
}

/// Width of `text` as the field would lay it out: transform, then glyph run,
/// then one `letter_spacing` per character.
pub fn shaped_width(measurer: &dyn TextMeasurer, text: &str, style: &FieldStyle) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let shaped = style.text_transform.apply(text);
    let spacing = style.letter_spacing * shaped.chars().count() as f32;
    (measurer.measure(&shaped, style) + spacing).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextTransform;

    #[test]
    fn fixed_advance_counts_chars_not_bytes() {
        let m = FixedAdvanceMeasurer::default();
        let style = FieldStyle {
            font_size: 10.0,
            ..FieldStyle::default()
        };
        assert_eq!(m.measure("a€", &style), 10.0);
        assert_eq!(m.line_height(&style), 12.0);
    }

    #[test]
    fn shaped_width_adds_letter_spacing_after_transform() {
        let m = FixedAdvanceMeasurer { ratio: 1.0 };
        let style = FieldStyle {
            font_size: 4.0,
            letter_spacing: 1.0,
            // 'ß' uppercases to "SS": one more character to space out.
            text_transform: TextTransform::Uppercase,
            ..FieldStyle::default()
        };
        assert_eq!(shaped_width(&m, "aß", &style), 3.0 * 4.0 + 3.0);
        assert_eq!(shaped_width(&m, "", &style), 0.0);
    }
}
