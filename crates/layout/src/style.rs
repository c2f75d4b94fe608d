//! The subset of a text field's computed style that affects where glyphs land.
//!
//! Caret geometry is resolved by laying out a hidden copy (the "mirror") of the
//! field. For the mirror's marker to land where the real caret is, the mirror
//! must carry every property in [`MIRRORED_PROPERTIES`]; everything else
//! (colors, cursor, outline) is left at its default.

use crate::geometry::Edges;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    /// Font-dependent; resolved as `1.2 * font_size`.
    #[default]
    Normal,
    Px(f32),
    /// Unitless multiplier of the font size.
    Multiple(f32),
}

impl LineHeight {
    pub fn resolve(self, font_size: f32) -> f32 {
        match self {
            LineHeight::Normal => font_size * 1.2,
            LineHeight::Px(px) => px,
            LineHeight::Multiple(m) => font_size * m,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

/// `text-align` after `start`/`end` have been resolved against the direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhysicalAlign {
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    pub fn apply(self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_owned(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut at_word_start = true;
                for ch in text.chars() {
                    if at_word_start && ch.is_alphabetic() {
                        out.extend(ch.to_uppercase());
                        at_word_start = false;
                        continue;
                    }
                    out.push(ch);
                    if ch.is_whitespace() {
                        at_word_start = true;
                    } else if ch.is_alphanumeric() {
                        at_word_start = false;
                    }
                }
                out
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
}

/// Style of a single-line text field, in px.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldStyle {
    pub direction: Direction,
    pub box_sizing: BoxSizing,
    /// Fixed width of the box, if any. `None` means "as wide as the host rect".
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub border: Edges,
    pub padding: Edges,
    pub font_style: FontStyle,
    pub font_variant: FontVariant,
    pub font_weight: u16,
    /// Percentage, 100 = normal.
    pub font_stretch: f32,
    pub font_size: f32,
    pub line_height: LineHeight,
    pub font_family: String,
    pub text_align: TextAlign,
    pub text_transform: TextTransform,
    pub letter_spacing: f32,
    pub text_indent: f32,
    pub white_space: WhiteSpace,

    // Paint-only; never copied onto a mirror.
    pub color: [u8; 4],
    pub background_color: [u8; 4],
}

impl Default for FieldStyle {
    fn default() -> Self {
        Self {
            direction: Direction::Ltr,
            box_sizing: BoxSizing::ContentBox,
            width: None,
            height: None,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            border: Edges::ZERO,
            padding: Edges::ZERO,
            font_style: FontStyle::Normal,
            font_variant: FontVariant::Normal,
            font_weight: 400,
            font_stretch: 100.0,
            font_size: 16.0,
            line_height: LineHeight::Normal,
            font_family: "sans-serif".to_owned(),
            text_align: TextAlign::Start,
            text_transform: TextTransform::None,
            letter_spacing: 0.0,
            text_indent: 0.0,
            white_space: WhiteSpace::Normal,
            color: [0, 0, 0, 255],
            background_color: [0, 0, 0, 0],
        }
    }
}

impl FieldStyle {
    /// Defaults of a browser `<input type="text">`: 1px border, 2px/4px
    /// padding, clipped overflow, no wrapping.
    pub fn text_input() -> Self {
        Self {
            border: Edges::all(1.0),
            padding: Edges::symmetric(2.0, 4.0),
            overflow_x: Overflow::Clip,
            overflow_y: Overflow::Clip,
            white_space: WhiteSpace::Pre,
            background_color: [255, 255, 255, 255],
            ..Self::default()
        }
    }

    pub fn line_height_px(&self) -> f32 {
        self.line_height.resolve(self.font_size).max(0.0)
    }

    pub fn physical_align(&self) -> PhysicalAlign {
        match (self.text_align, self.direction) {
            (TextAlign::Left, _) => PhysicalAlign::Left,
            (TextAlign::Right, _) => PhysicalAlign::Right,
            (TextAlign::Center, _) => PhysicalAlign::Center,
            (TextAlign::Start, Direction::Ltr) | (TextAlign::End, Direction::Rtl) => {
                PhysicalAlign::Left
            }
            (TextAlign::Start, Direction::Rtl) | (TextAlign::End, Direction::Ltr) => {
                PhysicalAlign::Right
            }
        }
    }

    pub fn get(&self, prop: StyleProperty) -> StyleValue {
        use StyleProperty as P;
        use StyleValue as V;
        match prop {
            P::Direction => V::Direction(self.direction),
            P::BoxSizing => V::BoxSizing(self.box_sizing),
            P::Width => V::OptPx(self.width),
            P::Height => V::OptPx(self.height),
            P::OverflowX => V::Overflow(self.overflow_x),
            P::OverflowY => V::Overflow(self.overflow_y),
            P::BorderTopWidth => V::Px(self.border.top),
            P::BorderRightWidth => V::Px(self.border.right),
            P::BorderBottomWidth => V::Px(self.border.bottom),
            P::BorderLeftWidth => V::Px(self.border.left),
            P::PaddingTop => V::Px(self.padding.top),
            P::PaddingRight => V::Px(self.padding.right),
            P::PaddingBottom => V::Px(self.padding.bottom),
            P::PaddingLeft => V::Px(self.padding.left),
            P::FontStyle => V::FontStyle(self.font_style),
            P::FontVariant => V::FontVariant(self.font_variant),
            P::FontWeight => V::Weight(self.font_weight),
            P::FontStretch => V::Px(self.font_stretch),
            P::FontSize => V::Px(self.font_size),
            P::LineHeight => V::LineHeight(self.line_height),
            P::FontFamily => V::Family(self.font_family.clone()),
            P::TextAlign => V::TextAlign(self.text_align),
            P::TextTransform => V::TextTransform(self.text_transform),
            P::LetterSpacing => V::Px(self.letter_spacing),
            P::TextIndent => V::Px(self.text_indent),
            P::WhiteSpace => V::WhiteSpace(self.white_space),
        }
    }

    /// Assign one property. Mismatched value kinds are ignored.
    pub fn set(&mut self, prop: StyleProperty, value: StyleValue) {
        use StyleProperty as P;
        use StyleValue as V;
        match (prop, value) {
            (P::Direction, V::Direction(v)) => self.direction = v,
            (P::BoxSizing, V::BoxSizing(v)) => self.box_sizing = v,
            (P::Width, V::OptPx(v)) => self.width = v,
            (P::Height, V::OptPx(v)) => self.height = v,
            (P::OverflowX, V::Overflow(v)) => self.overflow_x = v,
            (P::OverflowY, V::Overflow(v)) => self.overflow_y = v,
            (P::BorderTopWidth, V::Px(v)) => self.border.top = v,
            (P::BorderRightWidth, V::Px(v)) => self.border.right = v,
            (P::BorderBottomWidth, V::Px(v)) => self.border.bottom = v,
            (P::BorderLeftWidth, V::Px(v)) => self.border.left = v,
            (P::PaddingTop, V::Px(v)) => self.padding.top = v,
            (P::PaddingRight, V::Px(v)) => self.padding.right = v,
            (P::PaddingBottom, V::Px(v)) => self.padding.bottom = v,
            (P::PaddingLeft, V::Px(v)) => self.padding.left = v,
            (P::FontStyle, V::FontStyle(v)) => self.font_style = v,
            (P::FontVariant, V::FontVariant(v)) => self.font_variant = v,
            (P::FontWeight, V::Weight(v)) => self.font_weight = v,
            (P::FontStretch, V::Px(v)) => self.font_stretch = v,
            (P::FontSize, V::Px(v)) => self.font_size = v,
            (P::LineHeight, V::LineHeight(v)) => self.line_height = v,
            (P::FontFamily, V::Family(v)) => self.font_family = v,
            (P::TextAlign, V::TextAlign(v)) => self.text_align = v,
            (P::TextTransform, V::TextTransform(v)) => self.text_transform = v,
            (P::LetterSpacing, V::Px(v)) => self.letter_spacing = v,
            (P::TextIndent, V::Px(v)) => self.text_indent = v,
            (P::WhiteSpace, V::WhiteSpace(v)) => self.white_space = v,
            (prop, value) => {
                log::debug!(target: "layout.caret", "ignoring {value:?} for {prop:?}");
            }
        }
    }

    /// A fresh style carrying only the layout-affecting properties of `self`.
    ///
    /// The mirror never wraps, whatever the field says: it stands in for a
    /// single-line input.
    pub fn mirror(&self) -> FieldStyle {
        let mut out = FieldStyle {
            color: [0, 0, 0, 0],
            background_color: [0, 0, 0, 0],
            ..FieldStyle::default()
        };
        for &prop in MIRRORED_PROPERTIES {
            out.set(prop, self.get(prop));
        }
        out.white_space = WhiteSpace::Pre;
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Direction,
    BoxSizing,
    Width,
    Height,
    OverflowX,
    OverflowY,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    FontStyle,
    FontVariant,
    FontWeight,
    FontStretch,
    FontSize,
    LineHeight,
    FontFamily,
    TextAlign,
    TextTransform,
    LetterSpacing,
    TextIndent,
    WhiteSpace,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Px(f32),
    OptPx(Option<f32>),
    Weight(u16),
    Direction(Direction),
    BoxSizing(BoxSizing),
    Overflow(Overflow),
    FontStyle(FontStyle),
    FontVariant(FontVariant),
    LineHeight(LineHeight),
    Family(String),
    TextAlign(TextAlign),
    TextTransform(TextTransform),
    WhiteSpace(WhiteSpace),
}

/// Everything that can move a glyph inside a single-line field.
pub const MIRRORED_PROPERTIES: &[StyleProperty] = &[
    StyleProperty::Direction,
    StyleProperty::BoxSizing,
    StyleProperty::Width,
    StyleProperty::Height,
    StyleProperty::OverflowX,
    StyleProperty::OverflowY,
    StyleProperty::BorderTopWidth,
    StyleProperty::BorderRightWidth,
    StyleProperty::BorderBottomWidth,
    StyleProperty::BorderLeftWidth,
    StyleProperty::PaddingTop,
    StyleProperty::PaddingRight,
    StyleProperty::PaddingBottom,
    StyleProperty::PaddingLeft,
    StyleProperty::FontStyle,
    StyleProperty::FontVariant,
    StyleProperty::FontWeight,
    StyleProperty::FontStretch,
    StyleProperty::FontSize,
    StyleProperty::LineHeight,
    StyleProperty::FontFamily,
    StyleProperty::TextAlign,
    StyleProperty::TextTransform,
    StyleProperty::LetterSpacing,
    StyleProperty::TextIndent,
    StyleProperty::WhiteSpace,
];
