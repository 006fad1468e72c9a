//! Per-element-type style record.

use super::properties::{Color, FontWeight, HorizontalAlignment, TextAlignment, Thickness};

/// Smallest font size a record will hold.
pub const MIN_FONT_SIZE: f64 = 8.0;
/// Largest font size a record will hold.
pub const MAX_FONT_SIZE: f64 = 100.0;
/// Font size used when none is given.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;
/// Upper bound for table cell spacing.
pub const MAX_SPACING: f64 = 50.0;

/// Visual settings applied to output elements created for one source tag.
///
/// The `id` is the lowercase tag name the record applies to (`"h1"`, `"td"`,
/// ...) or the dedicated `"section"` key. Font size and spacing are clamped
/// on every write, so a record can never hold an out-of-range value.
///
/// ```
/// use htmlflow::{Color, FontWeight, StyleRecord};
///
/// let h1 = StyleRecord::new("h1")
///     .with_font_size(200.0)
///     .with_font_weight(FontWeight::Bold)
///     .with_foreground(Color::RED);
/// assert_eq!(h1.font_size(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRecord {
    id: String,
    font_size: f64,
    font_weight: FontWeight,
    text_alignment: TextAlignment,
    horizontal_alignment: HorizontalAlignment,
    background: Option<Color>,
    foreground: Option<Color>,
    border_brush: Option<Color>,
    border_thickness: Thickness,
    padding: Thickness,
    spacing: Option<f64>,
}

impl StyleRecord {
    /// Create a record with default values (16pt, normal weight, left aligned).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::Normal,
            text_alignment: TextAlignment::Left,
            horizontal_alignment: HorizontalAlignment::Left,
            background: None,
            foreground: None,
            border_brush: None,
            border_thickness: Thickness::ZERO,
            padding: Thickness::ZERO,
            spacing: None,
        }
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.set_font_size(size);
        self
    }

    pub fn with_font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_text_alignment(mut self, alignment: TextAlignment) -> Self {
        self.text_alignment = alignment;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn with_border_brush(mut self, color: Color) -> Self {
        self.border_brush = Some(color);
        self
    }

    pub fn with_border_thickness(mut self, thickness: Thickness) -> Self {
        self.border_thickness = thickness;
        self
    }

    pub fn with_padding(mut self, padding: Thickness) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.set_spacing(Some(spacing));
        self
    }

    /// Set the font size, clamped to [`MIN_FONT_SIZE`]..=[`MAX_FONT_SIZE`].
    ///
    /// NaN falls back to the default size.
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = if size.is_nan() {
            DEFAULT_FONT_SIZE
        } else {
            size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        };
    }

    /// Set or clear cell spacing, clamped to `0..=MAX_SPACING`.
    ///
    /// `None` (or NaN) means "unset": no spacing attribute is emitted.
    pub fn set_spacing(&mut self, spacing: Option<f64>) {
        self.spacing = spacing
            .filter(|s| !s.is_nan())
            .map(|s| s.clamp(0.0, MAX_SPACING));
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = weight;
    }

    pub fn set_text_alignment(&mut self, alignment: TextAlignment) {
        self.text_alignment = alignment;
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.horizontal_alignment = alignment;
    }

    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    pub fn set_foreground(&mut self, color: Option<Color>) {
        self.foreground = color;
    }

    pub fn set_border_brush(&mut self, color: Option<Color>) {
        self.border_brush = color;
    }

    pub fn set_border_thickness(&mut self, thickness: Thickness) {
        self.border_thickness = thickness;
    }

    pub fn set_padding(&mut self, padding: Thickness) {
        self.padding = padding;
    }

    /// Overwrite every visual field with the values from `other`. The id is kept.
    pub(crate) fn merge_from(&mut self, other: &StyleRecord) {
        self.font_size = other.font_size;
        self.font_weight = other.font_weight;
        self.text_alignment = other.text_alignment;
        self.horizontal_alignment = other.horizontal_alignment;
        self.background = other.background;
        self.foreground = other.foreground;
        self.border_brush = other.border_brush;
        self.border_thickness = other.border_thickness;
        self.padding = other.padding;
        self.spacing = other.spacing;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight
    }

    pub fn text_alignment(&self) -> TextAlignment {
        self.text_alignment
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn border_brush(&self) -> Option<Color> {
        self.border_brush
    }

    pub fn border_thickness(&self) -> Thickness {
        self.border_thickness
    }

    pub fn padding(&self) -> Thickness {
        self.padding
    }

    /// Cell spacing, `None` when unset.
    pub fn spacing(&self) -> Option<f64> {
        self.spacing
    }
}
