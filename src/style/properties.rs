//! Style value types and the enum_property! macro.
//!
//! Every value knows how to print itself the way flow-document markup
//! expects it (`#AARRGGBB` brushes, `left,top,right,bottom` thicknesses,
//! PascalCase keywords).

use std::fmt::Write;
use std::str::FromStr;

use super::ToMarkup;
use crate::error::Error;

/// Macro for defining keyword enums with automatic ToMarkup implementation.
///
/// # Example
///
/// ```ignore
/// enum_property! {
///     /// Text alignment within a block.
///     pub enum TextAlignment {
///         #[default]
///         Left => "Left",
///         Right => "Right",
///     }
/// }
/// ```
macro_rules! enum_property {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $keyword:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Returns the markup keyword for this value.
            #[inline]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $keyword,)*
                }
            }

            /// Parse a keyword, ignoring ASCII case.
            pub fn from_keyword(s: &str) -> Option<Self> {
                $(
                    if s.eq_ignore_ascii_case($keyword) {
                        return Some($name::$variant);
                    }
                )*
                None
            }
        }

        impl ToMarkup for $name {
            fn to_markup(&self, buf: &mut String) {
                buf.push_str(self.as_str());
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::from_keyword(s.trim()).ok_or_else(|| {
                    Error::InvalidStyle(format!(
                        concat!("unknown ", stringify!($name), " '{}'"),
                        s
                    ))
                })
            }
        }
    };
}

enum_property! {
    /// Font weight keywords understood by flow documents.
    pub enum FontWeight {
        Thin => "Thin",
        ExtraLight => "ExtraLight",
        Light => "Light",
        #[default]
        Normal => "Normal",
        Medium => "Medium",
        SemiBold => "SemiBold",
        Bold => "Bold",
        ExtraBold => "ExtraBold",
        Black => "Black",
    }
}

enum_property! {
    /// Text alignment within a block.
    pub enum TextAlignment {
        #[default]
        Left => "Left",
        Right => "Right",
        Center => "Center",
        Justify => "Justify",
    }
}

enum_property! {
    /// Horizontal placement of an image inside its container.
    pub enum HorizontalAlignment {
        #[default]
        Left => "Left",
        Center => "Center",
        Right => "Right",
        Stretch => "Stretch",
    }
}

enum_property! {
    /// Bullet or numbering style of a list.
    pub enum MarkerStyle {
        #[default]
        None => "None",
        Decimal => "Decimal",
        Disc => "Disc",
        Circle => "Circle",
        Square => "Square",
        Box => "Box",
    }
}

enum_property! {
    /// How an image fills its allotted space.
    pub enum Stretch {
        #[default]
        None => "None",
        Fill => "Fill",
        Uniform => "Uniform",
        UniformToFill => "UniformToFill",
    }
}

/// ARGB color (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const TRANSPARENT: Color = Color::argb(0x00, 0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const BLUE: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const DIM_GRAY: Color = Color::rgb(0x69, 0x69, 0x69);
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const LIGHT_GRAY: Color = Color::rgb(0xD3, 0xD3, 0xD3);
    pub const LIGHT_STEEL_BLUE: Color = Color::rgb(0xB0, 0xC4, 0xDE);

    /// Create a new opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xFF, r, g, b }
    }

    /// Create a new color with alpha.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    fn named(name: &str) -> Option<Color> {
        const NAMED: &[(&str, Color)] = &[
            ("black", Color::BLACK),
            ("white", Color::WHITE),
            ("transparent", Color::TRANSPARENT),
            ("red", Color::RED),
            ("green", Color::GREEN),
            ("blue", Color::BLUE),
            ("dimgray", Color::DIM_GRAY),
            ("gray", Color::GRAY),
            ("lightgray", Color::LIGHT_GRAY),
            ("lightsteelblue", Color::LIGHT_STEEL_BLUE),
        ];
        NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, c)| c)
    }
}

impl ToMarkup for Color {
    fn to_markup(&self, buf: &mut String) {
        let _ = write!(
            buf,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.a, self.r, self.g, self.b
        );
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts `#RGB`, `#RRGGBB`, `#AARRGGBB` or a handful of named colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidStyle(format!("invalid color '{s}'"));

        let Some(hex) = s.strip_prefix('#') else {
            return Color::named(s).ok_or_else(invalid);
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }
}

/// Four-sided length (border thickness, padding).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub const ZERO: Thickness = Thickness::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same length on all four sides.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn is_zero(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

impl ToMarkup for Thickness {
    fn to_markup(&self, buf: &mut String) {
        let _ = write!(
            buf,
            "{},{},{},{}",
            self.left, self.top, self.right, self.bottom
        );
    }
}

impl FromStr for Thickness {
    type Err = Error;

    /// Accepts one (uniform), two (horizontal, vertical) or four comma-separated values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidStyle(format!("invalid thickness '{s}'")))?;
        match values.as_slice() {
            [v] => Ok(Thickness::uniform(*v)),
            [h, v] => Ok(Thickness::new(*h, *v, *h, *v)),
            [l, t, r, b] => Ok(Thickness::new(*l, *t, *r, *b)),
            _ => Err(Error::InvalidStyle(format!("invalid thickness '{s}'"))),
        }
    }
}
