//! Style records, value types and the keyed style store.
//!
//! This module contains:
//! - Value types (Color, Thickness, FontWeight, alignments, ...)
//! - StyleRecord, one bundle of visual settings per element type
//! - StyleStore, the keyed collection consulted during conversion

#[cfg(feature = "cli")]
pub mod config;
mod properties;
mod record;
mod store;

/// Values that can be written as flow-document attribute text.
pub trait ToMarkup {
    /// Write this value as markup to the buffer.
    fn to_markup(&self, buf: &mut String);

    /// Convert to a markup string (convenience method).
    fn to_markup_string(&self) -> String {
        let mut buf = String::new();
        self.to_markup(&mut buf);
        buf
    }
}

impl ToMarkup for f64 {
    fn to_markup(&self, buf: &mut String) {
        use std::fmt::Write;
        let _ = write!(buf, "{self}");
    }
}

// Re-export property types
pub use properties::{Color, FontWeight, HorizontalAlignment, MarkerStyle, Stretch, TextAlignment, Thickness};

pub use record::{DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MAX_SPACING, MIN_FONT_SIZE, StyleRecord};
pub use store::StyleStore;
