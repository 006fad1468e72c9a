//! JSON style overrides.
//!
//! A style file is an array of objects, one per style id. Only the fields
//! present in an object change; the rest keep the value already in the
//! store (or the record defaults for a new id).
//!
//! ```json
//! [
//!   { "id": "h1", "font_size": 30, "foreground": "#336699" },
//!   { "id": "td", "padding": "2,4,2,4", "border_thickness": "0" }
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::{Color, StyleRecord, StyleStore, Thickness};
use crate::error::{Error, Result};

/// One entry of a style file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOverride {
    pub id: String,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub text_alignment: Option<String>,
    pub horizontal_alignment: Option<String>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub border_brush: Option<String>,
    pub border_thickness: Option<String>,
    pub padding: Option<String>,
    pub spacing: Option<f64>,
}

impl StyleOverride {
    /// Apply the fields that are set onto `record`.
    pub fn apply_to(&self, record: &mut StyleRecord) -> Result<()> {
        if let Some(size) = self.font_size {
            record.set_font_size(size);
        }
        if let Some(weight) = &self.font_weight {
            record.set_font_weight(weight.parse()?);
        }
        if let Some(alignment) = &self.text_alignment {
            record.set_text_alignment(alignment.parse()?);
        }
        if let Some(alignment) = &self.horizontal_alignment {
            record.set_horizontal_alignment(alignment.parse()?);
        }
        if let Some(color) = &self.foreground {
            record.set_foreground(Some(color.parse::<Color>()?));
        }
        if let Some(color) = &self.background {
            record.set_background(Some(color.parse::<Color>()?));
        }
        if let Some(color) = &self.border_brush {
            record.set_border_brush(Some(color.parse::<Color>()?));
        }
        if let Some(thickness) = &self.border_thickness {
            record.set_border_thickness(thickness.parse::<Thickness>()?);
        }
        if let Some(padding) = &self.padding {
            record.set_padding(padding.parse::<Thickness>()?);
        }
        if self.spacing.is_some() {
            record.set_spacing(self.spacing);
        }
        Ok(())
    }
}

/// Parse a JSON style document.
pub fn parse_style_overrides(json: &str) -> Result<Vec<StyleOverride>> {
    serde_json::from_str(json).map_err(|e| Error::InvalidStyle(format!("style file: {e}")))
}

/// Merge overrides into `store`, field by field. Returns the number applied.
pub fn apply_style_overrides(store: &mut StyleStore, overrides: &[StyleOverride]) -> Result<usize> {
    for entry in overrides {
        let mut record = store
            .get(&entry.id)
            .cloned()
            .unwrap_or_else(|| StyleRecord::new(entry.id.as_str()));
        entry.apply_to(&mut record)?;
        store.add(record)?;
    }
    Ok(overrides.len())
}

/// Read a style file from disk and merge it into `store`.
pub fn load_style_file(store: &mut StyleStore, path: impl AsRef<Path>) -> Result<usize> {
    let json = std::fs::read_to_string(path)?;
    let overrides = parse_style_overrides(&json)?;
    apply_style_overrides(store, &overrides)
}
