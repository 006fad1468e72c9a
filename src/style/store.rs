//! Keyed collection of style records.

use std::collections::HashMap;

use super::properties::{Color, FontWeight, Thickness};
use super::record::StyleRecord;
use crate::error::{Error, Result};

/// Style records keyed by element-type id.
///
/// Adding a record whose id is already present merges it into the existing
/// entry instead of creating a duplicate. The converter only reads the store
/// while a conversion runs.
#[derive(Clone, Default)]
pub struct StyleStore {
    records: HashMap<String, StyleRecord>,
}

impl StyleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the built-in defaults.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.seed_defaults();
        store
    }

    /// Insert `record`, or merge it field by field into the record with the same id.
    pub fn add(&mut self, record: StyleRecord) -> Result<()> {
        if record.id().is_empty() {
            return Err(Error::InvalidArgument(
                "style record id must not be empty".into(),
            ));
        }
        match self.records.get_mut(record.id()) {
            Some(existing) => {
                log::trace!("merging style record '{}'", record.id());
                existing.merge_from(&record);
            }
            None => {
                self.records.insert(record.id().to_string(), record);
            }
        }
        Ok(())
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&StyleRecord> {
        self.records.get(id)
    }

    /// Mutable access to a record, for in-place edits before a run.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut StyleRecord> {
        self.records.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRecord> {
        self.records.values()
    }

    /// Add the built-in records for headings, lists, tables and cells.
    ///
    /// Existing records with the same ids are overwritten by the defaults.
    pub fn seed_defaults(&mut self) {
        for record in default_records() {
            // Default ids are non-empty literals.
            let _ = self.add(record);
        }
    }
}

impl std::fmt::Debug for StyleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.records.keys().map(String::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("StyleStore").field("ids", &ids).finish()
    }
}

fn default_records() -> Vec<StyleRecord> {
    let cell_border = Thickness::uniform(1.0);
    vec![
        StyleRecord::new("h1")
            .with_font_size(24.0)
            .with_font_weight(FontWeight::Bold)
            .with_foreground(Color::RED)
            .with_border_brush(Color::DIM_GRAY)
            .with_border_thickness(Thickness::new(0.0, 0.0, 0.0, 1.0))
            .with_padding(Thickness::new(0.0, 0.0, 0.0, 1.0)),
        StyleRecord::new("h2")
            .with_font_size(20.0)
            .with_font_weight(FontWeight::Bold)
            .with_foreground(Color::GREEN),
        StyleRecord::new("h3")
            .with_font_size(18.0)
            .with_font_weight(FontWeight::Bold),
        StyleRecord::new("h4")
            .with_font_size(14.0)
            .with_font_weight(FontWeight::Bold),
        StyleRecord::new("ul")
            .with_font_size(24.0)
            .with_border_brush(Color::GREEN)
            .with_border_thickness(Thickness::uniform(3.0))
            .with_padding(Thickness::new(50.0, 3.0, 3.0, 3.0)),
        StyleRecord::new("ol")
            .with_font_size(24.0)
            .with_border_brush(Color::BLUE)
            .with_border_thickness(Thickness::uniform(3.0))
            .with_padding(Thickness::new(50.0, 3.0, 3.0, 3.0)),
        StyleRecord::new("table").with_spacing(5.0),
        StyleRecord::new("th")
            .with_border_brush(Color::LIGHT_GRAY)
            .with_border_thickness(cell_border)
            .with_background(Color::LIGHT_STEEL_BLUE)
            .with_padding(Thickness::uniform(5.0)),
        StyleRecord::new("td")
            .with_border_brush(Color::LIGHT_GRAY)
            .with_border_thickness(cell_border)
            .with_padding(Thickness::uniform(5.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut store = StyleStore::new();
        store.add(StyleRecord::new("p").with_font_size(11.0)).unwrap();

        assert!(store.contains("p"));
        assert!(!store.contains("h1"));
        assert_eq!(store.get("p").unwrap().font_size(), 11.0);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_add_merges_instead_of_duplicating() {
        let mut store = StyleStore::new();
        store.add(StyleRecord::new("p").with_font_size(11.0)).unwrap();
        store
            .add(StyleRecord::new("p").with_font_size(30.0).with_foreground(Color::BLUE))
            .unwrap();

        assert_eq!(store.len(), 1);
        let p = store.get("p").unwrap();
        assert_eq!(p.font_size(), 30.0);
        assert_eq!(p.foreground(), Some(Color::BLUE));
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut store = StyleStore::new();
        let err = store.add(StyleRecord::new("")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_seeded_defaults() {
        let store = StyleStore::with_defaults();
        for id in ["h1", "h2", "h3", "h4", "ul", "ol", "table", "th", "td"] {
            assert!(store.contains(id), "missing default {id}");
        }
        assert_eq!(store.len(), 9);

        let h1 = store.get("h1").unwrap();
        assert_eq!(h1.font_size(), 24.0);
        assert_eq!(h1.font_weight(), FontWeight::Bold);
        assert_eq!(h1.foreground(), Some(Color::RED));
        assert_eq!(store.get("table").unwrap().spacing(), Some(5.0));
        assert_eq!(store.get("th").unwrap().background(), Some(Color::LIGHT_STEEL_BLUE));
        assert_eq!(store.get("td").unwrap().spacing(), None);
    }

    #[test]
    fn test_clear() {
        let mut store = StyleStore::with_defaults();
        store.clear();
        assert!(store.is_empty());
        assert!(store.get("h1").is_none());
    }

    #[test]
    fn test_in_place_edit() {
        let mut store = StyleStore::with_defaults();
        store.get_mut("h2").unwrap().set_font_size(1000.0);
        assert_eq!(store.get("h2").unwrap().font_size(), 100.0);
    }
}
