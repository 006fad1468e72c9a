//! Conversion options.

use crate::style::StyleRecord;

/// Style key of the record applied to every emitted `Section`.
pub const SECTION_STYLE_ID: &str = "section";

/// Font size of the default section record.
pub const SECTION_FONT_SIZE: f64 = 12.5;

/// Default nesting limit for the source walk.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Element written as the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootKind {
    /// A bare `Section`, suitable for inserting into an existing document.
    #[default]
    Section,
    /// A complete `FlowDocument`.
    FlowDocument,
}

/// How tables are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// Compute row and column counts first, then emit columns and rows in one pass.
    #[default]
    Resolved,
    /// Walk row groups, rows and cells as they appear in the source.
    Streaming,
}

/// Configuration for an [`HtmlConverter`](super::HtmlConverter).
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Kind of the output root.
    pub root: RootKind,
    /// Emit a red diagnostic marker for unrecognized elements.
    pub process_unknown: bool,
    /// Mark the root with `xml:space="preserve"`.
    pub preserve_whitespace: bool,
    /// Pretty-print the markup.
    pub indent: bool,
    /// Seed the style store with the built-in records.
    pub add_default_styles: bool,
    /// Table layout strategy.
    pub table_layout: TableLayout,
    /// Record applied to every `Section`.
    pub section_style: StyleRecord,
    /// Elements nested deeper than this are dropped.
    pub max_depth: usize,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            root: RootKind::Section,
            process_unknown: false,
            preserve_whitespace: false,
            indent: false,
            add_default_styles: true,
            table_layout: TableLayout::Resolved,
            section_style: StyleRecord::new(SECTION_STYLE_ID).with_font_size(SECTION_FONT_SIZE),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConversionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a full `FlowDocument` root.
    pub fn flow_document() -> Self {
        Self::default().with_root(RootKind::FlowDocument)
    }

    pub fn with_root(mut self, root: RootKind) -> Self {
        self.root = root;
        self
    }

    pub fn with_process_unknown(mut self, process: bool) -> Self {
        self.process_unknown = process;
        self
    }

    pub fn with_preserve_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_whitespace = preserve;
        self
    }

    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_default_styles(mut self, add: bool) -> Self {
        self.add_default_styles = add;
        self
    }

    pub fn with_table_layout(mut self, layout: TableLayout) -> Self {
        self.table_layout = layout;
        self
    }

    pub fn with_section_style(mut self, style: StyleRecord) -> Self {
        self.section_style = style;
        self
    }

    /// Set the nesting limit. Zero is raised to one so the top level is always walked.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConversionOptions::default();
        assert_eq!(options.root, RootKind::Section);
        assert!(!options.process_unknown);
        assert!(options.add_default_styles);
        assert_eq!(options.table_layout, TableLayout::Resolved);
        assert_eq!(options.section_style.id(), "section");
        assert_eq!(options.section_style.font_size(), 12.5);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder() {
        let options = ConversionOptions::flow_document()
            .with_process_unknown(true)
            .with_indent(true)
            .with_max_depth(0);
        assert_eq!(options.root, RootKind::FlowDocument);
        assert!(options.process_unknown);
        assert!(options.indent);
        assert_eq!(options.max_depth, 1);
    }
}
