//! HTML to flow-document conversion.
//!
//! [`HtmlConverter`] owns the options and the style store. Each call to
//! [`convert`](HtmlConverter::convert) parses the HTML, strips comments,
//! walks the body and serializes the resulting [`FlowTree`]. Nothing but
//! the style store survives between calls, so the same input always
//! produces the same markup.
//!
//! ```
//! use htmlflow::{ConversionOptions, HtmlConverter};
//!
//! let mut converter = HtmlConverter::new(ConversionOptions::default());
//! let markup = converter.set_html("<p>Hello <b>world</b></p>")?.convert()?;
//! assert!(markup.contains("<Bold>world</Bold>"));
//! # Ok::<(), htmlflow::Error>(())
//! ```

mod diagnostics;
mod options;
pub mod table;
mod walker;

pub use diagnostics::{Conversion, Diagnostic};
pub use options::{
    ConversionOptions, DEFAULT_MAX_DEPTH, RootKind, SECTION_FONT_SIZE, SECTION_STYLE_ID,
    TableLayout,
};

use crate::dom;
use crate::error::{Error, Result};
use crate::flow::FlowTree;
use crate::style::{StyleRecord, StyleStore};

use walker::Walker;

/// Converts HTML fragments into flow-document markup.
#[derive(Debug, Clone)]
pub struct HtmlConverter {
    options: ConversionOptions,
    styles: StyleStore,
    html: Option<String>,
}

impl Default for HtmlConverter {
    fn default() -> Self {
        Self::new(ConversionOptions::default())
    }
}

impl HtmlConverter {
    /// Create a converter. The style store is seeded when the options ask for defaults.
    pub fn new(options: ConversionOptions) -> Self {
        let styles = if options.add_default_styles {
            StyleStore::with_defaults()
        } else {
            StyleStore::new()
        };
        Self {
            options,
            styles,
            html: None,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn styles(&self) -> &StyleStore {
        &self.styles
    }

    /// Mutable access to the style store for edits before a conversion.
    pub fn styles_mut(&mut self) -> &mut StyleStore {
        &mut self.styles
    }

    /// The HTML set by [`set_html`](Self::set_html), if any.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Set the HTML converted by [`convert`](Self::convert).
    pub fn set_html(&mut self, html: impl Into<String>) -> Result<&mut Self> {
        let html = html.into();
        if html.is_empty() {
            return Err(Error::InvalidArgument("html must not be empty".into()));
        }
        self.html = Some(html);
        Ok(self)
    }

    /// Add or merge a style record.
    pub fn set_style(&mut self, record: StyleRecord) -> Result<&mut Self> {
        self.styles.add(record)?;
        Ok(self)
    }

    /// Convert the stored HTML.
    pub fn convert(&self) -> Result<String> {
        self.convert_report().map(|c| c.markup)
    }

    /// Convert the stored HTML and return the diagnostics alongside the markup.
    pub fn convert_report(&self) -> Result<Conversion> {
        let html = self
            .html
            .as_deref()
            .ok_or_else(|| Error::InvalidArgument("html has not been set".into()))?;
        self.run(html)
    }

    /// Convert `html` directly, leaving the stored HTML untouched.
    pub fn convert_html(&self, html: &str) -> Result<String> {
        self.run(html).map(|c| c.markup)
    }

    /// Decode raw bytes (UTF-8, then the `<meta charset>`, then Windows-1252) and convert.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String> {
        self.convert_html(&crate::decode_html(bytes))
    }

    /// Build the flow tree for `html` without serializing it.
    pub fn build_tree(&self, html: &str) -> Result<(FlowTree, Vec<Diagnostic>)> {
        if html.is_empty() {
            return Err(Error::InvalidArgument("html must not be empty".into()));
        }
        let mut dom = dom::parse_html(html);
        let document = dom.document();
        let removed = dom::strip_comments(&mut dom, document);
        log::trace!("stripped {removed} comments");

        Ok(Walker::new(&dom, &self.styles, &self.options).run())
    }

    fn run(&self, html: &str) -> Result<Conversion> {
        let (tree, diagnostics) = self.build_tree(html)?;
        if !diagnostics.is_empty() {
            log::debug!("conversion finished with {} diagnostics", diagnostics.len());
        }
        Ok(Conversion {
            markup: tree.to_markup(self.options.indent)?,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{FLOW_NAMESPACE, FlowKind, FlowNodeId};
    use crate::style::{Color, FontWeight, HorizontalAlignment};

    fn convert(html: &str) -> String {
        HtmlConverter::default().convert_html(html).unwrap()
    }

    fn convert_with(options: ConversionOptions, html: &str) -> Conversion {
        let mut converter = HtmlConverter::new(options);
        converter.set_html(html).unwrap();
        converter.convert_report().unwrap()
    }

    fn tree(html: &str) -> FlowTree {
        HtmlConverter::new(ConversionOptions::default().with_default_styles(false))
            .build_tree(html)
            .unwrap()
            .0
    }

    fn kinds(tree: &FlowTree, id: FlowNodeId) -> Vec<FlowKind> {
        tree.children(id).iter().filter_map(|&c| tree.kind(c)).collect()
    }

    #[test]
    fn test_empty_html_rejected() {
        let mut converter = HtmlConverter::default();
        assert!(matches!(converter.convert(), Err(Error::InvalidArgument(_))));
        assert!(matches!(converter.set_html(""), Err(Error::InvalidArgument(_))));
        assert!(matches!(converter.convert_html(""), Err(Error::InvalidArgument(_))));
        assert!(converter.html().is_none());
    }

    #[test]
    fn test_end_to_end_heading_and_paragraph() {
        let markup = convert("<body><h1>Title</h1><p>Hello <b>world</b></p></body>");
        assert_eq!(
            markup,
            format!(
                "<Section xmlns=\"{FLOW_NAMESPACE}\" FontSize=\"12.5\" FontWeight=\"Normal\">\
                 <Paragraph FontSize=\"24\" FontWeight=\"Bold\" Foreground=\"#FFFF0000\" \
                 BorderBrush=\"#FF696969\" BorderThickness=\"0,0,0,1\" Padding=\"0,0,0,1\">Title</Paragraph>\
                 <Paragraph>Hello <Bold>world</Bold></Paragraph></Section>"
            )
        );
    }

    #[test]
    fn test_idempotent() {
        let mut converter = HtmlConverter::default();
        converter
            .set_html("<div><p>a<!-- c --></p><ul><li>x</li></ul><table><tr><td>1</td></tr></table></div>")
            .unwrap();
        assert_eq!(converter.convert().unwrap(), converter.convert().unwrap());
    }

    #[test]
    fn test_comments_leave_no_trace() {
        let markup = convert("<div>before<!-- secret --><p>x<!-- nested secret --></p></div><!-- tail -->");
        assert!(!markup.contains("secret"));
        assert!(!markup.contains("tail"));
    }

    #[test]
    fn test_text_only_section_collapses_to_paragraph() {
        let t = tree("<div>just text</div>");
        assert_eq!(kinds(&t, t.root()), [FlowKind::Paragraph]);

        let t = tree("<div><p>a</p></div>");
        let section = t.children(t.root())[0];
        assert_eq!(t.kind(section), Some(FlowKind::Section));
        assert_eq!(kinds(&t, section), [FlowKind::Paragraph]);
    }

    #[test]
    fn test_inline_in_section_gets_paragraph() {
        let t = tree("<div><b>bold</b><p>p</p></div>");
        let section = t.children(t.root())[0];
        assert_eq!(kinds(&t, section), [FlowKind::Paragraph, FlowKind::Paragraph]);
        let synthesized = t.children(section)[0];
        assert_eq!(kinds(&t, synthesized), [FlowKind::Bold]);
    }

    #[test]
    fn test_inline_mapping() {
        let markup = convert("<p><i>i</i><em>e</em><u>u</u><code>c</code>a<br>b</p>");
        assert!(markup.contains("<Italic>i</Italic><Italic>e</Italic><Underline>u</Underline><Span>c</Span>a<LineBreak/>b"));
    }

    #[test]
    fn test_unknown_element_policy() {
        let html = "<p>x<foo>bar</foo></p>";

        let off = convert_with(ConversionOptions::default(), html);
        assert!(!off.markup.contains("foo"));
        assert!(!off.markup.contains("bar"));
        assert!(off.diagnostics.contains(&Diagnostic::UnknownElement { tag: "foo".into() }));

        let on = convert_with(ConversionOptions::default().with_process_unknown(true), html);
        assert!(on.markup.contains(
            "<Span Foreground=\"#FFFF0000\"><Run>[Unknown node </Run><Run FontWeight=\"Bold\">foo</Run>\
             <Run>, inner text: </Run><Run>bar</Run><Run>]</Run></Span>"
        ));
    }

    #[test]
    fn test_unknown_in_section_gets_paragraph() {
        let t = {
            let options = ConversionOptions::default()
                .with_default_styles(false)
                .with_process_unknown(true);
            HtmlConverter::new(options).build_tree("<div><foo>bar</foo><p>p</p></div>").unwrap().0
        };
        let section = t.children(t.root())[0];
        let first = t.children(section)[0];
        assert_eq!(t.kind(first), Some(FlowKind::Paragraph));
        assert_eq!(kinds(&t, first), [FlowKind::Span]);
    }

    #[test]
    fn test_unknown_marker_placement() {
        let options = ConversionOptions::default()
            .with_default_styles(false)
            .with_process_unknown(true);
        let report = convert_with(
            options,
            "<p><b>x<foo>in bold</foo></b></p><ul><li><foo>in item</foo></li></ul>",
        );
        assert!(!report.markup.contains("in bold"));
        assert!(!report.markup.contains("in item"));
        assert!(report.diagnostics.contains(&Diagnostic::StructuralMismatch {
            tag: "foo".into(),
            parent: "Bold".into(),
        }));
        assert!(report.diagnostics.contains(&Diagnostic::StructuralMismatch {
            tag: "foo".into(),
            parent: "ListItem".into(),
        }));
    }

    #[test]
    fn test_table_geometry() {
        let markup = convert(
            "<table><tr><td>1</td><td>2</td><td>3</td></tr><tr><td>4</td><td>5</td></tr></table>",
        );
        assert_eq!(markup.matches("<TableColumn/>").count(), 3);
        assert_eq!(markup.matches("<TableRow>").count(), 2);
        assert_eq!(markup.matches("<TableRowGroup>").count(), 1);
        let second_row = markup.split("<TableRow>").nth(2).unwrap();
        assert_eq!(second_row.matches("<TableCell").count(), 2);
    }

    #[test]
    fn test_empty_table_dropped() {
        let report = convert_with(ConversionOptions::default(), "<div><table></table><p>x</p></div>");
        assert!(!report.markup.contains("<Table"));
        assert!(report.diagnostics.contains(&Diagnostic::EmptyTable));
    }

    #[test]
    fn test_cell_spans_clamped() {
        let report = convert_with(
            ConversionOptions::default(),
            "<table><tr><td colspan=\"9\" rowspan=\"abc\">a</td><td>b</td></tr></table>",
        );
        assert!(report.markup.contains("ColumnSpan=\"2\""));
        assert!(!report.markup.contains("RowSpan"));
        assert!(report.diagnostics.contains(&Diagnostic::InvalidSpan {
            attribute: "rowspan".into(),
            value: "abc".into(),
        }));
    }

    #[test]
    fn test_streaming_table_layout() {
        let options = ConversionOptions::default()
            .with_default_styles(false)
            .with_table_layout(TableLayout::Streaming);
        let (t, _) = HtmlConverter::new(options)
            .build_tree(
                "<table><thead><tr><th>h</th></tr></thead><tbody><tr><td colspan=\"5\">b</td></tr></tbody></table>",
            )
            .unwrap();
        let table = t.children(t.root())[0];
        assert_eq!(t.kind(table), Some(FlowKind::Table));
        assert_eq!(kinds(&t, table), [FlowKind::TableRowGroup, FlowKind::TableRowGroup]);

        let body_group = t.children(table)[1];
        let row = t.children(body_group)[0];
        let cell = t.children(row)[0];
        assert_eq!(t.attribute(cell, "ColumnSpan"), Some("1"));
    }

    #[test]
    fn test_table_styles() {
        let markup = convert("<table><tr><th>h</th></tr><tr><td>d</td></tr></table>");
        assert!(markup.contains("CellSpacing=\"5\""));
        assert!(markup.contains("Background=\"#FFB0C4DE\""));
        assert!(markup.contains("Padding=\"5,5,5,5\""));
    }

    #[test]
    fn test_uri_policy() {
        let markup = convert("<p><a href=\"javascript:evil()\">x</a></p>");
        assert!(markup.contains("<Hyperlink>x</Hyperlink>"));

        let markup = convert("<p><a href=\"https://example.com\">x</a></p>");
        assert!(markup.contains("<Hyperlink NavigateUri=\"https://example.com\">x</Hyperlink>"));

        let report = convert_with(ConversionOptions::default(), "<p><a href=\"#frag\">x</a></p>");
        assert!(!report.markup.contains("NavigateUri"));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_relative_image_completion() {
        let markup = convert(
            "<html><head><base href=\"https://site.test/assets\"></head>\
             <body><p><img src=\"/pic.png\"></p></body></html>",
        );
        assert!(markup.contains("Source=\"https://site.test/assets/pic.png\""));
    }

    #[test]
    fn test_image_without_base_or_src() {
        let report = convert_with(
            ConversionOptions::default(),
            "<div><img src=\"pic.png\"><img><p>x</p></div>",
        );
        assert!(!report.markup.contains("Source="));
        assert!(report.diagnostics.contains(&Diagnostic::MissingImageSource));
        assert!(report.diagnostics.contains(&Diagnostic::InvalidUri {
            attribute: "src".into(),
            value: "pic.png".into(),
        }));
    }

    #[test]
    fn test_image_in_section_wrapped_and_aligned() {
        let mut converter =
            HtmlConverter::new(ConversionOptions::default().with_default_styles(false));
        converter
            .set_style(
                StyleRecord::new("img").with_horizontal_alignment(HorizontalAlignment::Center),
            )
            .unwrap();
        let (t, _) = converter
            .build_tree("<div><img src=\"https://site.test/a.png\"><p>x</p></div>")
            .unwrap();
        let section = t.children(t.root())[0];
        let paragraph = t.children(section)[0];
        let image = t.children(paragraph)[0];
        assert_eq!(t.kind(image), Some(FlowKind::Image));
        assert_eq!(t.attribute(image, "HorizontalAlignment"), Some("Center"));
        assert_eq!(t.attribute(image, "Source"), Some("https://site.test/a.png"));
    }

    #[test]
    fn test_lists() {
        let markup = convert("<ol><li>one</li><li><p>two</p></li></ol><ul><li>x</li></ul>");
        assert!(markup.contains("MarkerStyle=\"Decimal\""));
        assert!(markup.contains("MarkerStyle=\"Box\""));
        assert!(markup.contains("<ListItem><Paragraph>one</Paragraph></ListItem>"));

        let t = tree("<ul><li>a<b>b</b></li></ul>");
        let list = t.children(t.root())[0];
        let item = t.children(list)[0];
        assert_eq!(kinds(&t, item), [FlowKind::Paragraph, FlowKind::Paragraph]);
    }

    #[test]
    fn test_structural_mismatch_reported() {
        let report = convert_with(
            ConversionOptions::default(),
            "<div><span><div><p>inner</p></div></span></div>",
        );
        assert!(!report.markup.contains("inner"));
        assert!(report.diagnostics.contains(&Diagnostic::StructuralMismatch {
            tag: "div".into(),
            parent: "Span".into(),
        }));

        let report = convert_with(
            ConversionOptions::default(),
            "<div><b><table><tr><td>x</td></tr></table></b></div>",
        );
        assert!(!report.markup.contains("<Table"));
        assert!(report.diagnostics.contains(&Diagnostic::StructuralMismatch {
            tag: "table".into(),
            parent: "Bold".into(),
        }));
    }

    #[test]
    fn test_no_sections_inside_items_and_cells() {
        let report = convert_with(
            ConversionOptions::default(),
            "<ul><li><div><p>x</p><p>y</p></div></li></ul>\
             <table><tr><td><div><p>c</p><b>d</b></div></td></tr></table>",
        );
        assert!(!report.markup.contains(">x<"));
        assert!(!report.markup.contains(">c<"));
        assert_eq!(report.markup.matches("<Section").count(), 1);
        assert!(report.diagnostics.contains(&Diagnostic::StructuralMismatch {
            tag: "div".into(),
            parent: "ListItem".into(),
        }));
        assert!(report.diagnostics.contains(&Diagnostic::StructuralMismatch {
            tag: "div".into(),
            parent: "TableCell".into(),
        }));
    }

    #[test]
    fn test_ignored_subtrees() {
        let markup = convert("<div><script>alert(1)</script><nav>menu</nav><p>kept</p></div>");
        assert!(!markup.contains("alert"));
        assert!(!markup.contains("menu"));
        assert!(markup.contains("kept"));
    }

    #[test]
    fn test_flow_document_root() {
        let report = convert_with(ConversionOptions::flow_document(), "<p>x</p>");
        assert!(report.markup.starts_with("<FlowDocument"));
        assert!(report.markup.contains("<Section FontSize=\"12.5\""));

        let t = HtmlConverter::new(ConversionOptions::flow_document())
            .build_tree("<div><p>x</p></div>")
            .unwrap()
            .0;
        assert_eq!(kinds(&t, t.root()), [FlowKind::Section]);
        assert!(t.attributes(t.root()).is_empty());
    }

    #[test]
    fn test_preserve_whitespace() {
        let report = convert_with(
            ConversionOptions::default().with_preserve_whitespace(true),
            "<p>x</p>",
        );
        assert!(report.markup.contains("xml:space=\"preserve\""));
    }

    #[test]
    fn test_depth_limit() {
        let html = format!("{}deep{}", "<div>".repeat(10), "</div>".repeat(10));
        let report = convert_with(ConversionOptions::default().with_max_depth(4), &html);
        assert!(!report.markup.contains("deep"));
        assert!(report
            .diagnostics
            .contains(&Diagnostic::DepthLimit { tag: "div".into() }));
    }

    #[test]
    fn test_style_override_merges() {
        let mut converter = HtmlConverter::default();
        converter
            .set_style(
                StyleRecord::new("h2")
                    .with_font_size(30.0)
                    .with_font_weight(FontWeight::Light)
                    .with_foreground(Color::BLUE),
            )
            .unwrap();
        let markup = converter.convert_html("<h2>x</h2>").unwrap();
        assert!(markup.contains("<Paragraph FontSize=\"30\" FontWeight=\"Light\" Foreground=\"#FF0000FF\">x</Paragraph>"));
    }

    #[test]
    fn test_convert_bytes_windows_1252() {
        let converter = HtmlConverter::default();
        let markup = converter.convert_bytes(b"<p>caf\xE9</p>").unwrap();
        assert!(markup.contains("café"));
    }

    #[test]
    fn test_nbsp_cleaned() {
        let markup = convert("<p>a&nbsp;b</p>");
        assert!(markup.contains(">a b<"));
    }
}
