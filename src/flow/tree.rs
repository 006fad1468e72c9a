//! Arena storage and typed attribute setters for the output tree.

use url::Url;

use super::FlowKind;
use crate::style::{
    Color, FontWeight, HorizontalAlignment, MarkerStyle, Stretch, StyleRecord, TextAlignment,
    Thickness, ToMarkup,
};

/// Index of a node in a [`FlowTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowNodeId(pub u32);

impl FlowNodeId {
    /// The root node ID (always 0).
    pub const ROOT: FlowNodeId = FlowNodeId(0);
}

/// Payload of an output node.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowNodeData {
    /// Typed element with attributes in insertion order.
    Element {
        kind: FlowKind,
        attrs: Vec<(String, String)>,
    },
    /// Text leaf, written as character data of its parent.
    Text(String),
}

/// A node in the output tree.
#[derive(Debug, Clone)]
pub struct FlowNode {
    pub data: FlowNodeData,
    pub parent: Option<FlowNodeId>,
    pub children: Vec<FlowNodeId>,
}

/// Output tree under construction.
///
/// Appends are checked against the legality table on [`FlowKind`]; a
/// rejected append returns `None` and leaves the tree untouched. Attribute
/// setters only ever overwrite, the converter never reads values back.
#[derive(Debug, Clone)]
pub struct FlowTree {
    nodes: Vec<FlowNode>,
}

impl FlowTree {
    /// Create a tree containing only a root of the given kind.
    pub fn new(root: FlowKind) -> Self {
        Self {
            nodes: vec![FlowNode {
                data: FlowNodeData::Element {
                    kind: root,
                    attrs: Vec::new(),
                },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> FlowNodeId {
        FlowNodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: FlowNodeId) -> Option<&FlowNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Element kind of a node, `None` for text leaves.
    pub fn kind(&self, id: FlowNodeId) -> Option<FlowKind> {
        match self.node(id).map(|n| &n.data) {
            Some(FlowNodeData::Element { kind, .. }) => Some(*kind),
            _ => None,
        }
    }

    pub fn children(&self, id: FlowNodeId) -> &[FlowNodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: FlowNodeId) -> Option<FlowNodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Attributes of an element in the order they were first set.
    pub fn attributes(&self, id: FlowNodeId) -> &[(String, String)] {
        match self.node(id).map(|n| &n.data) {
            Some(FlowNodeData::Element { attrs, .. }) => attrs,
            _ => &[],
        }
    }

    /// Look up a single attribute value.
    pub fn attribute(&self, id: FlowNodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text of a text leaf.
    pub fn text(&self, id: FlowNodeId) -> Option<&str> {
        match self.node(id).map(|n| &n.data) {
            Some(FlowNodeData::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Whether `parent` can take a child element of `kind`.
    pub fn accepts(&self, parent: FlowNodeId, kind: FlowKind) -> bool {
        self.kind(parent).is_some_and(|p| p.accepts(kind))
    }

    /// Whether `parent` can take raw text.
    pub fn accepts_text(&self, parent: FlowNodeId) -> bool {
        self.kind(parent).is_some_and(FlowKind::accepts_text)
    }

    fn push(&mut self, parent: FlowNodeId, data: FlowNodeData) -> FlowNodeId {
        let id = FlowNodeId(self.nodes.len() as u32);
        self.nodes.push(FlowNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0 as usize].children.push(id);
        id
    }

    /// Append a child element, if `parent` accepts that kind.
    pub fn append_element(&mut self, parent: FlowNodeId, kind: FlowKind) -> Option<FlowNodeId> {
        if !self.accepts(parent, kind) {
            log::trace!("{:?} rejects child {}", self.kind(parent), kind);
            return None;
        }
        Some(self.push(
            parent,
            FlowNodeData::Element {
                kind,
                attrs: Vec::new(),
            },
        ))
    }

    /// Append text to `parent`, merging with a trailing text leaf.
    ///
    /// Returns false (and appends nothing) when `parent` does not take text.
    /// Empty strings are accepted but leave no trace.
    pub fn append_text(&mut self, parent: FlowNodeId, text: &str) -> bool {
        if !self.accepts_text(parent) {
            return false;
        }
        if text.is_empty() {
            return true;
        }
        let last = self.children(parent).last().copied();
        if let Some(last) = last
            && let FlowNodeData::Text(existing) = &mut self.nodes[last.0 as usize].data
        {
            existing.push_str(text);
            return true;
        }
        self.push(parent, FlowNodeData::Text(text.to_string()));
        true
    }

    /// Set an attribute, overwriting any previous value of the same name.
    pub fn set_attribute(&mut self, id: FlowNodeId, name: &str, value: impl Into<String>) {
        let Some(FlowNodeData::Element { attrs, .. }) =
            self.nodes.get_mut(id.0 as usize).map(|n| &mut n.data)
        else {
            return;
        };
        let value = value.into();
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => attrs.push((name.to_string(), value)),
        }
    }

    fn set_value(&mut self, id: FlowNodeId, name: &str, value: &impl ToMarkup) {
        self.set_attribute(id, name, value.to_markup_string());
    }

    pub fn set_foreground(&mut self, id: FlowNodeId, color: Color) {
        self.set_value(id, "Foreground", &color);
    }

    pub fn set_background(&mut self, id: FlowNodeId, color: Color) {
        self.set_value(id, "Background", &color);
    }

    pub fn set_border_brush(&mut self, id: FlowNodeId, color: Color) {
        self.set_value(id, "BorderBrush", &color);
    }

    /// Zero thickness is omitted.
    pub fn set_border_thickness(&mut self, id: FlowNodeId, thickness: Thickness) {
        if !thickness.is_zero() {
            self.set_value(id, "BorderThickness", &thickness);
        }
    }

    /// Zero padding is omitted.
    pub fn set_padding(&mut self, id: FlowNodeId, padding: Thickness) {
        if !padding.is_zero() {
            self.set_value(id, "Padding", &padding);
        }
    }

    pub fn set_font_size(&mut self, id: FlowNodeId, size: f64) {
        self.set_value(id, "FontSize", &size);
    }

    pub fn set_font_weight(&mut self, id: FlowNodeId, weight: FontWeight) {
        self.set_value(id, "FontWeight", &weight);
    }

    pub fn set_text_alignment(&mut self, id: FlowNodeId, alignment: TextAlignment) {
        self.set_value(id, "TextAlignment", &alignment);
    }

    pub fn set_horizontal_alignment(&mut self, id: FlowNodeId, alignment: HorizontalAlignment) {
        self.set_value(id, "HorizontalAlignment", &alignment);
    }

    pub fn set_marker_style(&mut self, id: FlowNodeId, marker: MarkerStyle) {
        self.set_value(id, "MarkerStyle", &marker);
    }

    pub fn set_stretch(&mut self, id: FlowNodeId, stretch: Stretch) {
        self.set_value(id, "Stretch", &stretch);
    }

    pub fn set_height(&mut self, id: FlowNodeId, height: f64) {
        self.set_value(id, "Height", &height);
    }

    /// Only meaningful on tables; other kinds are left alone.
    pub fn set_cell_spacing(&mut self, id: FlowNodeId, spacing: f64) {
        if self.kind(id) == Some(FlowKind::Table) {
            self.set_value(id, "CellSpacing", &spacing);
        }
    }

    /// Image source. Returns false when `uri` is not an absolute http(s) URI.
    pub fn set_source(&mut self, id: FlowNodeId, uri: &str) -> bool {
        if !is_navigable_uri(uri) {
            log::debug!("dropping image source '{uri}'");
            return false;
        }
        self.set_attribute(id, "Source", uri);
        true
    }

    /// Hyperlink target. Fragment links and anything not absolute http(s) are refused.
    pub fn set_navigate_uri(&mut self, id: FlowNodeId, uri: &str) -> bool {
        if uri.starts_with('#') || !is_navigable_uri(uri) {
            log::debug!("dropping navigate uri '{uri}'");
            return false;
        }
        self.set_attribute(id, "NavigateUri", uri);
        true
    }

    /// Column span, clamped to `0..=max`. Only table cells take spans.
    pub fn set_column_span(&mut self, id: FlowNodeId, span: i64, max: usize) -> bool {
        self.set_span(id, "ColumnSpan", span, max)
    }

    /// Row span, clamped to `0..=max`. Only table cells take spans.
    pub fn set_row_span(&mut self, id: FlowNodeId, span: i64, max: usize) -> bool {
        self.set_span(id, "RowSpan", span, max)
    }

    fn set_span(&mut self, id: FlowNodeId, name: &str, span: i64, max: usize) -> bool {
        if self.kind(id) != Some(FlowKind::TableCell) {
            return false;
        }
        let max = i64::try_from(max).unwrap_or(i64::MAX);
        self.set_attribute(id, name, span.clamp(0, max).to_string());
        true
    }

    /// Mark `id` with `xml:space="preserve"`.
    pub fn set_preserve_space(&mut self, id: FlowNodeId) {
        self.set_attribute(id, "xml:space", "preserve");
    }

    /// Apply a style record to an element.
    ///
    /// Images only take the horizontal alignment. Kinds outside the styled
    /// set are left untouched. Zero borders and padding, a left text
    /// alignment and unset spacing produce no attribute.
    pub fn apply_style(&mut self, id: FlowNodeId, style: &StyleRecord) {
        let Some(kind) = self.kind(id) else {
            return;
        };
        if kind == FlowKind::Image {
            self.set_horizontal_alignment(id, style.horizontal_alignment());
            return;
        }
        if !kind.accepts_style() {
            return;
        }

        self.set_font_size(id, style.font_size());
        self.set_font_weight(id, style.font_weight());
        if style.text_alignment() != TextAlignment::Left {
            self.set_text_alignment(id, style.text_alignment());
        }
        if let Some(color) = style.foreground() {
            self.set_foreground(id, color);
        }
        if let Some(color) = style.background() {
            self.set_background(id, color);
        }
        if let Some(color) = style.border_brush() {
            self.set_border_brush(id, color);
        }
        self.set_border_thickness(id, style.border_thickness());
        self.set_padding(id, style.padding());
        if let Some(spacing) = style.spacing() {
            self.set_cell_spacing(id, spacing);
        }
    }
}

/// Whether `candidate` is a well-formed absolute `http`/`https` URI.
///
/// The string must parse as-is: embedded whitespace is rejected rather than
/// being trimmed or percent-encoded by the URL parser.
pub fn is_navigable_uri(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_respects_legality() {
        let mut tree = FlowTree::new(FlowKind::Section);
        let root = tree.root();

        let p = tree.append_element(root, FlowKind::Paragraph).unwrap();
        assert!(tree.append_element(p, FlowKind::Paragraph).is_none());
        assert!(tree.append_element(root, FlowKind::Bold).is_none());
        assert!(tree.append_element(p, FlowKind::Bold).is_some());

        assert_eq!(tree.children(root), &[p]);
        assert_eq!(tree.parent(p), Some(root));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_text_merging_and_rejection() {
        let mut tree = FlowTree::new(FlowKind::Section);
        let root = tree.root();
        assert!(!tree.append_text(root, "loose"));

        let p = tree.append_element(root, FlowKind::Paragraph).unwrap();
        assert!(tree.append_text(p, "Hello "));
        assert!(tree.append_text(p, "world"));
        assert_eq!(tree.children(p).len(), 1);
        assert_eq!(tree.text(tree.children(p)[0]), Some("Hello world"));
    }

    #[test]
    fn test_set_attribute_overwrites_in_place() {
        let mut tree = FlowTree::new(FlowKind::Section);
        let root = tree.root();
        tree.set_font_size(root, 12.5);
        tree.set_foreground(root, Color::RED);
        tree.set_font_size(root, 24.0);

        assert_eq!(
            tree.attributes(root),
            &[
                ("FontSize".to_string(), "24".to_string()),
                ("Foreground".to_string(), "#FFFF0000".to_string()),
            ]
        );
    }

    #[test]
    fn test_apply_style_order_and_sparseness() {
        let mut tree = FlowTree::new(FlowKind::Section);
        let table = tree.append_element(tree.root(), FlowKind::Table).unwrap();
        let style = StyleRecord::new("table")
            .with_spacing(5.0)
            .with_text_alignment(TextAlignment::Center)
            .with_border_brush(Color::BLUE);
        tree.apply_style(table, &style);

        let names: Vec<&str> = tree.attributes(table).iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            ["FontSize", "FontWeight", "TextAlignment", "BorderBrush", "CellSpacing"]
        );
        assert_eq!(tree.attribute(table, "CellSpacing"), Some("5"));
    }

    #[test]
    fn test_apply_style_skips_unstyled_kinds() {
        let mut tree = FlowTree::new(FlowKind::Section);
        let p = tree.append_element(tree.root(), FlowKind::Paragraph).unwrap();
        let bold = tree.append_element(p, FlowKind::Bold).unwrap();
        let image = tree.append_element(p, FlowKind::Image).unwrap();
        let style = StyleRecord::new("x")
            .with_spacing(3.0)
            .with_horizontal_alignment(HorizontalAlignment::Center);

        tree.apply_style(bold, &style);
        tree.apply_style(image, &style);
        tree.apply_style(p, &style);

        assert!(tree.attributes(bold).is_empty());
        assert_eq!(
            tree.attributes(image),
            &[("HorizontalAlignment".to_string(), "Center".to_string())]
        );
        // Spacing is table-only.
        assert_eq!(tree.attribute(p, "CellSpacing"), None);
    }

    #[test]
    fn test_uri_policy() {
        assert!(is_navigable_uri("https://example.com"));
        assert!(is_navigable_uri("http://example.com/a?b=c#d"));
        assert!(!is_navigable_uri("javascript:evil()"));
        assert!(!is_navigable_uri("ftp://example.com/file"));
        assert!(!is_navigable_uri("/relative/path.png"));
        assert!(!is_navigable_uri("https://exa mple.com"));
        assert!(!is_navigable_uri(""));

        let mut tree = FlowTree::new(FlowKind::Section);
        let p = tree.append_element(tree.root(), FlowKind::Paragraph).unwrap();
        let link = tree.append_element(p, FlowKind::Hyperlink).unwrap();
        assert!(!tree.set_navigate_uri(link, "#top"));
        assert!(!tree.set_navigate_uri(link, "javascript:evil()"));
        assert!(tree.attributes(link).is_empty());
        assert!(tree.set_navigate_uri(link, "https://example.com"));
        assert_eq!(tree.attribute(link, "NavigateUri"), Some("https://example.com"));
    }

    #[test]
    fn test_spans_only_on_cells() {
        let mut tree = FlowTree::new(FlowKind::Section);
        let table = tree.append_element(tree.root(), FlowKind::Table).unwrap();
        let group = tree.append_element(table, FlowKind::TableRowGroup).unwrap();
        let row = tree.append_element(group, FlowKind::TableRow).unwrap();
        let cell = tree.append_element(row, FlowKind::TableCell).unwrap();

        assert!(!tree.set_column_span(row, 2, 3));
        assert!(tree.set_column_span(cell, 7, 3));
        assert!(tree.set_row_span(cell, -2, 4));
        assert_eq!(tree.attribute(cell, "ColumnSpan"), Some("3"));
        assert_eq!(tree.attribute(cell, "RowSpan"), Some("0"));
    }
}
