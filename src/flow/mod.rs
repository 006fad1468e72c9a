//! Flow-document output tree.
//!
//! The converter builds a [`FlowTree`] node by node. Every append goes
//! through [`FlowKind::accepts`], so the tree can never hold a child its
//! parent would reject. Once built, the tree is written out by
//! [`FlowTree::to_markup`].

mod tree;
mod writer;

pub use tree::{FlowNode, FlowNodeData, FlowNodeId, FlowTree, is_navigable_uri};
pub use writer::FLOW_NAMESPACE;

/// Element kinds of the target vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    FlowDocument,
    Section,
    Paragraph,
    Span,
    Run,
    Bold,
    Italic,
    Underline,
    Hyperlink,
    LineBreak,
    Image,
    List,
    ListItem,
    Table,
    /// Column definitions of a table, written as `Table.Columns`.
    TableColumnGroup,
    TableColumn,
    TableRowGroup,
    TableRow,
    TableCell,
    BlockUIContainer,
    InlineUIContainer,
}

const BLOCK_CONTENT: &[FlowKind] = &[
    FlowKind::Section,
    FlowKind::Paragraph,
    FlowKind::List,
    FlowKind::Table,
    FlowKind::BlockUIContainer,
];

/// Block content of list items and cells; sections stay at the top levels.
const ITEM_CONTENT: &[FlowKind] = &[
    FlowKind::Paragraph,
    FlowKind::List,
    FlowKind::Table,
    FlowKind::BlockUIContainer,
];

const INLINE_CONTENT: &[FlowKind] = &[
    FlowKind::Run,
    FlowKind::Span,
    FlowKind::Bold,
    FlowKind::Italic,
    FlowKind::Underline,
    FlowKind::Hyperlink,
    FlowKind::Image,
    FlowKind::LineBreak,
    FlowKind::InlineUIContainer,
];

/// Kinds that take visual style attributes from a style record.
const STYLED_KINDS: &[FlowKind] = &[
    FlowKind::BlockUIContainer,
    FlowKind::List,
    FlowKind::Paragraph,
    FlowKind::Section,
    FlowKind::Table,
    FlowKind::TableCell,
];

impl FlowKind {
    /// Element name written to the markup.
    pub fn tag_name(self) -> &'static str {
        match self {
            FlowKind::FlowDocument => "FlowDocument",
            FlowKind::Section => "Section",
            FlowKind::Paragraph => "Paragraph",
            FlowKind::Span => "Span",
            FlowKind::Run => "Run",
            FlowKind::Bold => "Bold",
            FlowKind::Italic => "Italic",
            FlowKind::Underline => "Underline",
            FlowKind::Hyperlink => "Hyperlink",
            FlowKind::LineBreak => "LineBreak",
            FlowKind::Image => "Image",
            FlowKind::List => "List",
            FlowKind::ListItem => "ListItem",
            FlowKind::Table => "Table",
            FlowKind::TableColumnGroup => "Table.Columns",
            FlowKind::TableColumn => "TableColumn",
            FlowKind::TableRowGroup => "TableRowGroup",
            FlowKind::TableRow => "TableRow",
            FlowKind::TableCell => "TableCell",
            FlowKind::BlockUIContainer => "BlockUIContainer",
            FlowKind::InlineUIContainer => "InlineUIContainer",
        }
    }

    /// Child kinds this kind may parent.
    pub fn permitted_children(self) -> &'static [FlowKind] {
        match self {
            FlowKind::FlowDocument | FlowKind::Section => BLOCK_CONTENT,
            FlowKind::ListItem | FlowKind::TableCell => ITEM_CONTENT,
            FlowKind::Paragraph
            | FlowKind::Span
            | FlowKind::Bold
            | FlowKind::Italic
            | FlowKind::Underline
            | FlowKind::Hyperlink => INLINE_CONTENT,
            FlowKind::List => &[FlowKind::ListItem],
            FlowKind::Table => &[FlowKind::TableColumnGroup, FlowKind::TableRowGroup],
            FlowKind::TableColumnGroup => &[FlowKind::TableColumn],
            FlowKind::TableRowGroup => &[FlowKind::TableRow],
            FlowKind::TableRow => &[FlowKind::TableCell],
            FlowKind::Run
            | FlowKind::LineBreak
            | FlowKind::Image
            | FlowKind::TableColumn
            | FlowKind::BlockUIContainer
            | FlowKind::InlineUIContainer => &[],
        }
    }

    /// Whether an element of this kind may receive a `child` element.
    pub fn accepts(self, child: FlowKind) -> bool {
        self.permitted_children().contains(&child)
    }

    /// Whether raw text may be appended directly.
    pub fn accepts_text(self) -> bool {
        matches!(
            self,
            FlowKind::Paragraph
                | FlowKind::Bold
                | FlowKind::Hyperlink
                | FlowKind::Italic
                | FlowKind::Run
                | FlowKind::Span
                | FlowKind::Underline
        )
    }

    /// Whether style records are applied to this kind.
    pub fn accepts_style(self) -> bool {
        STYLED_KINDS.contains(&self)
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_containers() {
        for parent in [FlowKind::FlowDocument, FlowKind::Section, FlowKind::ListItem, FlowKind::TableCell] {
            assert!(parent.accepts(FlowKind::Paragraph), "{parent}");
            assert!(parent.accepts(FlowKind::List), "{parent}");
            assert!(parent.accepts(FlowKind::Table), "{parent}");
            assert!(!parent.accepts(FlowKind::Bold), "{parent}");
            assert!(!parent.accepts_text(), "{parent}");
        }
    }

    #[test]
    fn test_sections_only_nest_at_top_levels() {
        assert!(FlowKind::FlowDocument.accepts(FlowKind::Section));
        assert!(FlowKind::Section.accepts(FlowKind::Section));
        assert!(!FlowKind::ListItem.accepts(FlowKind::Section));
        assert!(!FlowKind::TableCell.accepts(FlowKind::Section));
        assert!(FlowKind::TableCell.accepts(FlowKind::BlockUIContainer));
    }

    #[test]
    fn test_paragraph_rejects_blocks() {
        assert!(FlowKind::Paragraph.accepts(FlowKind::Bold));
        assert!(FlowKind::Paragraph.accepts(FlowKind::Image));
        assert!(!FlowKind::Paragraph.accepts(FlowKind::Paragraph));
        assert!(!FlowKind::Paragraph.accepts(FlowKind::Section));
        assert!(!FlowKind::Span.accepts(FlowKind::Table));
        assert!(FlowKind::Paragraph.accepts_text());
    }

    #[test]
    fn test_table_structure() {
        assert_eq!(FlowKind::List.permitted_children(), &[FlowKind::ListItem]);
        assert!(FlowKind::Table.accepts(FlowKind::TableRowGroup));
        assert!(!FlowKind::Table.accepts(FlowKind::TableRow));
        assert!(FlowKind::TableRowGroup.accepts(FlowKind::TableRow));
        assert!(FlowKind::TableRow.accepts(FlowKind::TableCell));
        assert!(!FlowKind::TableRow.accepts(FlowKind::Paragraph));
        assert!(FlowKind::TableColumnGroup.accepts(FlowKind::TableColumn));
    }

    #[test]
    fn test_leaves() {
        for leaf in [FlowKind::Run, FlowKind::Image, FlowKind::LineBreak, FlowKind::TableColumn] {
            assert!(leaf.permitted_children().is_empty(), "{leaf}");
        }
        assert!(FlowKind::Run.accepts_text());
        assert!(!FlowKind::Image.accepts_text());
    }

    #[test]
    fn test_style_set() {
        assert!(FlowKind::TableCell.accepts_style());
        assert!(FlowKind::Section.accepts_style());
        assert!(!FlowKind::Bold.accepts_style());
        assert!(!FlowKind::TableRow.accepts_style());
        assert!(!FlowKind::Image.accepts_style());
        assert_eq!(FlowKind::TableColumnGroup.tag_name(), "Table.Columns");
    }
}
