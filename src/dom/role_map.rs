//! Maps HTML element names to conversion categories.
//!
//! The category decides which handler the converter dispatches to. Membership
//! is checked in a fixed order and the first match wins.

/// Routing bucket for a source element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Block containers that become a `Section` (div, section, ...).
    Section,
    /// Text blocks that become a `Paragraph` (p, h1-h6, pre).
    Paragraph,
    /// Inline formatting (a, b, i, span, ...).
    Inline,
    /// `ul` / `ol`.
    List,
    /// `li`.
    ListItem,
    /// `table`.
    Table,
    /// Table structure below the table itself (thead, tr, td, ...).
    TableItem,
    /// `img`.
    Image,
    /// Skipped together with its whole subtree.
    Ignore,
    /// Anything not listed above.
    Unknown,
}

const SECTION_BLOCKS: &[&str] = &[
    "main",
    "div",
    "section",
    "header",
    "figure",
    "figcaption",
    "footer",
    "article",
    "aside",
    "blockquote",
];
const PARAGRAPH_BLOCKS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "pre"];
const INLINE_ELEMENTS: &[&str] = &["a", "b", "strong", "i", "em", "u", "span", "code", "br"];
const LIST_ELEMENTS: &[&str] = &["ol", "ul"];
const LIST_ITEM_ELEMENTS: &[&str] = &["li"];
const TABLE_ELEMENTS: &[&str] = &["table"];
const TABLE_ITEM_ELEMENTS: &[&str] = &["thead", "tbody", "tfoot", "tr", "th", "td"];
const IMAGE_ELEMENTS: &[&str] = &["img"];
const IGNORED_ELEMENTS: &[&str] = &[
    "head", "meta", "link", "script", "style", "title", "nav", "button", "template", "noscript",
];

const CATEGORY_TABLE: &[(&[&str], Category)] = &[
    (SECTION_BLOCKS, Category::Section),
    (PARAGRAPH_BLOCKS, Category::Paragraph),
    (INLINE_ELEMENTS, Category::Inline),
    (LIST_ELEMENTS, Category::List),
    (LIST_ITEM_ELEMENTS, Category::ListItem),
    (TABLE_ELEMENTS, Category::Table),
    (TABLE_ITEM_ELEMENTS, Category::TableItem),
    (IMAGE_ELEMENTS, Category::Image),
    (IGNORED_ELEMENTS, Category::Ignore),
];

/// Classify a lowercase tag name.
pub fn classify(tag: &str) -> Category {
    CATEGORY_TABLE
        .iter()
        .find(|(members, _)| members.contains(&tag))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Unknown)
}

/// Whether the tag is a table cell (`th` or `td`).
pub fn is_table_cell(tag: &str) -> bool {
    matches!(tag, "th" | "td")
}
