//! Source document model.
//!
//! html5ever parses raw HTML into an [`ArenaDom`]; the converter reads it
//! through the helpers in this module. The tree is mutated exactly once, by
//! [`strip_comments`], before any traversal starts.

mod arena;
pub mod role_map;
mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter};
pub use role_map::{Category, classify};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::ArenaSink;

/// Parse HTML text into an arena DOM.
///
/// Fragments are accepted; the parser supplies the missing `html`, `head`
/// and `body` elements the way a browser would.
pub fn parse_html(html: &str) -> ArenaDom {
    let sink = ArenaSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}

/// Remove every comment node under `root`, at any depth.
///
/// Returns the number of comments removed.
pub fn strip_comments(dom: &mut ArenaDom, root: ArenaNodeId) -> usize {
    let comments: Vec<ArenaNodeId> = dom
        .descendants(root)
        .filter(|&id| dom.is_comment(id))
        .collect();
    for &id in &comments {
        dom.detach(id);
    }
    comments.len()
}

/// True when every child of `id` is a text node (vacuously true without children).
pub fn has_only_text(dom: &ArenaDom, id: ArenaNodeId) -> bool {
    dom.children(id).all(|child| dom.is_text(child))
}

/// True for text nodes that contain nothing but whitespace.
pub fn is_blank_text(dom: &ArenaDom, id: ArenaNodeId) -> bool {
    dom.text_content(id).is_some_and(|t| t.trim().is_empty())
}

/// Inner text with non-breaking spaces turned into plain spaces.
pub fn clean_text(dom: &ArenaDom, id: ArenaNodeId) -> String {
    dom.inner_text(id).replace('\u{a0}', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_nested() {
        let mut dom = parse_html(
            "<div>a<!-- one --><p>b<!-- two <b>not markup</b> --></p><!-- three --></div>",
        );
        let doc = dom.document();
        let removed = strip_comments(&mut dom, doc);

        assert_eq!(removed, 3);
        let div = dom.find_by_tag("div").unwrap();
        assert!(dom.descendants(dom.document()).all(|id| !dom.is_comment(id)));
        assert_eq!(dom.inner_text(div), "ab");
    }

    #[test]
    fn test_text_only_detection() {
        let mut dom = parse_html("<p>plain <!-- c --> text</p><p>with <b>bold</b></p><p></p>");
        let doc = dom.document();
        strip_comments(&mut dom, doc);

        let ps: Vec<_> = dom
            .descendants(dom.document())
            .filter(|&id| dom.element_name(id) == Some("p"))
            .collect();
        assert!(has_only_text(&dom, ps[0]));
        assert!(!has_only_text(&dom, ps[1]));
        assert!(has_only_text(&dom, ps[2]));
    }

    #[test]
    fn test_clean_text_replaces_nbsp() {
        let dom = parse_html("<p>a&nbsp;b</p>");
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(clean_text(&dom, p), "a b");
    }

    #[test]
    fn test_blank_text() {
        let dom = parse_html("<div>\n   <p>x</p></div>");
        let div = dom.find_by_tag("div").unwrap();
        let first = dom.children(div).next().unwrap();
        assert!(is_blank_text(&dom, first));
        assert!(!is_blank_text(&dom, div));
    }
}
