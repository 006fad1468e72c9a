//! Arena-based DOM for HTML parsing.
//!
//! html5ever parses into this tree through [`ArenaSink`](super::tree_sink::ArenaSink).
//! The converter only ever reads it, apart from the comment-stripping pass
//! that runs once before traversal.

use html5ever::QualName;

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Sentinel value for no node.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    Element { name: QualName, attrs: Vec<Attribute> },
    /// Text content.
    Text(String),
    /// Comment. Stripped before conversion.
    Comment(String),
    /// Document type declaration.
    Doctype { name: String },
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
///
/// All nodes live in one vector; parent/child/sibling links are indices
/// into it. Detached nodes stay allocated but become unreachable.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: ArenaNodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: ArenaNodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(ArenaNodeData::Document));
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> ArenaNodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Element { name, attrs }))
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Text(text)))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Comment(text)))
    }

    /// Create a doctype node.
    pub fn create_doctype(&mut self, name: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Doctype { name }))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = ArenaNodeId::NONE;
        }

        if last_child.is_some()
            && let Some(last_node) = self.get_mut(last_child)
        {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let (parent, prev) = match self.get(sibling) {
            Some(n) => (n.parent, n.prev_sibling),
            None => return,
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to an existing trailing text node, or create a new one.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let ArenaNodeData::Text(ref mut existing) = last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Unlink a node from its parent and siblings. Its own subtree is kept.
    pub fn detach(&mut self, target: ArenaNodeId) {
        let (parent, prev, next) = match self.get(target) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(target) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Get the number of allocated nodes (including detached ones).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(ArenaNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Iterate over all descendants of a node in document order (excluding the node itself).
    pub fn descendants(&self, root: ArenaNodeId) -> DescendantsIter<'_> {
        let mut stack: Vec<ArenaNodeId> = self.children(root).collect();
        stack.reverse();
        DescendantsIter { dom: self, stack }
    }

    /// Find the first node under `root` matching a predicate (DFS, document order).
    pub fn find_from<F>(&self, root: ArenaNodeId, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        self.descendants(root)
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find element by tag name (first match in the whole document).
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.find_from(self.document, |node| {
            matches!(&node.data, ArenaNodeData::Element { name, .. } if name.local.as_ref() == tag)
        })
    }

    /// Resolve a simple slash-separated tag path such as `head/base`.
    ///
    /// The first segment may appear anywhere in the document; each following
    /// segment must be a direct element child of the previous match.
    pub fn select(&self, path: &str) -> Option<ArenaNodeId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let rest: Vec<&str> = segments.collect();

        let candidates = self
            .descendants(self.document)
            .filter(|&id| self.element_name(id) == Some(first));
        for start in candidates {
            let mut current = Some(start);
            for segment in &rest {
                current = current.and_then(|id| {
                    self.children(id)
                        .find(|&c| self.element_name(c) == Some(*segment))
                });
            }
            if current.is_some() {
                return current;
            }
        }
        None
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(ArenaNodeId::NONE);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantsIter<'a> {
    dom: &'a ArenaDom,
    stack: Vec<ArenaNodeId>,
}

impl Iterator for DescendantsIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let mut children: Vec<_> = self.dom.children(id).collect();
        children.reverse();
        self.stack.extend(children);
        Some(id)
    }
}

/// Convenience methods for element and text nodes.
impl ArenaDom {
    /// Get element's local name (tag), lowercase as produced by html5ever.
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(name.local.as_ref()),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Element { .. }))
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Text(_)))
    }

    /// Check if node is a comment.
    pub fn is_comment(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Comment(_)))
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Concatenated text of all descendant text nodes.
    pub fn inner_text(&self, id: ArenaNodeId) -> String {
        if let Some(text) = self.text_content(id) {
            return text.to_string();
        }
        let mut out = String::new();
        for desc in self.descendants(id) {
            if let Some(text) = self.text_content(desc) {
                out.push_str(text);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use html5ever::{LocalName, ns};

    use super::*;

    fn make_qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    #[test]
    fn test_append_children() {
        let mut dom = ArenaDom::new();

        let parent = dom.create_element(make_qname("div"), vec![]);
        let child1 = dom.create_element(make_qname("p"), vec![]);
        let child2 = dom.create_element(make_qname("p"), vec![]);

        dom.append(dom.document(), parent);
        dom.append(parent, child1);
        dom.append(parent, child2);

        let children: Vec<_> = dom.children(parent).collect();
        assert_eq!(children, vec![child1, child2]);
        assert_eq!(dom.element_name(parent), Some("div"));
    }

    #[test]
    fn test_text_merging() {
        let mut dom = ArenaDom::new();

        let p = dom.create_element(make_qname("p"), vec![]);
        dom.append(dom.document(), p);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        let children: Vec<_> = dom.children(p).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("Hello, World!"));
    }

    #[test]
    fn test_detach_middle_child() {
        let mut dom = ArenaDom::new();
        let div = dom.create_element(make_qname("div"), vec![]);
        let a = dom.create_text("a".into());
        let b = dom.create_comment("b".into());
        let c = dom.create_text("c".into());
        dom.append(dom.document(), div);
        dom.append(div, a);
        dom.append(div, b);
        dom.append(div, c);

        dom.detach(b);

        let children: Vec<_> = dom.children(div).collect();
        assert_eq!(children, vec![a, c]);
        assert_eq!(dom.inner_text(div), "ac");
    }

    #[test]
    fn test_detach_only_child() {
        let mut dom = ArenaDom::new();
        let div = dom.create_element(make_qname("div"), vec![]);
        let a = dom.create_text("a".into());
        dom.append(dom.document(), div);
        dom.append(div, a);

        dom.detach(a);

        assert_eq!(dom.children(div).count(), 0);
        assert!(dom.get(div).unwrap().last_child.is_none());
    }

    #[test]
    fn test_select_path() {
        let mut dom = ArenaDom::new();
        let html = dom.create_element(make_qname("html"), vec![]);
        let head = dom.create_element(make_qname("head"), vec![]);
        let base = dom.create_element(
            make_qname("base"),
            vec![Attribute {
                name: make_qname("href"),
                value: "https://site.test/".into(),
            }],
        );
        dom.append(dom.document(), html);
        dom.append(html, head);
        dom.append(head, base);

        assert_eq!(dom.select("head/base"), Some(base));
        assert_eq!(dom.select("html/base"), None);
        assert_eq!(dom.get_attr(base, "href"), Some("https://site.test/"));
    }
}
