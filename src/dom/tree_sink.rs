//! html5ever TreeSink implementation for ArenaDom.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId, Attribute};

/// Handle used by TreeSink to reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub ArenaNodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(ArenaNodeId::NONE)
    }
}

/// TreeSink implementation that builds an ArenaDom.
///
/// html5ever's TreeSink takes `&self` everywhere, so the DOM sits behind a RefCell.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }

    fn append_to(&self, parent: ArenaNodeId, child: NodeOrText<NodeHandle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        // Lenient like browsers; malformed markup is repaired by the tree builder.
        log::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(ArenaNodeData::Element { name, .. }) => {
                // SAFETY: nodes are never freed while the sink is alive and element
                // names are never rewritten, so the QualName outlives this borrow.
                // The RefCell guard cannot express that, hence the lifetime extension.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let converted_attrs: Vec<Attribute> = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();

        NodeHandle(self.dom.borrow_mut().create_element(name, converted_attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        // Processing instructions are dropped with the comments.
        NodeHandle(self.dom.borrow_mut().create_comment(data.to_string()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.append_to(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self
            .dom
            .borrow()
            .get(element.0)
            .map(|n| n.parent)
            .unwrap_or(ArenaNodeId::NONE);
        if parent.is_some() {
            self.append_to(parent, child);
        } else {
            self.append_to(prev_element.0, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doc = dom.document();
        let doctype = dom.create_doctype(name.to_string());
        dom.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents live inline; `template` is an ignored element anyway.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => dom.insert_before(sibling.0, node.0),
            NodeOrText::AppendText(text) => {
                let text_node = dom.create_text(text.to_string());
                dom.insert_before(sibling.0, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        if let Some(node) = dom.get_mut(target.0)
            && let ArenaNodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(Attribute {
                        name: attr.name,
                        value: attr.value.to_string(),
                    });
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut dom = self.dom.borrow_mut();
        let children: Vec<_> = dom.children(node.0).collect();
        for child in children {
            dom.detach(child);
            dom.append(new_parent.0, child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_html;

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><p>Hello</p></body></html>");

        let p = dom.find_by_tag("p").expect("should find p");
        assert_eq!(dom.element_name(p), Some("p"));

        let text_id = dom.children(p).next().expect("p should have child");
        assert_eq!(dom.text_content(text_id), Some("Hello"));
    }

    #[test]
    fn test_fragment_gets_body() {
        let dom = parse_html("<p>loose fragment</p>");

        let body = dom.find_by_tag("body").expect("parser synthesizes body");
        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(dom.get(p).unwrap().parent, body);
    }

    #[test]
    fn test_attributes() {
        let dom = parse_html(r#"<a href="https://example.com" title="x">Link</a>"#);

        let a = dom.find_by_tag("a").expect("should find a");
        assert_eq!(dom.get_attr(a, "href"), Some("https://example.com"));
        assert_eq!(dom.get_attr(a, "missing"), None);
    }

    #[test]
    fn test_misnested_markup_is_repaired() {
        // Adoption agency algorithm exercises reparent_children and remove_from_parent
        let dom = parse_html("<p><b>bold <i>both</b> italic</i></p>");

        let p = dom.find_by_tag("p").unwrap();
        assert_eq!(dom.inner_text(p), "bold both italic");
    }
}
