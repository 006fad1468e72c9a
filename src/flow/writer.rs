//! Markup serialization of a [`FlowTree`] using quick-xml.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::tree::{FlowNodeData, FlowNodeId, FlowTree};
use crate::error::Result;

/// Default namespace written on the root element.
pub const FLOW_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";

impl FlowTree {
    /// Serialize the tree to markup.
    ///
    /// No XML declaration is written. With `indent` set, nested elements are
    /// placed on their own lines with four spaces per level.
    pub fn to_markup(&self, indent: bool) -> Result<String> {
        let mut writer = if indent {
            Writer::new_with_indent(Vec::new(), b' ', 4)
        } else {
            Writer::new(Vec::new())
        };
        write_node(self, self.root(), &mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_node(tree: &FlowTree, id: FlowNodeId, writer: &mut Writer<Vec<u8>>) -> Result<()> {
    let Some(node) = tree.node(id) else {
        return Ok(());
    };
    match &node.data {
        FlowNodeData::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        FlowNodeData::Element { kind, attrs } => {
            let name = kind.tag_name();
            let mut start = BytesStart::new(name);
            if node.parent.is_none() {
                start.push_attribute(("xmlns", FLOW_NAMESPACE));
            }
            for (key, value) in attrs {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if node.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for &child in &node.children {
                    write_node(tree, child, writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
    }
    Ok(())
}
