//! Node tree to HTML writer
//!
//! Converts a node tree into an HTML string. Text and attribute values are
//! emitted verbatim; no escaping is performed.

use crate::node::{LeafNode, Node, ParentNode, Props};
use thiserror::Error;

/// Errors raised while rendering a node tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid node for rendering: parent node has no tag")]
    InvalidNodeForRendering,
}

/// Render result type
pub type Result<T> = std::result::Result<T, RenderError>;

/// Render a node tree to HTML
pub fn render(node: &Node) -> Result<String> {
    let mut writer = Writer::new();
    writer.write_node(node)?;
    Ok(writer.output)
}

/// Render a property map as ` key="value"` pairs in insertion order
pub fn props_to_html(props: &Props) -> String {
    let mut out = String::new();
    push_props(&mut out, props);
    out
}

fn push_props(out: &mut String, props: &Props) {
    for (key, value) in props {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

/// HTML writer state
struct Writer {
    output: String,
}

impl Writer {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn write_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::Leaf(l) => {
                self.write_leaf(l);
                Ok(())
            }
            Node::Parent(p) => self.write_parent(p),
        }
    }

    fn write_leaf(&mut self, leaf: &LeafNode) {
        match &leaf.tag {
            None => self.output.push_str(&leaf.value),
            Some(tag) => {
                self.open_tag(tag, &leaf.props);
                self.output.push_str(&leaf.value);
                self.close_tag(tag);
            }
        }
    }

    fn write_parent(&mut self, parent: &ParentNode) -> Result<()> {
        let tag = parent.tag.as_deref().ok_or(RenderError::InvalidNodeForRendering)?;
        self.open_tag(tag, &parent.props);
        for child in &parent.children {
            self.write_node(child)?;
        }
        self.close_tag(tag);
        Ok(())
    }

    fn open_tag(&mut self, tag: &str, props: &Props) {
        self.output.push('<');
        self.output.push_str(tag);
        push_props(&mut self.output, props);
        self.output.push('>');
    }

    fn close_tag(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }
}
