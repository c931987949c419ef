//! HTML node tree types
//!
//! A node is either a leaf (a single unit of content with no children) or a
//! parent (a tagged element owning an ordered list of children). Both carry an
//! optional tag and an insertion-ordered property map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Element properties (HTML attributes), rendered in insertion order
pub type Props = IndexMap<String, String>;

/// An HTML node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Leaf(LeafNode),
    Parent(ParentNode),
}

/// Leaf node: raw text when untagged, otherwise `<tag>value</tag>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

/// Parent node
///
/// The tag is optional only so that trees coming from outside (e.g. JSON)
/// can be represented; rendering a parent without a tag fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: Props,
}

// Convenience constructors
impl Node {
    /// Untagged leaf, rendered verbatim
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: None,
            value: value.into(),
            props: Props::new(),
        })
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: value.into(),
            props: Props::new(),
        })
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent(ParentNode {
            tag: Some(tag.into()),
            children,
            props: Props::new(),
        })
    }

    /// Add a property, replacing the value in place if the key already exists
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let props = match &mut self {
            Node::Leaf(l) => &mut l.props,
            Node::Parent(p) => &mut p.props,
        };
        props.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(l) => l.tag.as_deref(),
            Node::Parent(p) => p.tag.as_deref(),
        }
    }

    pub fn props(&self) -> &Props {
        match self {
            Node::Leaf(l) => &l.props,
            Node::Parent(p) => &p.props,
        }
    }

    /// Children of a parent; a leaf has none
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(p) => &p.children,
        }
    }

    /// Render this node to HTML
    pub fn to_html(&self) -> crate::writer::Result<String> {
        crate::writer::render(self)
    }
}
