//! mdsite-html: HTML node tree and serializer for mdsite
//!
//! This crate provides:
//! - A two-shaped node tree (leaf / parent) with ordered properties
//! - Serialization of that tree to an HTML string
//!
//! ## Example
//!
//! ```rust
//! use mdsite_html::{Node, render};
//!
//! let tree = Node::parent("div", vec![
//!     Node::parent("p", vec![Node::text("Hello "), Node::leaf("b", "world")]),
//! ]);
//!
//! let html = render(&tree).unwrap();
//! assert_eq!(html, "<div><p>Hello <b>world</b></p></div>");
//! ```

pub mod node;
pub mod writer;

pub use node::{LeafNode, Node, ParentNode, Props};
pub use writer::{RenderError, Result, props_to_html, render};
