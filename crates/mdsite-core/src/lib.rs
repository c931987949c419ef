//! mdsite-core: Core library for converting markdown documents to HTML
//!
//! This crate provides:
//! - Document assembly: blocks and inline spans to an HTML node tree
//! - Title extraction from the first top-level heading
//!
//! Block and inline parsing live in `mdsite-markdown`, the node tree and
//! its serializer in `mdsite-html`; both are re-exported here.

pub mod convert;

pub use convert::{
    ConvertError, ROOT_TAG, Result, build, convert_block, markdown_to_html, span_to_node,
    text_to_children, title,
};

// Re-export from the parsing and tree crates
pub use mdsite_html::{LeafNode, Node, ParentNode, Props, RenderError, props_to_html, render};
pub use mdsite_markdown::{BlockType, InlineError, TextSpan, classify, segment, tokenize};
