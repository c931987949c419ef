//! mdsite-markdown: Block and inline parsing for mdsite's markup dialect
//!
//! This crate provides:
//! - Block segmentation (blank-line separated blocks)
//! - Block classification (heading, code, quote, lists, paragraph)
//! - Inline tokenization into typed text spans
//!
//! # Example
//!
//! ```
//! use mdsite_markdown::{BlockType, TextSpan, classify, segment, tokenize};
//!
//! let blocks = segment("# Title\n\nSome **bold** text");
//! assert_eq!(classify(&blocks[0]), BlockType::Heading);
//! assert_eq!(classify(&blocks[1]), BlockType::Paragraph);
//!
//! let spans = tokenize(&blocks[1]).unwrap();
//! assert_eq!(spans[1], TextSpan::bold("bold"));
//! ```

pub mod block;
pub mod inline;

// Re-export main types for convenient access
pub use block::{BlockType, classify, heading_level, ordered_prefix, segment};
pub use inline::{
    Delimiter, InlineError, TextSpan, extract_images, extract_links, split_delimited,
    split_images, split_links, tokenize,
};
