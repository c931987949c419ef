//! Markdown document to HTML node tree conversion
//!
//! Segments a document into blocks, classifies each block, tokenizes its
//! inline text and assembles one `div` root holding a subtree per block.

use mdsite_html::{Node, RenderError, render};
use mdsite_markdown::block::{QUOTE_PREFIX, UNORDERED_PREFIX};
use mdsite_markdown::{
    BlockType, InlineError, TextSpan, classify, heading_level, ordered_prefix, segment, tokenize,
};
use thiserror::Error;

/// Conversion errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error(transparent)]
    Inline(#[from] InlineError),

    #[error("Missing title: no top-level (#) heading found")]
    MissingTitle,

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Conversion result type
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Tag of the root node wrapping all blocks
pub const ROOT_TAG: &str = "div";

/// Convert a markdown document into an HTML node tree rooted at a `div`
pub fn build(document: &str) -> Result<Node> {
    let children = segment(document)
        .iter()
        .map(|block| convert_block(block))
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent(ROOT_TAG, children))
}

/// Convert a markdown document straight to an HTML string
pub fn markdown_to_html(document: &str) -> Result<String> {
    Ok(render(&build(document)?)?)
}

/// Extract the document title from its first `# ` heading
pub fn title(document: &str) -> Result<String> {
    segment(document)
        .iter()
        .find(|block| classify(block) == BlockType::Heading && heading_level(block) == Some(1))
        .map(|block| block[2..].trim().to_string())
        .ok_or(ConvertError::MissingTitle)
}

/// Convert one block into its subtree
pub fn convert_block(block: &str) -> Result<Node> {
    match classify(block) {
        BlockType::Paragraph => convert_paragraph(block),
        BlockType::Heading => convert_heading(block),
        BlockType::Code => Ok(convert_code(block)),
        BlockType::Quote => convert_quote(block),
        BlockType::UnorderedList => convert_unordered_list(block),
        BlockType::OrderedList => convert_ordered_list(block),
    }
}

fn convert_paragraph(block: &str) -> Result<Node> {
    Ok(Node::parent("p", text_to_children(block)?))
}

fn convert_heading(block: &str) -> Result<Node> {
    let Some(level) = heading_level(block) else {
        return convert_paragraph(block);
    };
    let text = &block[level as usize + 1..];
    Ok(Node::parent(format!("h{level}"), text_to_children(text)?))
}

fn convert_code(block: &str) -> Node {
    let lines: Vec<&str> = block.split('\n').collect();
    let inner = match lines.as_slice() {
        [_, inner @ .., _] => inner.join("\n"),
        _ => String::new(),
    };
    Node::parent("pre", vec![Node::leaf("code", inner + "\n")])
}

fn convert_quote(block: &str) -> Result<Node> {
    let text = block
        .split('\n')
        .filter_map(|line| {
            if line == ">" {
                Some("")
            } else {
                line.strip_prefix(QUOTE_PREFIX)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Node::parent("blockquote", text_to_children(&text)?))
}

fn convert_unordered_list(block: &str) -> Result<Node> {
    let items = block
        .split('\n')
        .map(|line| list_item(line.strip_prefix(UNORDERED_PREFIX).unwrap_or(line)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent("ul", items))
}

fn convert_ordered_list(block: &str) -> Result<Node> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let prefix = ordered_prefix(i + 1);
            list_item(line.strip_prefix(prefix.as_str()).unwrap_or(line))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent("ol", items))
}

fn list_item(text: &str) -> Result<Node> {
    Ok(Node::parent("li", text_to_children(text)?))
}

/// Tokenize inline text and map every span to a leaf node
pub fn text_to_children(text: &str) -> Result<Vec<Node>> {
    Ok(tokenize(text)?.into_iter().map(span_to_node).collect())
}

/// Map one text span to its HTML leaf
pub fn span_to_node(span: TextSpan) -> Node {
    match span {
        TextSpan::Plain { text } => Node::text(text),
        TextSpan::Bold { text } => Node::leaf("b", text),
        TextSpan::Italic { text } => Node::leaf("i", text),
        TextSpan::Code { text } => Node::leaf("code", text),
        TextSpan::Link { text, url } => Node::leaf("a", text).with_prop("href", url),
        TextSpan::Image { text, url } => Node::leaf("img", "")
            .with_prop("src", url)
            .with_prop("alt", text),
    }
}
