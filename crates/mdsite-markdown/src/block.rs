//! Block segmentation and classification
//!
//! A document is split into blocks on blank lines; each block is then
//! assigned exactly one [`BlockType`] by a fixed priority order.

use serde::{Deserialize, Serialize};

/// Structural type of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// Deepest heading level (`######`)
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Separator between two blocks
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Code fence marker
pub const FENCE: &str = "```";

/// Quote line prefix
pub const QUOTE_PREFIX: &str = "> ";

/// Unordered list item prefix
pub const UNORDERED_PREFIX: &str = "- ";

/// Split a document into blocks
///
/// Blocks are separated by a blank line (`\n\n`); longer runs of line
/// breaks count as one boundary. Each line of a block is trimmed
/// independently. Blocks are never empty and never start or end with a
/// line break.
pub fn segment(document: &str) -> Vec<String> {
    document
        .split(BLOCK_SEPARATOR)
        .map(|piece| {
            piece
                .split('\n')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
                .trim_matches('\n')
                .to_string()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// Heading level of a block: 1-6 leading `#` followed by a space
///
/// This is the single rule used both to classify headings and to pick the
/// `h1`..`h6` tag.
pub fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=MAX_HEADING_LEVEL as usize).contains(&hashes) && block[hashes..].starts_with(' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

/// Classify a block; the first matching rule wins
pub fn classify(block: &str) -> BlockType {
    if heading_level(block).is_some() {
        return BlockType::Heading;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if is_fenced_code(&lines) {
        return BlockType::Code;
    }
    if lines.iter().all(|line| line.starts_with(QUOTE_PREFIX)) {
        return BlockType::Quote;
    }
    if lines.iter().all(|line| line.starts_with(UNORDERED_PREFIX)) {
        return BlockType::UnorderedList;
    }
    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_prefix(i + 1)))
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Prefix of the `n`th (1-indexed) ordered list item, e.g. `"3. "`
pub fn ordered_prefix(n: usize) -> String {
    format!("{n}. ")
}

fn is_fenced_code(lines: &[&str]) -> bool {
    match lines {
        [first, .., last] => first.starts_with(FENCE) && last.starts_with(FENCE),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_paragraphs_and_list() {
        let md = "
            This is **bolded** paragraph

            This is another paragraph with _italic_ text and `code` here
            This is the same paragraph on a new line

            - This is a list
            - with items
            ";
        assert_eq!(
            segment(md),
            [
                "This is **bolded** paragraph",
                "This is another paragraph with _italic_ text and `code` here\nThis is the same paragraph on a new line",
                "- This is a list\n- with items",
            ]
        );
    }

    #[test]
    fn test_segment_collapses_many_blank_lines() {
        let md = "First block\n\n\n\nSecond block\n\n\n\n\nThird block";
        assert_eq!(segment(md), ["First block", "Second block", "Third block"]);
    }

    #[test]
    fn test_segment_empty_document() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_segment_whitespace_only_document() {
        assert!(segment("   \n\n   \n\n   ").is_empty());
        assert!(segment("\n\n\n").is_empty());
    }

    #[test]
    fn test_segment_single_block() {
        assert_eq!(
            segment("This is a single block of text"),
            ["This is a single block of text"]
        );
    }

    #[test]
    fn test_segment_trims_each_line() {
        let md = "\tBlock with tab at start\n\n    Block with spaces    \n\n\t\tAnother tab block\t\t";
        assert_eq!(
            segment(md),
            ["Block with tab at start", "Block with spaces", "Another tab block"]
        );
    }

    #[test]
    fn test_segment_keeps_code_block_together() {
        let md = "```python\n    def hello():\n        print(\"Hello\")\n    ```\n\n    This is a regular paragraph";
        assert_eq!(
            segment(md),
            [
                "```python\ndef hello():\nprint(\"Hello\")\n```",
                "This is a regular paragraph",
            ]
        );
    }

    #[test]
    fn test_segment_whitespace_only_line_does_not_separate_blocks() {
        assert_eq!(segment("para one\n   \npara two"), ["para one\n\npara two"]);
        assert_eq!(segment("- a\n  \n- b"), ["- a\n\n- b"]);
        assert_eq!(classify("- a\n\n- b"), BlockType::Paragraph);
    }

    #[test]
    fn test_segment_crlf_blank_line_is_not_a_boundary() {
        assert_eq!(segment("a\r\n\r\nb"), ["a\n\nb"]);
        assert_eq!(segment("one\r\ntwo\n\nthree\r"), ["one\ntwo", "three"]);
    }

    #[test]
    fn test_segment_odd_line_break_runs() {
        assert_eq!(segment("a\n\n\nb"), ["a", "b"]);
        assert_eq!(segment("a\n\n\n\n\nb"), ["a", "b"]);
        assert_eq!(segment("a\n\n \n \n\nb"), ["a", "b"]);
    }

    #[test]
    fn test_segment_never_yields_blank_edges() {
        let md = "\n\n  a  \n b \n\n\n\n c\n\n";
        for block in segment(md) {
            assert!(!block.is_empty());
            assert!(!block.starts_with('\n'));
            assert!(!block.ends_with('\n'));
        }
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level("# Title"), Some(1));
        assert_eq!(heading_level("### Third"), Some(3));
        assert_eq!(heading_level("###### Sixth"), Some(6));
        assert_eq!(heading_level("####### Seventh"), None);
        assert_eq!(heading_level("#NoSpace"), None);
        assert_eq!(heading_level("#"), None);
        assert_eq!(heading_level("Not # a heading"), None);
    }

    #[test]
    fn test_classify_heading() {
        assert_eq!(classify("# Heading"), BlockType::Heading);
        assert_eq!(classify("###### Heading"), BlockType::Heading);
        assert_eq!(classify("### Heading\nwith text below"), BlockType::Heading);
        assert_eq!(classify("####### Too deep"), BlockType::Paragraph);
        assert_eq!(classify("#Missing space"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_code() {
        assert_eq!(classify("```\ncode here\n```"), BlockType::Code);
        assert_eq!(classify("```rust\nfn main() {}\n```"), BlockType::Code);
        assert_eq!(classify("```\n```"), BlockType::Code);
        assert_eq!(classify("```"), BlockType::Paragraph);
        assert_eq!(classify("```\nno closing fence"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_quote() {
        assert_eq!(classify("> quote"), BlockType::Quote);
        assert_eq!(classify("> line one\n> line two"), BlockType::Quote);
        assert_eq!(classify("> line one\nline two"), BlockType::Paragraph);
        assert_eq!(classify(">no space"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_unordered_list() {
        assert_eq!(classify("- item"), BlockType::UnorderedList);
        assert_eq!(classify("- one\n- two\n- three"), BlockType::UnorderedList);
        assert_eq!(classify("- one\ntwo"), BlockType::Paragraph);
        assert_eq!(classify("* star item"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_ordered_list() {
        assert_eq!(classify("1. first"), BlockType::OrderedList);
        assert_eq!(
            classify("1. first\n2. second\n3. third"),
            BlockType::OrderedList
        );
        assert_eq!(classify("2. starts at two"), BlockType::Paragraph);
        assert_eq!(classify("1. first\n3. gap"), BlockType::Paragraph);
        assert_eq!(classify("1. first\n1. repeated"), BlockType::Paragraph);
        assert_eq!(classify("a. letters"), BlockType::Paragraph);
    }

    #[test]
    fn test_classify_ordered_list_double_digits() {
        let block: Vec<String> = (1..=12).map(|i| format!("{i}. item {i}")).collect();
        assert_eq!(classify(&block.join("\n")), BlockType::OrderedList);
    }

    #[test]
    fn test_classify_paragraph_default() {
        assert_eq!(classify("Just some text"), BlockType::Paragraph);
        assert_eq!(classify(""), BlockType::Paragraph);
    }
}
