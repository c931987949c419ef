//! Inline span tokenizer
//!
//! Turns one run of block text into an ordered sequence of typed spans.
//! Tokenization is a fixed pipeline of stages (images, links, bold, italic,
//! code). Every stage only splits spans that are still plain and passes
//! already-typed spans through untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Tokenizer errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InlineError {
    #[error("Unterminated inline delimiter `{delimiter}` in: {text}")]
    UnterminatedDelimiter { delimiter: String, text: String },
}

/// Tokenizer result type
pub type Result<T> = std::result::Result<T, InlineError>;

/// A contiguous run of inline text with one style
///
/// Only links and images carry a target URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TextSpan {
    Plain { text: String },
    Bold { text: String },
    Italic { text: String },
    Code { text: String },
    Link { text: String, url: String },
    Image { text: String, url: String },
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        TextSpan::Plain { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        TextSpan::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        TextSpan::Italic { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        TextSpan::Code { text: text.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        TextSpan::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        TextSpan::Image {
            text: alt.into(),
            url: url.into(),
        }
    }
}

/// A paired inline delimiter and the span it produces
#[derive(Debug, Clone, Copy)]
pub struct Delimiter {
    pub marker: &'static str,
    wrap: fn(String) -> TextSpan,
}

impl Delimiter {
    pub const BOLD: Delimiter = Delimiter {
        marker: "**",
        wrap: wrap_bold,
    };

    pub const ITALIC: Delimiter = Delimiter {
        marker: "_",
        wrap: wrap_italic,
    };

    pub const CODE: Delimiter = Delimiter {
        marker: "`",
        wrap: wrap_code,
    };
}

fn wrap_bold(text: String) -> TextSpan {
    TextSpan::Bold { text }
}

fn wrap_italic(text: String) -> TextSpan {
    TextSpan::Italic { text }
}

fn wrap_code(text: String) -> TextSpan {
    TextSpan::Code { text }
}

type Stage = fn(Vec<TextSpan>) -> Result<Vec<TextSpan>>;

/// Tokenization stages, applied in order
const STAGES: [Stage; 5] = [
    split_images,
    split_links,
    split_bold,
    split_italic,
    split_code,
];

/// Tokenize a run of text into typed spans
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    STAGES
        .iter()
        .try_fold(vec![TextSpan::plain(text)], |spans, stage| stage(spans))
}

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid image pattern"));

// The optional leading `!` is captured so image-shaped matches can be rejected
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(!?)\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid link pattern"));

/// A `[label](url)` occurrence within a text
struct Target<'a> {
    range: Range<usize>,
    label: &'a str,
    url: &'a str,
}

fn find_images(text: &str) -> Vec<Target<'_>> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Target {
                range: caps.get(0)?.range(),
                label: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

fn find_links(text: &str) -> Vec<Target<'_>> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_some_and(|bang| bang.is_empty()))
        .filter_map(|caps| {
            Some(Target {
                range: caps.get(0)?.range(),
                label: caps.get(2)?.as_str(),
                url: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

/// Extract `(alt, url)` pairs of every `![alt](url)` in the text
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    find_images(text)
        .into_iter()
        .map(|t| (t.label.to_string(), t.url.to_string()))
        .collect()
}

/// Extract `(label, url)` pairs of every `[label](url)` not preceded by `!`
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    find_links(text)
        .into_iter()
        .map(|t| (t.label.to_string(), t.url.to_string()))
        .collect()
}

/// Split plain spans around every image
pub fn split_images(spans: Vec<TextSpan>) -> Result<Vec<TextSpan>> {
    Ok(split_targets(spans, find_images, |alt, url| {
        TextSpan::image(alt, url)
    }))
}

/// Split plain spans around every link
pub fn split_links(spans: Vec<TextSpan>) -> Result<Vec<TextSpan>> {
    Ok(split_targets(spans, find_links, |label, url| {
        TextSpan::link(label, url)
    }))
}

fn split_bold(spans: Vec<TextSpan>) -> Result<Vec<TextSpan>> {
    split_delimited(spans, Delimiter::BOLD)
}

fn split_italic(spans: Vec<TextSpan>) -> Result<Vec<TextSpan>> {
    split_delimited(spans, Delimiter::ITALIC)
}

fn split_code(spans: Vec<TextSpan>) -> Result<Vec<TextSpan>> {
    split_delimited(spans, Delimiter::CODE)
}

fn split_targets(
    spans: Vec<TextSpan>,
    find: for<'a> fn(&'a str) -> Vec<Target<'a>>,
    make: fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let text = match span {
            TextSpan::Plain { text } => text,
            typed => {
                out.push(typed);
                continue;
            }
        };

        let targets = find(&text);
        if targets.is_empty() {
            out.push(TextSpan::plain(text.as_str()));
            continue;
        }

        let mut last = 0;
        for target in targets {
            push_plain(&mut out, &text[last..target.range.start]);
            out.push(make(target.label, target.url));
            last = target.range.end;
        }
        push_plain(&mut out, &text[last..]);
    }

    out
}

fn push_plain(out: &mut Vec<TextSpan>, text: &str) {
    if !text.is_empty() {
        out.push(TextSpan::plain(text));
    }
}

/// Split plain spans on a paired delimiter
///
/// Odd-indexed pieces become delimited spans, even-indexed pieces stay plain,
/// and empty pieces are dropped. An even number of pieces means a delimiter
/// was opened but never closed.
pub fn split_delimited(spans: Vec<TextSpan>, delimiter: Delimiter) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let text = match span {
            TextSpan::Plain { text } => text,
            typed => {
                out.push(typed);
                continue;
            }
        };

        let pieces: Vec<&str> = text.split(delimiter.marker).collect();
        if pieces.len() % 2 == 0 {
            return Err(InlineError::UnterminatedDelimiter {
                delimiter: delimiter.marker.to_string(),
                text: text.clone(),
            });
        }

        for (i, piece) in pieces.into_iter().enumerate() {
            if piece.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(TextSpan::plain(piece));
            } else {
                out.push((delimiter.wrap)(piece.to_string()));
            }
        }
    }

    Ok(out)
}
