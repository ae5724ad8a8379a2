//! Inline span parsing.
//!
//! A string becomes a list of spans through a fixed pipeline:
//! images, then links, then the code, bold and italic delimiters.
//! Every stage only rewrites [`Span::Text`] and passes other spans through,
//! so the order of the stages decides precedence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::Span;
use crate::error::{Error, Result};

static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("image pattern is valid"));

// The `!` guard for links is applied in `find_links`; the regex crate has no lookbehind.
static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("link pattern is valid"));

/// Delimiters in the order they are split: code first so its contents stay raw,
/// bold before italic so `**` is never read as emphasis.
const DELIMITERS: [(&str, fn(String) -> Span); 3] =
    [("`", Span::Code), ("**", Span::Bold), ("_", Span::Italic)];

/// A `[label](url)` or `![alt](url)` occurrence inside a text run.
struct Found<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

fn find_images(text: &str) -> Vec<Found<'_>> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Found {
                start: whole.start(),
                end: whole.end(),
                label: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

fn find_links(text: &str) -> Vec<Found<'_>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = LINK_RE.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        if text[..whole.start()].ends_with('!') {
            // `[` is one byte, so the next candidate starts right after it.
            pos = whole.start() + 1;
            continue;
        }
        found.push(Found {
            start: whole.start(),
            end: whole.end(),
            label: label.as_str(),
            url: url.as_str(),
        });
        pos = whole.end();
    }
    found
}

/// `(alt, url)` pairs for every image in `text`.
pub fn extract_markdown_images(text: &str) -> Vec<(&str, &str)> {
    find_images(text).into_iter().map(|f| (f.label, f.url)).collect()
}

/// `(label, url)` pairs for every link in `text` that is not part of an image.
pub fn extract_markdown_links(text: &str) -> Vec<(&str, &str)> {
    find_links(text).into_iter().map(|f| (f.label, f.url)).collect()
}

/// Cut each text span around the matches `find` reports, building the
/// matched pieces with `make`. Empty text between matches is dropped.
fn split_text_spans<F, M>(spans: Vec<Span>, find: F, make: M) -> Vec<Span>
where
    F: Fn(&str) -> Vec<Found<'_>>,
    M: Fn(&Found<'_>) -> Span,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };
        let mut last = 0;
        for found in find(&text) {
            if found.start > last {
                out.push(Span::Text(text[last..found.start].to_string()));
            }
            out.push(make(&found));
            last = found.end;
        }
        if last < text.len() {
            out.push(Span::Text(text[last..].to_string()));
        }
    }
    out
}

/// Pull `![alt](url)` images out of text spans.
pub fn split_nodes_image(spans: Vec<Span>) -> Vec<Span> {
    split_text_spans(spans, find_images, |f| Span::Image {
        alt: f.label.to_string(),
        url: f.url.to_string(),
    })
}

/// Pull `[label](url)` links out of text spans.
pub fn split_nodes_link(spans: Vec<Span>) -> Vec<Span> {
    split_text_spans(spans, find_links, |f| Span::Link {
        text: f.label.to_string(),
        url: f.url.to_string(),
    })
}

/// Split text spans on `delimiter`. Pieces between a pair of delimiters become
/// `make(piece)`, even when empty; the rest stay text, with empty pieces dropped.
pub fn split_nodes_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    make: fn(String) -> Span,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };
        let pieces: Vec<&str> = text.split(delimiter).collect();
        if pieces.len() % 2 == 0 {
            return Err(Error::UnbalancedDelimiter { delimiter, text });
        }
        for (i, piece) in pieces.into_iter().enumerate() {
            if i % 2 == 1 {
                out.push(make(piece.to_string()));
            } else if !piece.is_empty() {
                out.push(Span::Text(piece.to_string()));
            }
        }
    }
    Ok(out)
}

/// Apply the code, bold and italic splits in that order.
pub fn split_all_delimiters(spans: Vec<Span>) -> Result<Vec<Span>> {
    DELIMITERS
        .iter()
        .try_fold(spans, |spans, &(delimiter, make)| {
            split_nodes_delimiter(spans, delimiter, make)
        })
}

/// Parse a run of inline Markdown into spans.
pub fn text_to_spans(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::Text(text.to_string())];
    let spans = split_nodes_image(spans);
    let spans = split_nodes_link(spans);
    split_all_delimiters(spans)
}
