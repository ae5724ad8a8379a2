use std::fmt;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

/// The six kinds of inline content, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Text,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl Span {
    pub fn kind(&self) -> SpanKind {
        match self {
            Span::Text(_) => SpanKind::Text,
            Span::Bold(_) => SpanKind::Bold,
            Span::Italic(_) => SpanKind::Italic,
            Span::Code(_) => SpanKind::Code,
            Span::Link { .. } => SpanKind::Link,
            Span::Image { .. } => SpanKind::Image,
        }
    }

    /// Display text. For links this is the label, for images the alt text.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => text,
            Span::Link { text, .. } => text,
            Span::Image { alt, .. } => alt,
        }
    }

    /// Target URL, present only for links and images.
    pub fn url(&self) -> Option<&str> {
        match self {
            Span::Link { url, .. } | Span::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Block-level classification of a run of non-blank lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Heading(level) => write!(f, "heading (level {level})"),
            BlockKind::Code => f.write_str("code"),
            BlockKind::Quote => f.write_str("quote"),
            BlockKind::UnorderedList => f.write_str("unordered list"),
            BlockKind::OrderedList => f.write_str("ordered list"),
            BlockKind::Paragraph => f.write_str("paragraph"),
        }
    }
}

/// A trimmed block of source text together with its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub raw_text: &'a str,
    pub kind: BlockKind,
}
