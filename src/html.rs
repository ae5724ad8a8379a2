use crate::block::{Block, BlockKind, Span};
use crate::error::{Error, Result};
use crate::inline::text_to_spans;
use crate::node::HtmlNode;
use crate::parser::{self, extract_items, extract_text};

/// Convert one inline span to its HTML leaf.
pub fn span_to_html_node(span: Span) -> HtmlNode {
    match span {
        Span::Text(text) => HtmlNode::text(text),
        Span::Bold(text) => HtmlNode::leaf("b", text),
        Span::Italic(text) => HtmlNode::leaf("i", text),
        Span::Code(text) => HtmlNode::leaf("code", text),
        Span::Link { text, url } => HtmlNode::leaf("a", text).with_attribute("href", url),
        Span::Image { alt, url } => HtmlNode::leaf("img", "")
            .with_attribute("src", url)
            .with_attribute("alt", alt),
    }
}

/// Parse inline Markdown and convert every span to a leaf.
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>> {
    Ok(text_to_spans(text)?
        .into_iter()
        .map(span_to_html_node)
        .collect())
}

/// The wrapping tag for a block whose content is inline text.
pub fn block_tag(kind: BlockKind) -> Result<String> {
    match kind {
        BlockKind::Paragraph => Ok("p".to_string()),
        BlockKind::Heading(level @ 1..=6) => Ok(format!("h{level}")),
        BlockKind::Quote => Ok("blockquote".to_string()),
        BlockKind::UnorderedList => Ok("ul".to_string()),
        BlockKind::OrderedList => Ok("ol".to_string()),
        BlockKind::Heading(_) | BlockKind::Code => Err(Error::UnsupportedBlockKind(kind)),
    }
}

/// Build the node for a single classified block.
pub fn block_to_html_node(block: &Block<'_>) -> Result<HtmlNode> {
    match block.kind {
        // Code blocks are emitted raw, without inline parsing.
        BlockKind::Code => Ok(HtmlNode::leaf(
            "code",
            extract_text(block.raw_text, block.kind)?,
        )),
        BlockKind::UnorderedList | BlockKind::OrderedList => {
            let items = extract_items(block.raw_text, block.kind)?
                .iter()
                .map(|item| text_to_children(item).map(|children| HtmlNode::parent("li", children)))
                .collect::<Result<Vec<_>>>()?;
            Ok(HtmlNode::parent(block_tag(block.kind)?, items))
        }
        BlockKind::Paragraph | BlockKind::Heading(_) | BlockKind::Quote => {
            let text = extract_text(block.raw_text, block.kind)?;
            Ok(HtmlNode::parent(
                block_tag(block.kind)?,
                text_to_children(&text)?,
            ))
        }
    }
}

/// Build the full tree for a document, rooted at a single `div`.
///
/// An empty document yields a `div` without children, which fails to render.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode> {
    let children = parser::parse(markdown)
        .iter()
        .map(block_to_html_node)
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Render a Markdown document to an HTML string.
pub fn render_document(markdown: &str) -> Result<String> {
    markdown_to_html_node(markdown)?.to_html()
}
