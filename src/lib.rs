mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
pub mod site;

pub use block::{Block, BlockKind, Span, SpanKind};
pub use config::{Config, ConfigError, PagesConfig, PathsConfig};
pub use error::{Error, Result};
pub use html::{block_to_html_node, markdown_to_html_node, span_to_html_node};
pub use inline::{
    extract_markdown_images, extract_markdown_links, split_all_delimiters, split_nodes_delimiter,
    split_nodes_image, split_nodes_link,
};
pub use node::{Attributes, HtmlNode, attributes_to_html};
pub use parser::{classify, extract_items, extract_text, split_into_blocks};

/// Parse markdown text into classified blocks.
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    parser::parse(markdown)
}

/// Parse a run of inline markdown into spans.
pub fn text_to_spans(text: &str) -> Result<Vec<Span>> {
    inline::text_to_spans(text)
}

/// Convert a markdown document to an HTML string.
pub fn render_document(markdown: &str) -> Result<String> {
    html::render_document(markdown)
}
