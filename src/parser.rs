use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, BlockKind};
use crate::error::{Error, Result};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6}) .+").expect("heading pattern is valid"));

const CODE_FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn split_into_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a single trimmed block. Rules are tried in order and the first match wins.
pub fn classify(block: &str) -> BlockKind {
    if let Some(caps) = HEADING_RE.captures(block) {
        let level = caps.get(1).map_or(1, |m| m.len()) as u8;
        return BlockKind::Heading(level);
    }

    if block.len() >= 2 * CODE_FENCE.len()
        && block.starts_with(CODE_FENCE)
        && block.ends_with(CODE_FENCE)
    {
        return BlockKind::Code;
    }

    if block
        .lines()
        .filter(|line| !line.is_empty())
        .all(|line| line.starts_with('>'))
    {
        return BlockKind::Quote;
    }

    if block.lines().all(|line| line.starts_with("- ")) {
        return BlockKind::UnorderedList;
    }

    if block
        .lines()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i)))
    {
        return BlockKind::OrderedList;
    }

    BlockKind::Paragraph
}

fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

/// Parse a document into classified blocks, in document order.
pub fn parse(markdown: &str) -> Vec<Block<'_>> {
    split_into_blocks(markdown)
        .into_iter()
        .map(|raw_text| {
            let kind = classify(raw_text);
            log::debug!("classified block as {kind}: {raw_text:?}");
            Block { raw_text, kind }
        })
        .collect()
}

/// The inline text of a non-list block, with block markers removed.
pub fn extract_text(block: &str, kind: BlockKind) -> Result<String> {
    match kind {
        BlockKind::Paragraph => Ok(block.to_string()),
        BlockKind::Heading(_) => Ok(block
            .split_once(' ')
            .map_or("", |(_, rest)| rest)
            .to_string()),
        BlockKind::Code => {
            let inner = block.strip_prefix(CODE_FENCE).unwrap_or(block);
            let inner = inner.strip_suffix(CODE_FENCE).unwrap_or(inner);
            Ok(inner.trim().to_string())
        }
        BlockKind::Quote => Ok(block
            .lines()
            .map(|line| line.strip_prefix('>').unwrap_or(line).trim_start())
            .collect::<Vec<_>>()
            .join("\n")),
        BlockKind::UnorderedList | BlockKind::OrderedList => {
            Err(Error::UnsupportedBlockKind(kind))
        }
    }
}

/// The item texts of a list block, with their markers removed.
pub fn extract_items(block: &str, kind: BlockKind) -> Result<Vec<String>> {
    match kind {
        BlockKind::UnorderedList => Ok(block
            .lines()
            .map(|line| line.strip_prefix("- ").unwrap_or(line).to_string())
            .collect()),
        BlockKind::OrderedList => Ok(block
            .lines()
            .enumerate()
            .map(|(i, line)| {
                let marker = ordered_marker(i);
                line.strip_prefix(marker.as_str())
                    .unwrap_or(line)
                    .trim()
                    .to_string()
            })
            .collect()),
        _ => Err(Error::UnsupportedBlockKind(kind)),
    }
}
