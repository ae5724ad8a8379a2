use thiserror::Error;

use crate::block::BlockKind;

/// Failures while turning Markdown into HTML.
///
/// Every variant is fatal for the document being processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unmatched delimiter `{delimiter}` in text: {text:?}")]
    UnbalancedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("missing value for leaf node (tag: {tag:?})")]
    MissingValue { tag: Option<String> },

    #[error("missing tag on parent node")]
    MissingTag,

    #[error("missing children for <{tag}> node")]
    MissingChildren { tag: String },

    #[error("no mapping defined for {0} block")]
    UnsupportedBlockKind(BlockKind),
}

pub type Result<T> = std::result::Result<T, Error>;
