// ABOUTME: Error types for parsing and decoding markup.
// ABOUTME: Provides MarkupError with Malformed, Xml, and Encoding variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while turning raw input into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Tags do not nest: a mismatched close tag or an element left open.
    #[error("malformed markup: {0}")]
    Malformed(String),

    /// The XML tokenizer rejected the input.
    #[error("failed to parse xml: {0}")]
    Xml(String),

    /// The input bytes are not valid in the detected encoding.
    #[error("failed to decode input as {encoding}")]
    Encoding { encoding: String },
}

impl MarkupError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        MarkupError::Malformed(msg.into())
    }

    /// Creates an Xml error from an underlying quick-xml error.
    pub fn xml(err: impl fmt::Display) -> Self {
        MarkupError::Xml(err.to_string())
    }

    pub fn encoding(encoding: impl Into<String>) -> Self {
        MarkupError::Encoding {
            encoding: encoding.into(),
        }
    }
}
