// ABOUTME: Markup front end for trellis: decoding, parsing and serializing HTML and XML.
// ABOUTME: Re-exports the public API: parse, parse_bytes, serialize, Dialect, SerializeOptions, MarkupError.

pub mod decode;
pub mod error;
pub mod options;
pub mod parse;
pub mod serialize;

pub use crate::decode::decode;
pub use crate::error::MarkupError;
pub use crate::options::{Dialect, SerializeOptions, SerializeOptionsBuilder};
pub use crate::parse::{parse, parse_bytes};
pub use crate::serialize::serialize;
