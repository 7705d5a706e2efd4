// ABOUTME: Byte-to-text decoding for markup files using BOM sniffing and charset detection.
// ABOUTME: Valid UTF-8 is taken as-is; anything else goes through chardetng.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::MarkupError;

/// Decode raw file bytes to a string.
///
/// A byte order mark wins, then plain UTF-8, then the detector's guess.
/// Bytes that are invalid in the chosen encoding are an error rather than
/// being replaced.
pub fn decode(bytes: &[u8]) -> Result<String, MarkupError> {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None if std::str::from_utf8(bytes).is_ok() => UTF_8,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };

    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(MarkupError::encoding(encoding.name()));
    }
    Ok(decoded.into_owned())
}
