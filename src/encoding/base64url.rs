//! base64url encoding for tokens, cookies and URL parameters.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use thiserror::Error;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors from base64url helpers.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// `offset + count` does not fit in the input.
    #[error("Range {offset}+{count} is outside input of length {len}")]
    OutOfRange { offset: usize, count: usize, len: usize },

    /// The input is not valid base64url.
    #[error("Malformed base64url input: {0}")]
    Malformed(#[from] base64::DecodeError),
}

fn checked_range(len: usize, offset: usize, count: usize) -> Result<std::ops::Range<usize>, EncodingError> {
    match offset.checked_add(count) {
        Some(end) if end <= len => Ok(offset..end),
        _ => Err(EncodingError::OutOfRange { offset, count, len }),
    }
}

/// Encode bytes as unpadded base64url.
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(input)
}

/// Encode `count` bytes of `input` starting at `offset`.
pub fn encode_range(input: &[u8], offset: usize, count: usize) -> Result<String, EncodingError> {
    let range = checked_range(input.len(), offset, count)?;
    Ok(encode(&input[range]))
}

/// Decode base64url text, with or without `=` padding.
pub fn decode(input: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(URL_SAFE_LENIENT.decode(input)?)
}

/// Decode `count` bytes of text from `input` starting at `offset`.
pub fn decode_range(input: &str, offset: usize, count: usize) -> Result<Vec<u8>, EncodingError> {
    let range = checked_range(input.len(), offset, count)?;
    Ok(URL_SAFE_LENIENT.decode(&input.as_bytes()[range])?)
}
