//! Encoding helpers.
//!
//! # Design Decisions
//! - base64url (RFC 4648 §5) without padding on output
//! - Decoding accepts padded and unpadded input
//! - Range arguments are validated before any work; no partial output

pub mod base64url;

pub use base64url::{decode, decode_range, encode, encode_range, EncodingError};
