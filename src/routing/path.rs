//! URL path values.
//!
//! # Responsibilities
//! - Validate and hold a request path (empty, or starting with `/`)
//! - Segment-aware prefix matching with selectable case sensitivity
//! - Percent-encode for outbound URIs, decode from incoming URIs
//!
//! # Design Decisions
//! - The empty string is the only "no value" representation, so absent
//!   and empty paths compare and hash the same
//! - Equality is ordinal; case-insensitive comparison is explicit and
//!   folds each character to uppercase (`ς` and `σ` both match `Σ`)
//! - Existing valid escapes are kept when encoding
//! - `%2F` stays encoded when decoding, so decoding never adds segments

use std::borrow::Cow;
use std::fmt;
use std::ops;
use std::str::FromStr;

use axum::http::Uri;
use percent_encoding::{percent_decode_str, percent_encode_byte};
use thiserror::Error;

/// Errors from constructing a path value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A non-empty path did not start with `/`.
    #[error("The path in '{0}' must start with '/'")]
    InvalidPath(String),
}

/// How path text is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// Exact character match.
    Ordinal,
    /// Characters match if they are equal ignoring case.
    #[default]
    IgnoreCase,
}

/// Result of a successful segment-prefix match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMatch {
    /// Prefix of the original path covered by the match (original casing).
    pub matched: PathValue,
    /// The rest of the path: empty, or starting with `/`.
    pub remaining: PathValue,
}

/// An immutable URL path: either empty or starting with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathValue(String);

impl PathValue {
    /// The empty path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a path value, rejecting non-empty input without a leading `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, PathError> {
        let value = value.into();
        if !value.is_empty() && !value.starts_with('/') {
            return Err(PathError::InvalidPath(value));
        }
        Ok(Self(value))
    }

    /// Build a path from an escaped URI path component.
    ///
    /// Valid escapes are decoded except `%2F`. If the decoded bytes are not
    /// UTF-8 the input is kept unchanged.
    pub fn from_uri_component(raw: &str) -> Result<Self, PathError> {
        Self::new(unescape(raw).into_owned())
    }

    /// Path of a request URI.
    pub fn from_uri(uri: &Uri) -> Result<Self, PathError> {
        Self::from_uri_component(uri.path())
    }

    /// The underlying value, or `None` when empty.
    pub fn value(&self) -> Option<&str> {
        self.has_value().then_some(self.0.as_str())
    }

    /// The underlying value; empty when there is none.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_value(&self) -> bool {
        !self.0.is_empty()
    }

    /// Compare with an explicit case sensitivity.
    pub fn equals_with(&self, other: &PathValue, comparison: Comparison) -> bool {
        match comparison {
            Comparison::Ordinal => self.0 == other.0,
            Comparison::IgnoreCase => {
                let (mut a, mut b) = (self.0.chars(), other.0.chars());
                loop {
                    match (a.next(), b.next()) {
                        (None, None) => return true,
                        (Some(x), Some(y)) if chars_match(x, y, comparison) => continue,
                        _ => return false,
                    }
                }
            }
        }
    }

    /// Segment-prefix test, ignoring case.
    pub fn starts_with_segments(&self, other: &PathValue) -> bool {
        self.starts_with_segments_with(other, Comparison::default())
    }

    /// Segment-prefix test with an explicit case sensitivity.
    pub fn starts_with_segments_with(&self, other: &PathValue, comparison: Comparison) -> bool {
        self.strip_segments(other, comparison).is_some()
    }

    /// Match `other` as a segment prefix and split off the remainder.
    ///
    /// Succeeds when the paths are equal, or when `self` continues with `/`
    /// right after the text of `other`. An empty `other` matches any path.
    pub fn strip_segments(&self, other: &PathValue, comparison: Comparison) -> Option<SegmentMatch> {
        let len = matched_prefix_len(&self.0, &other.0, comparison)?;
        let rest = &self.0[len..];
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        Some(SegmentMatch {
            matched: PathValue(self.0[..len].to_string()),
            remaining: PathValue(rest.to_string()),
        })
    }

    /// Percent-encoded form safe for a URI path.
    ///
    /// Unreserved characters, sub-delimiters, `:`, `@` and `/` pass through.
    /// Everything else is encoded byte-wise as uppercase `%XX`, except
    /// escapes that are already valid.
    pub fn to_uri_component(&self) -> Cow<'_, str> {
        let bytes = self.0.as_bytes();
        let Some(first) = first_unsafe_byte(bytes) else {
            return Cow::Borrowed(&self.0);
        };

        let mut out = String::with_capacity(bytes.len() + 16);
        out.push_str(&self.0[..first]);

        let mut i = first;
        while i < bytes.len() {
            let b = bytes[i];
            if b == b'%' && is_escape_at(bytes, i) {
                out.push_str(&self.0[i..i + 3]);
                i += 3;
                continue;
            }
            if is_path_byte(b) {
                out.push(b as char);
            } else {
                out.push_str(percent_encode_byte(b));
            }
            i += 1;
        }
        Cow::Owned(out)
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri_component())
    }
}

impl FromStr for PathValue {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for PathValue {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for PathValue {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PathValue> for String {
    fn from(path: PathValue) -> Self {
        path.0
    }
}

impl AsRef<str> for PathValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Concatenation; a trailing `/` on the left absorbs the right's leading `/`.
impl ops::Add<&PathValue> for &PathValue {
    type Output = PathValue;

    fn add(self, other: &PathValue) -> PathValue {
        if self.has_value() && other.has_value() && self.0.ends_with('/') {
            // `other` starts with '/', a single byte.
            PathValue(format!("{}{}", self.0, &other.0[1..]))
        } else {
            PathValue(format!("{}{}", self.0, other.0))
        }
    }
}

impl ops::Add for PathValue {
    type Output = PathValue;

    fn add(self, other: PathValue) -> PathValue {
        &self + &other
    }
}

fn chars_match(a: char, b: char, comparison: Comparison) -> bool {
    a == b || (comparison == Comparison::IgnoreCase && a.to_uppercase().eq(b.to_uppercase()))
}

/// Byte length of the prefix of `value` that matches `prefix`, scanning
/// character by character.
fn matched_prefix_len(value: &str, prefix: &str, comparison: Comparison) -> Option<usize> {
    if comparison == Comparison::Ordinal {
        return value.starts_with(prefix).then_some(prefix.len());
    }
    let mut rest = value.char_indices();
    for p in prefix.chars() {
        let (_, v) = rest.next()?;
        if !chars_match(v, p, comparison) {
            return None;
        }
    }
    Some(rest.next().map_or(value.len(), |(i, _)| i))
}

fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'.' | b'_' | b'~'
                | b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
                | b':' | b'@' | b'/'
        )
}

fn is_escape_at(bytes: &[u8], i: usize) -> bool {
    i + 2 < bytes.len() && bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit()
}

fn first_unsafe_byte(bytes: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && is_escape_at(bytes, i) {
            i += 3;
        } else if is_path_byte(bytes[i]) {
            i += 1;
        } else {
            return Some(i);
        }
    }
    None
}

/// Position of the first `%2F` / `%2f` escape.
fn find_encoded_slash(s: &str) -> Option<usize> {
    s.as_bytes()
        .windows(3)
        .position(|w| w[0] == b'%' && w[1] == b'2' && (w[2] == b'F' || w[2] == b'f'))
}

fn unescape(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    let mut out = Vec::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = find_encoded_slash(rest) {
        out.extend(percent_decode_str(&rest[..pos]));
        out.extend_from_slice(&rest.as_bytes()[pos..pos + 3]);
        rest = &rest[pos + 3..];
    }
    out.extend(percent_decode_str(rest));

    match String::from_utf8(out) {
        Ok(decoded) => Cow::Owned(decoded),
        Err(_) => Cow::Borrowed(raw),
    }
}
