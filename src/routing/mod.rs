//! Path subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request URI
//!     → path.rs PathValue::from_uri (decode, keep %2F encoded)
//!     → matcher.rs (segment-prefix conditions)
//!     → Return: match + unmatched remainder
//!
//! Outbound URL construction:
//!     PathValue
//!     → path.rs to_uri_component (percent-encode)
//! ```
//!
//! # Design Decisions
//! - Path values are immutable; every operation returns a new value
//! - Prefixes match on segment boundaries only (`/test` ≠ `/testing`)
//! - Case-insensitive matching by default, ordinal on request
//! - No regex in the matching path

pub mod matcher;
pub mod path;

pub use matcher::{AllOf, Matcher, PathPrefixMatcher};
pub use path::{Comparison, PathError, PathValue, SegmentMatch};
