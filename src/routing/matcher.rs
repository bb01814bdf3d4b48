//! Request matching on path segments.
//!
//! # Responsibilities
//! - Match a request path against a configured prefix on segment boundaries
//! - Report the unmatched remainder for path-base stripping
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Paths are decoded (except `%2F`) before matching
//! - Requests whose path cannot be represented never match
//! - Empty condition list = always matches (wildcard)

use axum::body::Body;
use axum::http::Request;

use crate::routing::path::{Comparison, PathValue};

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches requests whose path starts with a prefix, segment by segment.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: PathValue,
    comparison: Comparison,
}

impl PathPrefixMatcher {
    /// Case-insensitive prefix matcher.
    pub fn new(prefix: PathValue) -> Self {
        Self::with_comparison(prefix, Comparison::default())
    }

    pub fn with_comparison(prefix: PathValue, comparison: Comparison) -> Self {
        Self { prefix, comparison }
    }

    pub fn prefix(&self) -> &PathValue {
        &self.prefix
    }

    /// The request path after the prefix, if the request matches.
    pub fn remaining(&self, req: &Request<Body>) -> Option<PathValue> {
        let path = match PathValue::from_uri(req.uri()) {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "Request path not matchable");
                return None;
            }
        };
        path.strip_segments(&self.prefix, self.comparison)
            .map(|m| m.remaining)
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.remaining(req).is_some()
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug, Default)]
pub struct AllOf {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AllOf {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    pub fn push(&mut self, matcher: impl Matcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }
}

impl Matcher for AllOf {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}
