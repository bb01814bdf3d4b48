//! Path values as used by routing and URI-construction collaborators.

use std::collections::HashSet;

use authpath::routing::{Comparison, Matcher, PathPrefixMatcher, PathValue};
use axum::body::Body;
use axum::http::Request;

fn path(s: &str) -> PathValue {
    s.parse().unwrap()
}

#[test]
fn test_round_trip_value() {
    for s in ["/", "/a", "/a/b/", "/with space", "/ünï"] {
        assert_eq!(path(s).as_str(), s);
    }
}

#[test]
fn test_empty_and_default_hash_together() {
    let mut set = HashSet::new();
    set.insert(PathValue::empty());
    set.insert(path(""));
    set.insert(PathValue::default());
    assert_eq!(set.len(), 1);
}

#[test]
fn test_path_base_stripping() {
    let base = path("/App");
    let request_path = path("/app/orders/42");

    let m = request_path.strip_segments(&base, Comparison::IgnoreCase).unwrap();
    assert_eq!(m.matched, path("/app"));
    assert_eq!(m.remaining, path("/orders/42"));
    // Re-joining restores the original path.
    assert_eq!(&m.matched + &m.remaining, request_path);
}

#[test]
fn test_outbound_url_assembly() {
    let joined = path("/files/") + path("/reports 2024/Q1#draft");
    assert_eq!(joined.to_string(), "/files/reports%202024/Q1%23draft");
}

#[test]
fn test_matcher_on_raw_request() {
    let matcher = PathPrefixMatcher::new(path("/signin-oidc"));
    let req = Request::builder()
        .uri("https://example.com/SIGNIN-OIDC?code=abc")
        .body(Body::default())
        .unwrap();
    assert!(matcher.matches(&req));
    assert_eq!(matcher.remaining(&req), Some(PathValue::empty()));

    let req = Request::builder()
        .uri("https://example.com/signin-oidc-other")
        .body(Body::default())
        .unwrap();
    assert!(!matcher.matches(&req));
}
