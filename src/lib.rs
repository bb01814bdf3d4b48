//! Authentication scheme registry and URL path utilities.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file (TOML/JSON)
//!       → config (load, validate, watch)
//!       → DefaultSchemes
//!       → auth::SchemeRegistry ──▶ dispatch collaborator
//!                                   (default authenticate/challenge/sign-in,
//!                                    request-handler priority order)
//!
//!   request URI
//!       → routing::PathValue (decode, segment match, escape)
//!       → routing::matcher ──▶ routing collaborator
//!
//!   encoding::base64url ──▶ token/cookie collaborators
//! ```

pub mod auth;
pub mod config;
pub mod encoding;
pub mod observability;
pub mod routing;

pub use auth::{AuthError, AuthenticationScheme, SchemeRegistry};
pub use config::AuthConfig;
pub use routing::{Comparison, PathError, PathValue};
