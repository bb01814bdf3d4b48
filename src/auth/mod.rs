//! Authentication scheme subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     AuthenticationScheme (name, display name, handler)
//!     → registry.rs add_scheme (rejects duplicates)
//!     → ordered snapshot published
//!
//! Per request (dispatch collaborator):
//!     → request_handler_schemes() (priority order)
//!     → default_*_scheme() when no scheme name was given
//!
//! On config reload:
//!     DefaultSchemes → update_defaults() (atomic swap)
//! ```
//!
//! # Design Decisions
//! - Scheme names are case-sensitive and unique
//! - Insertion order is the request-handler priority order
//! - "No default" is a normal outcome, returned as `None`
//! - Readers never block; writers are serialized inside the registry

pub mod registry;
pub mod scheme;
pub mod types;

pub use registry::SchemeRegistry;
pub use scheme::{AuthenticationHandler, AuthenticationScheme, Capabilities, Capability};
pub use types::{AuthError, AuthResult, DefaultSchemes, SchemeOperation};
