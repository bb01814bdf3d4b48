//! Scheme-level types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by registry mutations and explicit lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A scheme with this name is already registered.
    #[error("Scheme already exists: {0}")]
    DuplicateScheme(String),

    /// No scheme with this name is registered.
    #[error("No authentication scheme registered with name '{0}'")]
    SchemeNotFound(String),

    /// Scheme names must contain at least one non-whitespace character.
    #[error("Scheme name must not be empty")]
    InvalidSchemeName,
}

/// Result type for registry operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// The operation kinds a default scheme can be resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeOperation {
    Authenticate,
    Challenge,
    Forbid,
    SignIn,
    SignOut,
}

impl SchemeOperation {
    /// Stable label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemeOperation::Authenticate => "authenticate",
            SchemeOperation::Challenge => "challenge",
            SchemeOperation::Forbid => "forbid",
            SchemeOperation::SignIn => "sign_in",
            SchemeOperation::SignOut => "sign_out",
        }
    }
}

/// Explicitly configured default scheme names.
///
/// `scheme` is the general fallback for every operation kind that has no
/// name of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultSchemes {
    /// General default used when an operation has no specific default.
    pub scheme: Option<String>,

    pub authenticate: Option<String>,

    pub challenge: Option<String>,

    /// Falls back to the challenge default.
    pub forbid: Option<String>,

    pub sign_in: Option<String>,

    /// Falls back to the sign-in default.
    pub sign_out: Option<String>,
}

impl DefaultSchemes {
    /// Defaults with only the general scheme set.
    pub fn with_scheme(name: impl Into<String>) -> Self {
        Self {
            scheme: Some(name.into()),
            ..Self::default()
        }
    }

    /// The name configured specifically for `op`, ignoring fallbacks.
    pub fn for_operation(&self, op: SchemeOperation) -> Option<&str> {
        let name = match op {
            SchemeOperation::Authenticate => &self.authenticate,
            SchemeOperation::Challenge => &self.challenge,
            SchemeOperation::Forbid => &self.forbid,
            SchemeOperation::SignIn => &self.sign_in,
            SchemeOperation::SignOut => &self.sign_out,
        };
        name.as_deref()
    }
}
