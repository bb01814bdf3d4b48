//! Scheme descriptors and handler capabilities.

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

use crate::auth::types::{AuthError, AuthResult};

/// A single thing a handler can do for its scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Authenticate,
    Challenge,
    Forbid,
    SignIn,
    SignOut,
    /// May intercept a request before normal routing (e.g. OAuth callbacks).
    HandleRequest,
}

impl Capability {
    fn bit(self) -> u8 {
        match self {
            Capability::Authenticate => 1 << 0,
            Capability::Challenge => 1 << 1,
            Capability::Forbid => 1 << 2,
            Capability::SignIn => 1 << 3,
            Capability::SignOut => 1 << 4,
            Capability::HandleRequest => 1 << 5,
        }
    }
}

/// Set of capabilities a handler supports.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);

    /// Authenticate, challenge and forbid.
    pub const AUTHENTICATE_ONLY: Capabilities = Capabilities(0b0000_0111);

    /// Authenticate-only plus sign-in and sign-out.
    pub const SIGN_IN: Capabilities = Capabilities(0b0001_1111);

    pub const ALL: Capabilities = Capabilities(0b0011_1111);

    pub fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn with(self, capability: Capability) -> Self {
        Capabilities(self.0 | capability.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Capability> for Capabilities {
    fn from(capability: Capability) -> Self {
        Capabilities(capability.bit())
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Self) -> Self {
        Capabilities(self.0 | rhs.0)
    }
}

impl BitOr<Capability> for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capability) -> Self {
        self.with(rhs)
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const ORDER: [Capability; 6] = [
            Capability::Authenticate,
            Capability::Challenge,
            Capability::Forbid,
            Capability::SignIn,
            Capability::SignOut,
            Capability::HandleRequest,
        ];
        f.debug_set()
            .entries(ORDER.iter().filter(|c| self.contains(**c)))
            .finish()
    }
}

/// The capability that processes requests for a scheme.
///
/// The registry never calls into handlers; it only inspects what they
/// support when ordering request handlers.
pub trait AuthenticationHandler: Send + Sync + fmt::Debug {
    /// Operations this handler implements.
    fn capabilities(&self) -> Capabilities;

    /// Name used in logs.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A named, registered authentication scheme.
#[derive(Clone)]
pub struct AuthenticationScheme {
    name: String,
    display_name: Option<String>,
    handler: Arc<dyn AuthenticationHandler>,
}

impl AuthenticationScheme {
    /// Create a scheme descriptor.
    ///
    /// Fails with [`AuthError::InvalidSchemeName`] for blank names.
    pub fn new(
        name: impl Into<String>,
        display_name: Option<String>,
        handler: Arc<dyn AuthenticationHandler>,
    ) -> AuthResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AuthError::InvalidSchemeName);
        }
        Ok(Self {
            name,
            display_name,
            handler,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn handler(&self) -> &Arc<dyn AuthenticationHandler> {
        &self.handler
    }

    pub fn capabilities(&self) -> Capabilities {
        self.handler.capabilities()
    }

    /// True if this scheme gets a chance to intercept requests.
    pub fn handles_requests(&self) -> bool {
        self.capabilities().contains(Capability::HandleRequest)
    }
}

impl fmt::Debug for AuthenticationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationScheme")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("handler", &self.handler.type_name())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
