//! Scheme registry and default-scheme resolution.
//!
//! # Responsibilities
//! - Store registered schemes in insertion order
//! - Look up schemes by exact (case-sensitive) name
//! - Resolve the default scheme for each operation kind
//! - Expose request-handling schemes in priority order
//!
//! # Design Decisions
//! - Schemes and default names live in one immutable snapshot (`ArcSwap`),
//!   so lookups never block and a resolution sees both from the same moment
//! - Writers serialize on a mutex, copy the snapshot and publish a new one
//! - A configured default that is not registered resolves to `None`; the
//!   chain does not continue past it
//! - With no configured default, a single registered scheme is the default

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::auth::scheme::AuthenticationScheme;
use crate::auth::types::{AuthError, AuthResult, DefaultSchemes, SchemeOperation};
use crate::observability::metrics;

/// Everything a reader needs, published together.
#[derive(Debug, Default)]
struct RegistryState {
    schemes: Vec<Arc<AuthenticationScheme>>,
    defaults: Arc<DefaultSchemes>,
}

/// In-memory registry of authentication schemes.
#[derive(Debug, Default)]
pub struct SchemeRegistry {
    state: ArcSwap<RegistryState>,
    write_lock: Mutex<()>,
}

impl SchemeRegistry {
    /// Create an empty registry with the given default names.
    pub fn new(defaults: DefaultSchemes) -> Self {
        Self {
            state: ArcSwap::from_pointee(RegistryState {
                schemes: Vec::new(),
                defaults: Arc::new(defaults),
            }),
            write_lock: Mutex::new(()),
        }
    }

    /// Register a scheme.
    ///
    /// Fails with [`AuthError::DuplicateScheme`] if the name is taken.
    pub fn add_scheme(&self, scheme: AuthenticationScheme) -> AuthResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.state.load_full();
        if current.schemes.iter().any(|s| s.name() == scheme.name()) {
            tracing::debug!(scheme = %scheme.name(), "Rejected duplicate scheme registration");
            return Err(AuthError::DuplicateScheme(scheme.name().to_string()));
        }

        tracing::info!(
            scheme = %scheme.name(),
            handler = scheme.handler().type_name(),
            handles_requests = scheme.handles_requests(),
            "Authentication scheme registered"
        );

        let mut schemes = current.schemes.clone();
        schemes.push(Arc::new(scheme));
        let count = schemes.len();
        self.state.store(Arc::new(RegistryState {
            schemes,
            defaults: current.defaults.clone(),
        }));
        metrics::record_scheme_count(count);
        Ok(())
    }

    /// Register a scheme unless the name is already taken.
    ///
    /// Returns whether the scheme was added.
    pub fn try_add_scheme(&self, scheme: AuthenticationScheme) -> bool {
        self.add_scheme(scheme).is_ok()
    }

    /// Remove a scheme by name. Absent names are a no-op.
    pub fn remove_scheme(&self, name: &str) -> Option<Arc<AuthenticationScheme>> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let current = self.state.load_full();
        let index = current.schemes.iter().position(|s| s.name() == name)?;

        let mut schemes = current.schemes.clone();
        let removed = schemes.remove(index);
        let count = schemes.len();
        self.state.store(Arc::new(RegistryState {
            schemes,
            defaults: current.defaults.clone(),
        }));
        metrics::record_scheme_count(count);

        tracing::info!(scheme = %name, "Authentication scheme removed");
        Some(removed)
    }

    /// Exact lookup by name.
    pub fn get_scheme(&self, name: &str) -> Option<Arc<AuthenticationScheme>> {
        find(&self.state.load().schemes, name)
    }

    /// Lookup for callers that were given an explicit scheme name.
    pub fn require_scheme(&self, name: &str) -> AuthResult<Arc<AuthenticationScheme>> {
        self.get_scheme(name)
            .ok_or_else(|| AuthError::SchemeNotFound(name.to_string()))
    }

    /// All schemes in registration order.
    pub fn all_schemes(&self) -> Vec<Arc<AuthenticationScheme>> {
        self.state.load().schemes.clone()
    }

    /// Schemes that may intercept requests, in priority (registration) order.
    pub fn request_handler_schemes(&self) -> Vec<Arc<AuthenticationScheme>> {
        self.state
            .load()
            .schemes
            .iter()
            .filter(|s| s.handles_requests())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.load().schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current configured default names.
    pub fn defaults(&self) -> Arc<DefaultSchemes> {
        self.state.load().defaults.clone()
    }

    /// Replace the configured default names.
    pub fn update_defaults(&self, defaults: DefaultSchemes) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        tracing::info!(?defaults, "Default schemes updated");
        let current = self.state.load_full();
        self.state.store(Arc::new(RegistryState {
            schemes: current.schemes.clone(),
            defaults: Arc::new(defaults),
        }));
    }

    pub fn default_authenticate_scheme(&self) -> Option<Arc<AuthenticationScheme>> {
        self.resolve(SchemeOperation::Authenticate)
    }

    pub fn default_challenge_scheme(&self) -> Option<Arc<AuthenticationScheme>> {
        self.resolve(SchemeOperation::Challenge)
    }

    /// Falls back to the challenge default.
    pub fn default_forbid_scheme(&self) -> Option<Arc<AuthenticationScheme>> {
        self.resolve(SchemeOperation::Forbid)
    }

    pub fn default_sign_in_scheme(&self) -> Option<Arc<AuthenticationScheme>> {
        self.resolve(SchemeOperation::SignIn)
    }

    /// Falls back to the sign-in default.
    pub fn default_sign_out_scheme(&self) -> Option<Arc<AuthenticationScheme>> {
        self.resolve(SchemeOperation::SignOut)
    }

    /// Resolve the default scheme for `op` against one snapshot of schemes
    /// and default names.
    pub fn default_scheme_for(&self, op: SchemeOperation) -> Option<Arc<AuthenticationScheme>> {
        self.resolve(op)
    }

    fn resolve(&self, op: SchemeOperation) -> Option<Arc<AuthenticationScheme>> {
        let state = self.state.load();
        let resolved = resolve_in(&state.defaults, &state.schemes, op);
        metrics::record_default_resolution(
            op.as_str(),
            if resolved.is_some() { "resolved" } else { "none" },
        );
        resolved
    }
}

fn find(schemes: &[Arc<AuthenticationScheme>], name: &str) -> Option<Arc<AuthenticationScheme>> {
    schemes.iter().find(|s| s.name() == name).cloned()
}

fn resolve_in(
    defaults: &DefaultSchemes,
    schemes: &[Arc<AuthenticationScheme>],
    op: SchemeOperation,
) -> Option<Arc<AuthenticationScheme>> {
    if let Some(name) = defaults.for_operation(op) {
        return configured(schemes, name, op);
    }
    match op {
        SchemeOperation::Forbid => resolve_in(defaults, schemes, SchemeOperation::Challenge),
        SchemeOperation::SignOut => resolve_in(defaults, schemes, SchemeOperation::SignIn),
        _ => general_default(defaults, schemes, op),
    }
}

fn general_default(
    defaults: &DefaultSchemes,
    schemes: &[Arc<AuthenticationScheme>],
    op: SchemeOperation,
) -> Option<Arc<AuthenticationScheme>> {
    if let Some(name) = defaults.scheme.as_deref() {
        return configured(schemes, name, op);
    }
    match schemes {
        [only] => Some(only.clone()),
        [] => None,
        _ => {
            tracing::debug!(
                operation = op.as_str(),
                registered = schemes.len(),
                "No default scheme: several schemes registered and none configured"
            );
            None
        }
    }
}

fn configured(
    schemes: &[Arc<AuthenticationScheme>],
    name: &str,
    op: SchemeOperation,
) -> Option<Arc<AuthenticationScheme>> {
    let found = find(schemes, name);
    if found.is_none() {
        tracing::warn!(
            operation = op.as_str(),
            scheme = %name,
            "{}",
            AuthError::SchemeNotFound(name.to_string())
        );
    }
    found
}
