//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use authpath::auth::{AuthenticationHandler, AuthenticationScheme, Capabilities, Capability};

/// Handler stub that only reports capabilities.
#[derive(Debug)]
pub struct StubHandler(pub Capabilities);

impl AuthenticationHandler for StubHandler {
    fn capabilities(&self) -> Capabilities {
        self.0
    }
}

pub fn cookie_scheme(name: &str) -> AuthenticationScheme {
    AuthenticationScheme::new(name, Some(format!("{name} login")), Arc::new(StubHandler(Capabilities::SIGN_IN)))
        .unwrap()
}

pub fn bearer_scheme(name: &str) -> AuthenticationScheme {
    AuthenticationScheme::new(name, None, Arc::new(StubHandler(Capabilities::AUTHENTICATE_ONLY)))
        .unwrap()
}

pub fn remote_scheme(name: &str) -> AuthenticationScheme {
    let caps = Capabilities::AUTHENTICATE_ONLY | Capability::HandleRequest;
    AuthenticationScheme::new(name, None, Arc::new(StubHandler(caps))).unwrap()
}

/// Write `content` to a unique file in the temp dir.
pub fn write_temp_config(extension: &str, content: &str) -> PathBuf {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "authpath-test-{}-{}.{}",
        std::process::id(),
        n,
        extension
    ));
    std::fs::write(&path, content).unwrap();
    path
}
