//! Proxy-engine contract.
//!
//! This module defines the *trait interfaces and instance types* for
//! controller proxying.  The concrete engine lives in
//! `trellis-runtime::proxy` (`DispatchProxifier`).
//!
//! # Architecture mapping
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              trellis-kernel  (this module)                  │
//! │  Proxifier trait          InterceptionHandler trait         │
//! │  MethodDispatch trait     ForeignProxyDetector trait        │
//! │  ControllerProxy          SuperCall / proxy errors          │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │  depends on
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │              trellis-runtime  (engine crate)                │
//! │  DispatchProxifier: impl Proxifier                          │
//! │  NameMarkerDetector: impl ForeignProxyDetector              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod instance;

// ── Flat re-exports ────────────────────────────────────────────────────────

pub use dispatch::{DispatchError, MethodDispatch};
pub use error::{ProxyCreationError, ProxyError, ProxyInvocationError};
pub use handler::{InterceptionHandler, SuperCall};
pub use instance::ControllerProxy;

use crate::controller::TypeDescriptor;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Methods of the universal object protocol — equality, hashing, string
/// conversion, cloning, teardown.  Never intercepted: routing them
/// through a handler would recurse during logging/debugging/collection
/// use and leak proxy internals to callers.
pub const OBJECT_PROTOCOL_METHODS: &[&str] =
    &["eq", "ne", "hash", "fmt", "to_string", "clone", "drop"];

/// Synthesizes proxies for controller types.
pub trait Proxifier: Send + Sync {
    /// Create a proxy for the adapter's described type, routing every
    /// interceptable method through `handler`.
    ///
    /// If the described type is itself a synthesized proxy type, the
    /// engine unwraps to its real supertype first — exactly one proxy
    /// layer ever exists.
    fn proxify(
        &self,
        dispatch: Arc<dyn MethodDispatch>,
        handler: Arc<dyn InterceptionHandler>,
    ) -> Result<ControllerProxy, ProxyCreationError>;

    /// Null-safe: true iff the object's runtime type is a recognized
    /// synthesized proxy type.
    fn is_proxy(&self, object: Option<&dyn Any>) -> bool;

    /// True if the type was produced by this engine's synthesis, or is
    /// recognized by a registered third-party detector.
    fn is_proxy_type(&self, descriptor: &TypeDescriptor) -> bool;
}

/// A third-party framework's own proxy-detection rule.
///
/// Advisory integration point: detection may fail to resolve in
/// environments where the foreign framework is absent.  The engine
/// treats such failures as "not a proxy of that kind" and logs them.
pub trait ForeignProxyDetector: Send + Sync {
    /// Identifier used in logs when detection fails.
    fn name(&self) -> &str;

    fn detect(&self, descriptor: &TypeDescriptor) -> Result<bool, DetectorError>;
}

/// A foreign detector could not resolve its framework's types.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("foreign proxy detector '{detector}' could not resolve: {reason}")]
pub struct DetectorError {
    pub detector: String,
    pub reason: String,
}

impl DetectorError {
    pub fn new(detector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            detector: detector.into(),
            reason: reason.into(),
        }
    }
}
