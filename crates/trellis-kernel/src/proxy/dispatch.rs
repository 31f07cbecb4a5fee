//! Caller-supplied method-dispatch adapters.
//!
//! Trellis never generates code at runtime.  Each proxyable controller
//! type supplies a [`MethodDispatch`] adapter — typically generated at
//! build time next to the controller — that the proxy engine uses to
//! construct the target and to invoke original method bodies.

use crate::controller::{ControllerInstance, MethodDescriptor, TypeDescriptor};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Failure raised by a dispatch adapter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The no-argument constructor path failed.
    #[error("constructor for '{0}' failed: {1}")]
    Construction(String, String),

    /// The adapter has no dispatch entry for this method.
    #[error("method '{0}' is not dispatchable on this adapter")]
    UnknownMethod(String),

    /// The argument array does not match the method's declared arity.
    #[error("method '{method}' expected {expected} arguments, got {actual}")]
    ArityMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    /// The original method body itself failed.
    #[error("method '{0}' failed")]
    MethodFailed(String, #[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Static dispatch table for one controller type.
///
/// Implementations must be `Send + Sync`; the same adapter instance is
/// shared by every request touching its controller type.
pub trait MethodDispatch: Send + Sync {
    /// The described controller type, including its full method table.
    fn descriptor(&self) -> Arc<TypeDescriptor>;

    /// Construct a fresh controller instance via the no-argument
    /// constructor path.
    fn construct(&self) -> Result<ControllerInstance, DispatchError>;

    /// Invoke the original (non-intercepted) body of `method` on
    /// `target` with the given argument values.
    fn invoke(
        &self,
        target: &ControllerInstance,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> Result<Value, DispatchError>;
}
