//! Interception handlers and super-calls.

use super::dispatch::MethodDispatch;
use super::error::{ProxyError, ProxyInvocationError};
use crate::controller::{ControllerInstance, MethodDescriptor};
use serde_json::Value;

/// Caller-supplied logic invoked in place of a proxied method.
///
/// The handler decides whether to run the original body (via the
/// [`SuperCall`]), replace it, or wrap it.  It is invoked exactly once
/// per intercepted call.
pub trait InterceptionHandler: Send + Sync {
    fn intercept(
        &self,
        target: &ControllerInstance,
        method: &MethodDescriptor,
        args: &[Value],
        super_call: SuperCall<'_>,
    ) -> Result<Value, ProxyError>;
}

/// Invokes the original, non-intercepted method body.
///
/// Any failure thrown by the body is wrapped in
/// [`ProxyInvocationError`], signalling that business logic failed
/// rather than proxy machinery.
pub struct SuperCall<'a> {
    dispatch: &'a dyn MethodDispatch,
    method: &'a MethodDescriptor,
}

impl<'a> SuperCall<'a> {
    pub fn new(dispatch: &'a dyn MethodDispatch, method: &'a MethodDescriptor) -> Self {
        Self { dispatch, method }
    }

    /// Run the original method body against `target`.
    pub fn invoke(
        &self,
        target: &ControllerInstance,
        args: &[Value],
    ) -> Result<Value, ProxyInvocationError> {
        self.dispatch
            .invoke(target, self.method, args)
            .map_err(ProxyInvocationError::from)
    }
}
