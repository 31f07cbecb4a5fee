//! The synthesized proxy instance.

use super::dispatch::MethodDispatch;
use super::error::ProxyError;
use super::handler::{InterceptionHandler, SuperCall};
use crate::controller::{ControllerInstance, TypeDescriptor};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A runtime stand-in for a controller type.
///
/// Holds the real target instance, the type's dispatch adapter, the
/// interception handler, and the dispatch table of intercepted method
/// names computed at synthesis time.  Calls to intercepted methods route
/// through the handler; everything else (object-protocol methods,
/// synthetic trampolines) passes straight to the adapter.
pub struct ControllerProxy {
    descriptor: Arc<TypeDescriptor>,
    target: ControllerInstance,
    dispatch: Arc<dyn MethodDispatch>,
    handler: Arc<dyn InterceptionHandler>,
    intercepted: HashSet<String>,
}

impl ControllerProxy {
    /// Assemble a proxy.  Use
    /// [`Proxifier::proxify`](super::Proxifier::proxify) rather than
    /// calling this directly — the engine computes the intercepted-method
    /// table and enforces the unwrap-first invariant.
    pub fn new(
        descriptor: Arc<TypeDescriptor>,
        target: ControllerInstance,
        dispatch: Arc<dyn MethodDispatch>,
        handler: Arc<dyn InterceptionHandler>,
        intercepted: HashSet<String>,
    ) -> Self {
        Self {
            descriptor,
            target,
            dispatch,
            handler,
            intercepted,
        }
    }

    /// The synthesized type descriptor (`is_synthesized()` holds).
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// The real supertype this proxy stands in for.
    pub fn raw_type(&self) -> &TypeDescriptor {
        self.descriptor.raw_type()
    }

    /// The wrapped controller instance.
    pub fn target(&self) -> &ControllerInstance {
        &self.target
    }

    /// Whether calls to `method_name` route through the handler.
    pub fn is_intercepted(&self, method_name: &str) -> bool {
        self.intercepted.contains(method_name)
    }

    /// Call a method on the proxy.
    ///
    /// Intercepted methods invoke the handler exactly once, passing a
    /// [`SuperCall`] for the original body.  Filtered methods are
    /// dispatched directly, with body failures reported as
    /// [`ProxyError::Invocation`].
    pub fn call(&self, method_name: &str, args: &[Value]) -> Result<Value, ProxyError> {
        let method = self.raw_type().method(method_name).ok_or_else(|| {
            ProxyError::UnknownMethod(method_name.to_string(), self.raw_type().name.clone())
        })?;

        if self.intercepted.contains(method_name) {
            tracing::trace!(method = %method, proxy = %self.descriptor.name, "intercepted call");
            let super_call = SuperCall::new(self.dispatch.as_ref(), method);
            self.handler.intercept(&self.target, method, args, super_call)
        } else {
            self.dispatch
                .invoke(&self.target, method, args)
                .map_err(|e| ProxyError::Invocation(e.into()))
        }
    }
}

impl fmt::Debug for ControllerProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerProxy")
            .field("descriptor", &self.descriptor.name)
            .field("raw_type", &self.raw_type().name)
            .field("intercepted", &self.intercepted)
            .finish_non_exhaustive()
    }
}
