//! Interceptor trait and stack.
//!
//! An interceptor stack is an ordered chain of [`Interceptor`] stages
//! applied to one controller-method invocation.  Stages are sorted by
//! their declared [`InterceptorOrder`] and consulted in ascending order;
//! the stack itself asks each stage whether it `accepts` the current
//! method before entering it.
//!
//! ```text
//! Request ──► ParametersInstantiator ──► MethodValidator ──► ExecuteMethod
//!                  (controller method body runs in the execute stage)
//! ```

use crate::controller::{ControllerInstance, ControllerMethod};
use crate::proxy::{DispatchError, ProxyError};
use crate::request::RequestContext;
use crate::validation::ValidationError;
use std::sync::Arc;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Interceptor ordering
// ─────────────────────────────────────────────────────────────────────────────

/// Numeric ordering slot for a stage in the stack.
///
/// The well-known slots below act as guidelines; any `u32` value is
/// accepted so callers can slot custom stages between the standard
/// phases.  Stages with equal order values run in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InterceptorOrder(pub u32);

impl InterceptorOrder {
    /// Executes before argument resolution (request-id injection, …).
    pub const PRE_PROCESS: InterceptorOrder = InterceptorOrder(0);
    /// Argument resolution slot — named request values become
    /// positional argument values.
    pub const PARAMETER_RESOLUTION: InterceptorOrder = InterceptorOrder(100);
    /// Method-level parameter validation slot.
    pub const VALIDATION: InterceptorOrder = InterceptorOrder(200);
    /// Controller-method execution slot — runs last.
    pub const EXECUTE: InterceptorOrder = InterceptorOrder(300);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failure during stack execution; aborts the current request's
/// pipeline.  Never recovered locally — the enclosing framework turns it
/// into a response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InterceptionError {
    /// A validation collaborator failed (validator, interpolator,
    /// name provider).
    #[error("parameter validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A proxy call path failed.
    #[error("proxy invocation failed: {0}")]
    Proxy(#[from] ProxyError),

    /// Direct (non-proxy) method dispatch failed.
    #[error("method dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// No dispatch adapter is registered for the controller type.
    #[error("no dispatch adapter registered for controller '{0}'")]
    MissingDispatch(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Interceptor trait
// ─────────────────────────────────────────────────────────────────────────────

/// One stage in the interceptor stack.
///
/// Implementations must be `Send + Sync`; the same stage instance serves
/// every request.  Per-request state lives in the [`RequestContext`].
pub trait Interceptor: Send + Sync {
    /// Stable, human-readable identifier for this stage (used in logs).
    fn name(&self) -> &str;

    /// Position in the stack.  Lower values execute first.
    fn order(&self) -> InterceptorOrder;

    /// Whether this stage applies to the given method.  Called by the
    /// stack before every entry; must be cheap.
    fn accepts(&self, method: &ControllerMethod) -> bool;

    /// Run this stage.  Implementations decide when (and whether) to
    /// release control to the rest of the chain via
    /// [`InterceptorStack::next`].
    fn intercept(
        &self,
        stack: &mut InterceptorStack<'_>,
        method: &ControllerMethod,
        target: &ControllerInstance,
        ctx: &mut RequestContext,
    ) -> Result<(), InterceptionError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// InterceptorStack
// ─────────────────────────────────────────────────────────────────────────────

/// Cursor over an ordered stage list for one invocation.
pub struct InterceptorStack<'a> {
    stages: &'a [Arc<dyn Interceptor>],
    cursor: usize,
}

impl<'a> InterceptorStack<'a> {
    /// Start a fresh traversal.  `stages` must already be sorted by
    /// order (the runtime dispatcher sorts once at construction).
    pub fn new(stages: &'a [Arc<dyn Interceptor>]) -> Self {
        Self { stages, cursor: 0 }
    }

    /// Continue the chain: advance to the next stage accepting `method`
    /// and run it.  Returns `Ok(())` when the chain is exhausted.
    pub fn next(
        &mut self,
        method: &ControllerMethod,
        target: &ControllerInstance,
        ctx: &mut RequestContext,
    ) -> Result<(), InterceptionError> {
        while self.cursor < self.stages.len() {
            let stage = Arc::clone(&self.stages[self.cursor]);
            self.cursor += 1;
            if stage.accepts(method) {
                tracing::trace!(
                    stage = stage.name(),
                    method = %method.qualified_name(),
                    "entering stage"
                );
                return stage.intercept(self, method, target, ctx);
            }
            tracing::trace!(
                stage = stage.name(),
                method = %method.qualified_name(),
                "stage skipped"
            );
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
