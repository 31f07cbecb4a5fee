//! Argument-resolution stage.

use std::sync::Arc;
use tracing::debug;
use trellis_kernel::controller::{ControllerInstance, ControllerMethod};
use trellis_kernel::interceptor::{
    InterceptionError, Interceptor, InterceptorOrder, InterceptorStack,
};
use trellis_kernel::request::RequestContext;
use trellis_kernel::validation::ParameterNameProvider;

/// Resolves positional argument values for the target method from the
/// request's supplied named values, by parameter name.  Values with no
/// supplied counterpart resolve to `null`.
///
/// Runs before validation so the validator sees the exact values the
/// method will receive.
pub struct ParametersInstantiator {
    names: Arc<dyn ParameterNameProvider>,
}

impl ParametersInstantiator {
    pub fn new(names: Arc<dyn ParameterNameProvider>) -> Self {
        Self { names }
    }
}

impl Interceptor for ParametersInstantiator {
    fn name(&self) -> &str {
        "parameters-instantiator"
    }

    fn order(&self) -> InterceptorOrder {
        InterceptorOrder::PARAMETER_RESOLUTION
    }

    fn accepts(&self, method: &ControllerMethod) -> bool {
        method.method().arity() > 0
    }

    fn intercept(
        &self,
        stack: &mut InterceptorStack<'_>,
        method: &ControllerMethod,
        target: &ControllerInstance,
        ctx: &mut RequestContext,
    ) -> Result<(), InterceptionError> {
        let names = self.names.parameter_names_for(method.method())?;
        let arguments: Vec<_> = names
            .iter()
            .map(|name| ctx.supplied().get(name).cloned().unwrap_or_default())
            .collect();

        debug!(
            request_id = %ctx.id(),
            method = %method.qualified_name(),
            resolved = arguments.len(),
            "arguments instantiated"
        );
        ctx.method_info_mut().set_arguments(arguments);

        stack.next(method, target, ctx)
    }
}
