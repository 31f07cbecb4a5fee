//! Controller-method execution stage.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;
use trellis_kernel::controller::{ControllerInstance, ControllerMethod};
use trellis_kernel::interceptor::{
    InterceptionError, Interceptor, InterceptorOrder, InterceptorStack,
};
use trellis_kernel::proxy::{ControllerProxy, MethodDispatch};
use trellis_kernel::request::RequestContext;

/// Dispatch adapters keyed by controller type name.
///
/// Shared across requests; registration normally happens once at
/// startup, alongside controller registration.
#[derive(Default)]
pub struct DispatchRegistry {
    adapters: DashMap<String, Arc<dyn MethodDispatch>>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its descriptor's type name.  A second
    /// registration for the same type replaces the first.
    pub fn register(&self, dispatch: Arc<dyn MethodDispatch>) {
        let name = dispatch.descriptor().name.clone();
        self.adapters.insert(name, dispatch);
    }

    pub fn get(&self, controller_name: &str) -> Option<Arc<dyn MethodDispatch>> {
        self.adapters.get(controller_name).map(|e| Arc::clone(&e))
    }
}

/// Terminal stage: runs the controller method itself.
///
/// If the target instance is a synthesized proxy, the invocation routes
/// through [`ControllerProxy::call`] — and therefore through the proxy's
/// interception handler.  Plain instances dispatch directly through the
/// registered adapter.  The return value lands in the context's
/// [`MethodInfo`](trellis_kernel::request::MethodInfo).
pub struct ExecuteMethodInterceptor {
    registry: Arc<DispatchRegistry>,
}

impl ExecuteMethodInterceptor {
    pub fn new(registry: Arc<DispatchRegistry>) -> Self {
        Self { registry }
    }
}

impl Interceptor for ExecuteMethodInterceptor {
    fn name(&self) -> &str {
        "execute-method"
    }

    fn order(&self) -> InterceptorOrder {
        InterceptorOrder::EXECUTE
    }

    fn accepts(&self, _method: &ControllerMethod) -> bool {
        true
    }

    fn intercept(
        &self,
        stack: &mut InterceptorStack<'_>,
        method: &ControllerMethod,
        target: &ControllerInstance,
        ctx: &mut RequestContext,
    ) -> Result<(), InterceptionError> {
        let args = ctx.method_info().arguments().to_vec();

        let result = if let Some(proxy) = target.downcast_ref::<ControllerProxy>() {
            debug!(
                request_id = %ctx.id(),
                method = %method.qualified_name(),
                proxy_type = %proxy.descriptor().name,
                "executing through proxy"
            );
            proxy.call(&method.method().name, &args)?
        } else {
            let controller = &method.controller().name;
            let dispatch = self
                .registry
                .get(controller)
                .ok_or_else(|| InterceptionError::MissingDispatch(controller.clone()))?;
            debug!(
                request_id = %ctx.id(),
                method = %method.qualified_name(),
                "executing controller method"
            );
            dispatch.invoke(target, method.method(), &args)?
        };

        ctx.method_info_mut().set_return_value(result);
        stack.next(method, target, ctx)
    }
}
