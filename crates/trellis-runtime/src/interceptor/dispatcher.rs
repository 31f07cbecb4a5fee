//! Request dispatcher: assembles and runs the interceptor stack.

use error_stack::{Report, ResultExt};
use std::sync::Arc;
use tracing::debug;
use trellis_kernel::controller::{ControllerInstance, ControllerMethod};
use trellis_kernel::error::{KernelError, KernelResult};
use trellis_kernel::interceptor::{Interceptor, InterceptorStack};
use trellis_kernel::request::RequestContext;

/// Ordered list of boxed stages executed as a stack, one traversal per
/// request.
///
/// Stages are sorted by [`InterceptorOrder`](trellis_kernel::interceptor::InterceptorOrder)
/// in ascending order; stages with equal order values keep their
/// registration order (stable sort).
pub struct RequestDispatcher {
    stages: Vec<Arc<dyn Interceptor>>,
}

impl RequestDispatcher {
    /// Build a dispatcher from a list of stages, sorted by their
    /// declared order.
    pub fn new(mut stages: Vec<Arc<dyn Interceptor>>) -> Self {
        stages.sort_by_key(|s| s.order());
        Self { stages }
    }

    /// Run one controller-method invocation through the stack.
    ///
    /// Any stage failure aborts the traversal and surfaces with the
    /// request id and method attached as report context; nothing is
    /// recovered here.
    pub fn process(
        &self,
        method: &ControllerMethod,
        target: &ControllerInstance,
        ctx: &mut RequestContext,
    ) -> KernelResult<()> {
        debug!(
            request_id = %ctx.id(),
            method = %method.qualified_name(),
            stages = self.stages.len(),
            "processing request"
        );

        let request_id = ctx.id().to_string();
        let mut stack = InterceptorStack::new(&self.stages);
        stack
            .next(method, target, ctx)
            .map_err(KernelError::from)
            .map_err(Report::new)
            .attach_printable_lazy(|| {
                format!("request {request_id} ({})", method.qualified_name())
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_kernel::interceptor::{InterceptionError, InterceptorOrder};

    struct Tagging {
        name: &'static str,
        order: InterceptorOrder,
    }

    impl Interceptor for Tagging {
        fn name(&self) -> &str {
            self.name
        }

        fn order(&self) -> InterceptorOrder {
            self.order
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
            use trellis_kernel::validation::ValidationMessage;
            // Abuse the collector as an execution log.
            ctx.messages_mut()
                .add(ValidationMessage::new("ran", self.name));
            stack.next(method, target, ctx)
        }
    }

    fn ping() -> ControllerMethod {
        use trellis_kernel::controller::{MethodDescriptor, TypeDescriptor, TypeKind};
        let ty = Arc::new(
            TypeDescriptor::new("app.Health", TypeKind::Class)
                .with_method(MethodDescriptor::new("ping")),
        );
        ControllerMethod::resolve(&ty, "ping").unwrap()
    }

    #[test]
    fn stages_run_sorted_by_declared_order() {
        let dispatcher = RequestDispatcher::new(vec![
            Arc::new(Tagging {
                name: "late",
                order: InterceptorOrder::EXECUTE,
            }),
            Arc::new(Tagging {
                name: "early",
                order: InterceptorOrder::PRE_PROCESS,
            }),
        ]);

        let method = ping();
        let target: ControllerInstance = Arc::new(());
        let mut ctx = RequestContext::new();
        dispatcher.process(&method, &target, &mut ctx).unwrap();

        let order: Vec<_> = ctx.messages().all().iter().map(|m| m.category()).collect();
        assert_eq!(order, vec!["early", "late"]);
    }
}
