//! End-to-end tests: proxy engine + interceptor stack working together
//! over the shared fixtures.

use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use trellis_kernel::validation::{ConstraintViolation, ExecutableValidator, ValidationError};
use trellis_runtime::{
    BundleInterpolator, Constraint, ControllerInstance, ControllerMethod, DeclaredConstraints,
    DescriptorNameProvider, DispatchProxifier, DispatchRegistry, ExecuteMethodInterceptor,
    FixedLocalization, InterceptionHandler, Interceptor, KernelError, MethodDescriptor,
    MethodDispatch,
    MethodValidator, ParametersInstantiator, Proxifier, RequestContext, RequestDispatcher,
    TypeDescriptor, TypeKind,
};
use trellis_testing::{RecordingHandler, ReplacingHandler, UserController, UserControllerDispatch};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn save_constraints() -> Arc<DeclaredConstraints> {
    Arc::new(
        DeclaredConstraints::new()
            .declare(UserControllerDispatch::TYPE_NAME, "save", 0, Constraint::Min(18))
            .declare(UserControllerDispatch::TYPE_NAME, "save", 1, Constraint::NotBlank),
    )
}

fn method_validator(backend: Arc<DeclaredConstraints>) -> MethodValidator {
    MethodValidator::new(
        Arc::clone(&backend) as _,
        backend as _,
        Arc::new(BundleInterpolator::new()),
        Arc::new(DescriptorNameProvider),
        Arc::new(FixedLocalization::unset()),
    )
}

fn standard_dispatcher(validator: MethodValidator) -> RequestDispatcher {
    let registry = Arc::new(DispatchRegistry::new());
    registry.register(Arc::new(UserControllerDispatch::new()));

    RequestDispatcher::new(vec![
        Arc::new(ParametersInstantiator::new(Arc::new(DescriptorNameProvider))),
        Arc::new(validator),
        Arc::new(ExecuteMethodInterceptor::new(registry)),
    ])
}

fn save_method() -> ControllerMethod {
    ControllerMethod::resolve(&UserControllerDispatch::new().descriptor(), "save").unwrap()
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[test]
fn valid_request_executes_without_messages() {
    let dispatcher = standard_dispatcher(method_validator(save_constraints()));
    let target: ControllerInstance = Arc::new(UserController);
    let mut ctx = RequestContext::new()
        .with_supplied("age", json!(30))
        .with_supplied("name", json!("ada"));

    dispatcher.process(&save_method(), &target, &mut ctx).unwrap();

    assert!(ctx.messages().is_empty());
    assert_eq!(
        ctx.method_info().return_value(),
        Some(&json!({ "saved": { "age": 30, "name": "ada" } }))
    );
}

#[test]
fn violations_are_reported_but_the_method_still_runs() {
    let dispatcher = standard_dispatcher(method_validator(save_constraints()));
    let target: ControllerInstance = Arc::new(UserController);
    let mut ctx = RequestContext::new()
        .with_supplied("age", json!(7))
        .with_supplied("name", json!("   "));

    dispatcher.process(&save_method(), &target, &mut ctx).unwrap();

    let categories: HashSet<_> = ctx
        .messages()
        .all()
        .iter()
        .map(|m| m.category().to_string())
        .collect();
    assert_eq!(
        categories,
        HashSet::from(["save.age".to_string(), "save.name".to_string()])
    );

    // Validation never short-circuits: the controller method ran anyway.
    assert!(ctx.method_info().return_value().is_some());
}

#[test]
fn parameterless_methods_skip_validation_and_execute() {
    let dispatcher = standard_dispatcher(method_validator(save_constraints()));
    let target: ControllerInstance = Arc::new(UserController);
    let method =
        ControllerMethod::resolve(&UserControllerDispatch::new().descriptor(), "ping").unwrap();
    let mut ctx = RequestContext::new();

    dispatcher.process(&method, &target, &mut ctx).unwrap();

    assert!(ctx.messages().is_empty());
    assert_eq!(ctx.method_info().return_value(), Some(&json!("pong")));
}

#[test]
fn validator_backend_failure_aborts_the_pipeline() {
    struct FailingValidator;

    impl ExecutableValidator for FailingValidator {
        fn validate_parameters(
            &self,
            _target: &ControllerInstance,
            _method: &ControllerMethod,
            _args: &[Value],
        ) -> Result<Vec<ConstraintViolation>, ValidationError> {
            Err(ValidationError::Validator("backend offline".to_string()))
        }
    }

    let metadata = save_constraints();
    let validator = MethodValidator::new(
        metadata as _,
        Arc::new(FailingValidator),
        Arc::new(BundleInterpolator::new()),
        Arc::new(DescriptorNameProvider),
        Arc::new(FixedLocalization::unset()),
    );
    let dispatcher = standard_dispatcher(validator);
    let target: ControllerInstance = Arc::new(UserController);
    let mut ctx = RequestContext::new()
        .with_supplied("age", json!(30))
        .with_supplied("name", json!("ada"));

    let report = dispatcher
        .process(&save_method(), &target, &mut ctx)
        .unwrap_err();
    assert!(matches!(
        report.current_context(),
        KernelError::Interception(_)
    ));

    // The execute stage never ran.
    assert!(ctx.method_info().return_value().is_none());
}

// ── Proxy engine end to end ───────────────────────────────────────────────────

#[test]
fn proxied_target_routes_execution_through_the_handler() {
    let proxifier = DispatchProxifier::new();
    let handler = Arc::new(RecordingHandler::new());
    let proxy = proxifier
        .proxify(
            Arc::new(UserControllerDispatch::new()),
            Arc::clone(&handler) as Arc<dyn InterceptionHandler>,
        )
        .unwrap();

    let dispatcher = standard_dispatcher(method_validator(save_constraints()));
    let target: ControllerInstance = Arc::new(proxy);
    let mut ctx = RequestContext::new()
        .with_supplied("age", json!(30))
        .with_supplied("name", json!("ada"));

    dispatcher.process(&save_method(), &target, &mut ctx).unwrap();

    assert_eq!(handler.call_count(), 1);
    assert_eq!(
        handler.seen(),
        vec![("save".to_string(), vec![json!(30), json!("ada")])]
    );
    assert_eq!(
        ctx.method_info().return_value(),
        Some(&json!({ "saved": { "age": 30, "name": "ada" } }))
    );
}

#[test]
fn replacing_handler_overrides_the_original_body() {
    let proxifier = DispatchProxifier::new();
    let proxy = proxifier
        .proxify(
            Arc::new(UserControllerDispatch::new()),
            Arc::new(ReplacingHandler::new(json!("intercepted"))),
        )
        .unwrap();

    let result = proxy.call("save", &[json!(30), json!("ada")]).unwrap();
    assert_eq!(result, json!("intercepted"));
}

#[test]
fn interface_types_are_implemented_by_their_proxies() {
    struct GreeterDispatch {
        descriptor: Arc<TypeDescriptor>,
    }

    impl GreeterDispatch {
        fn new() -> Self {
            Self {
                descriptor: Arc::new(
                    TypeDescriptor::new("app.Greeter", TypeKind::Interface).with_method(
                        MethodDescriptor::new("greet").with_parameter("name", "String"),
                    ),
                ),
            }
        }
    }

    impl MethodDispatch for GreeterDispatch {
        fn descriptor(&self) -> Arc<TypeDescriptor> {
            Arc::clone(&self.descriptor)
        }

        fn construct(
            &self,
        ) -> Result<ControllerInstance, trellis_kernel::proxy::DispatchError> {
            Ok(Arc::new(()))
        }

        fn invoke(
            &self,
            _target: &ControllerInstance,
            method: &MethodDescriptor,
            args: &[Value],
        ) -> Result<Value, trellis_kernel::proxy::DispatchError> {
            match method.name.as_str() {
                "greet" => Ok(json!(format!(
                    "hello {}",
                    args.first().and_then(Value::as_str).unwrap_or("?")
                ))),
                other => Err(trellis_kernel::proxy::DispatchError::UnknownMethod(
                    other.to_string(),
                )),
            }
        }
    }

    let proxifier = DispatchProxifier::new();
    let handler = Arc::new(RecordingHandler::new());
    let proxy = proxifier
        .proxify(
            Arc::new(GreeterDispatch::new()),
            Arc::clone(&handler) as Arc<dyn InterceptionHandler>,
        )
        .unwrap();

    assert_eq!(proxy.descriptor().kind, TypeKind::Interface);
    assert_eq!(proxy.raw_type().name, "app.Greeter");
    assert_eq!(
        proxy.call("greet", &[json!("ada")]).unwrap(),
        json!("hello ada")
    );
    assert_eq!(handler.call_count(), 1);
    assert!(proxifier.is_proxy_type(proxy.descriptor()));
}

#[test]
fn proxy_of_proxy_stays_one_level_deep() {
    let proxifier = DispatchProxifier::new();
    let first = proxifier
        .proxify(
            Arc::new(UserControllerDispatch::new()),
            Arc::new(RecordingHandler::new()),
        )
        .unwrap();

    let second = proxifier
        .proxify(
            Arc::new(UserControllerDispatch::with_descriptor(Arc::clone(
                first.descriptor(),
            ))),
            Arc::new(RecordingHandler::new()),
        )
        .unwrap();

    // The second proxy wraps the original type, not the first proxy.
    assert_eq!(second.raw_type().name, UserControllerDispatch::TYPE_NAME);
    assert!(!second.raw_type().is_synthesized());
    assert!(proxifier.is_proxy(Some(&second)));
}
