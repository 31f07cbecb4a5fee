//! Sample controller and its hand-written dispatch adapter.
//!
//! `UserControllerDispatch` is what a build-time generator would emit
//! for `UserController`: the type descriptor (with parameter names),
//! the no-argument constructor path, and the method dispatch table.

use serde_json::{json, Value};
use std::sync::Arc;
use trellis_kernel::controller::{
    ControllerInstance, MethodDescriptor, TypeDescriptor, TypeKind,
};
use trellis_kernel::proxy::{DispatchError, MethodDispatch};

/// A small MVC controller with both constrained and unconstrained
/// methods.
#[derive(Default)]
pub struct UserController;

impl UserController {
    pub fn save(&self, age: i64, name: &str) -> Value {
        json!({ "saved": { "age": age, "name": name } })
    }

    pub fn ping(&self) -> Value {
        json!("pong")
    }
}

/// Dispatch adapter for [`UserController`].
pub struct UserControllerDispatch {
    descriptor: Arc<TypeDescriptor>,
}

impl UserControllerDispatch {
    pub const TYPE_NAME: &'static str = "app.UserController";

    pub fn new() -> Self {
        Self {
            descriptor: Arc::new(Self::describe()),
        }
    }

    /// Adapter whose declared type is `descriptor` — used to feed the
    /// proxifier an already-synthesized type.
    pub fn with_descriptor(descriptor: Arc<TypeDescriptor>) -> Self {
        Self { descriptor }
    }

    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(Self::TYPE_NAME, TypeKind::Class)
            .with_method(
                MethodDescriptor::new("save")
                    .with_parameter("age", "i64")
                    .with_parameter("name", "String"),
            )
            .with_method(MethodDescriptor::new("ping"))
            .with_method(MethodDescriptor::new("to_string"))
            .with_method(MethodDescriptor::new("save$trampoline").with_synthetic())
    }

    fn controller<'a>(
        target: &'a ControllerInstance,
        method: &MethodDescriptor,
    ) -> Result<&'a UserController, DispatchError> {
        target.downcast_ref::<UserController>().ok_or_else(|| {
            DispatchError::MethodFailed(
                method.name.clone(),
                "target is not a UserController".to_string().into(),
            )
        })
    }
}

impl Default for UserControllerDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodDispatch for UserControllerDispatch {
    fn descriptor(&self) -> Arc<TypeDescriptor> {
        Arc::clone(&self.descriptor)
    }

    fn construct(&self) -> Result<ControllerInstance, DispatchError> {
        Ok(Arc::new(UserController))
    }

    fn invoke(
        &self,
        target: &ControllerInstance,
        method: &MethodDescriptor,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        match method.name.as_str() {
            "save" | "save$trampoline" => {
                if args.len() != 2 {
                    return Err(DispatchError::ArityMismatch {
                        method: method.name.clone(),
                        expected: 2,
                        actual: args.len(),
                    });
                }
                let controller = Self::controller(target, method)?;
                let age = args[0].as_i64().unwrap_or_default();
                let name = args[1].as_str().unwrap_or_default();
                Ok(controller.save(age, name))
            }
            "ping" => Ok(Self::controller(target, method)?.ping()),
            "to_string" => Ok(json!("UserController")),
            other => Err(DispatchError::UnknownMethod(other.to_string())),
        }
    }
}
