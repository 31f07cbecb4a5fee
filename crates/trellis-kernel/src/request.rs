//! Request-scoped execution state.
//!
//! One [`RequestContext`] exists per inbound request and is exclusively
//! owned by that request's processing — no locking, plain `&mut`
//! threading through the interceptor stack.

use crate::validation::Messages;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// The current method call: resolved argument values and, once the
/// execute stage has run, the method's return value.
#[derive(Debug, Default)]
pub struct MethodInfo {
    arguments: Vec<Value>,
    return_value: Option<Value>,
}

impl MethodInfo {
    /// Positional argument values, as resolved by the
    /// parameter-instantiation stage.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn set_arguments(&mut self, arguments: Vec<Value>) {
        self.arguments = arguments;
    }

    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    pub fn set_return_value(&mut self, value: Value) {
        self.return_value = Some(value);
    }
}

/// Per-request execution context carried through the interceptor stack.
#[derive(Debug)]
pub struct RequestContext {
    id: String,
    supplied: HashMap<String, Value>,
    method_info: MethodInfo,
    messages: Messages,
}

impl RequestContext {
    /// Fresh context with a generated request id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            supplied: HashMap::new(),
            method_info: MethodInfo::default(),
            messages: Messages::new(),
        }
    }

    /// Builder: attach one named request value (decoded form field,
    /// path variable, …) for parameter instantiation.
    pub fn with_supplied(mut self, name: impl Into<String>, value: Value) -> Self {
        self.supplied.insert(name.into(), value);
        self
    }

    /// Correlation id for logs and error context.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Named request values awaiting parameter instantiation.
    pub fn supplied(&self) -> &HashMap<String, Value> {
        &self.supplied
    }

    pub fn method_info(&self) -> &MethodInfo {
        &self.method_info
    }

    pub fn method_info_mut(&mut self) -> &mut MethodInfo {
        &mut self.method_info
    }

    /// The request's validation-message collector.
    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut Messages {
        &mut self.messages
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
