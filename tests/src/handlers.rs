//! Interception handlers for tests.

use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use trellis_kernel::controller::{ControllerInstance, MethodDescriptor};
use trellis_kernel::proxy::{InterceptionHandler, ProxyError, SuperCall};

/// Records every interception, then delegates to the original body.
#[derive(Default)]
pub struct RecordingHandler {
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, Vec<Value>)>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(method name, argument values)` per interception, in call order.
    pub fn seen(&self) -> Vec<(String, Vec<Value>)> {
        self.seen.lock().unwrap().clone()
    }
}

impl InterceptionHandler for RecordingHandler {
    fn intercept(
        &self,
        target: &ControllerInstance,
        method: &MethodDescriptor,
        args: &[Value],
        super_call: SuperCall<'_>,
    ) -> Result<Value, ProxyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((method.name.clone(), args.to_vec()));
        super_call.invoke(target, args).map_err(ProxyError::from)
    }
}

/// Never runs the original body; answers every intercepted call with a
/// canned value.
pub struct ReplacingHandler {
    answer: Value,
}

impl ReplacingHandler {
    pub fn new(answer: Value) -> Self {
        Self { answer }
    }
}

impl InterceptionHandler for ReplacingHandler {
    fn intercept(
        &self,
        _target: &ControllerInstance,
        _method: &MethodDescriptor,
        _args: &[Value],
        _super_call: SuperCall<'_>,
    ) -> Result<Value, ProxyError> {
        Ok(self.answer.clone())
    }
}
