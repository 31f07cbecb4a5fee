//! Dispatch-table implementation of [`Proxifier`].

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};
use trellis_kernel::controller::{MethodDescriptor, TypeDescriptor, TypeKind};
use trellis_kernel::proxy::{
    ControllerProxy, ForeignProxyDetector, InterceptionHandler, MethodDispatch,
    ProxyCreationError, Proxifier, OBJECT_PROTOCOL_METHODS,
};

/// Proxy engine backed by caller-supplied dispatch adapters.
///
/// Synthesis builds no code at runtime: it constructs the target through
/// the adapter, computes the dispatch table of intercepted methods, and
/// assembles a [`ControllerProxy`] whose descriptor records the real
/// supertype.  Repeated synthesis for the same adapter is idempotent
/// from the caller's perspective; the engine performs no memoization of
/// its own.
#[derive(Default)]
pub struct DispatchProxifier {
    detectors: RwLock<Vec<Arc<dyn ForeignProxyDetector>>>,
}

impl DispatchProxifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a third-party proxy-detection rule consulted by
    /// [`is_proxy_type`](Proxifier::is_proxy_type).
    pub fn register_detector(&self, detector: Arc<dyn ForeignProxyDetector>) {
        self.detectors.write().push(detector);
    }

    /// Methods like `to_string` and `drop` will be ignored, as are
    /// generated trampolines.
    fn is_handled(method: &MethodDescriptor) -> bool {
        !method.synthetic && !OBJECT_PROTOCOL_METHODS.contains(&method.name.as_str())
    }

    /// Never wrap a proxy in another proxy: unwrap to the real
    /// supertype before synthesizing.
    fn extract_raw_type(&self, descriptor: Arc<TypeDescriptor>) -> Arc<TypeDescriptor> {
        if self.is_proxy_type(&descriptor) {
            if let Some(raw) = &descriptor.synthesized_from {
                return Arc::clone(raw);
            }
        }
        descriptor
    }
}

impl Proxifier for DispatchProxifier {
    fn proxify(
        &self,
        dispatch: Arc<dyn MethodDispatch>,
        handler: Arc<dyn InterceptionHandler>,
    ) -> Result<ControllerProxy, ProxyCreationError> {
        let raw = self.extract_raw_type(dispatch.descriptor());

        if raw.kind == TypeKind::Class && raw.sealed {
            error!(target_type = %raw.name, "cannot create a proxy for a sealed class");
            return Err(ProxyCreationError::SealedType(raw.name.clone()));
        }

        let intercepted: HashSet<String> = raw
            .methods
            .iter()
            .filter(|m| Self::is_handled(m))
            .map(|m| m.name.clone())
            .collect();

        let target = dispatch.construct().map_err(|e| {
            error!(target_type = %raw.name, error = %e, "an error occurred creating a proxy");
            ProxyCreationError::Construction(raw.name.clone(), e)
        })?;

        let synthesized = Arc::new(TypeDescriptor {
            name: format!("{}$Proxy", raw.name),
            kind: raw.kind,
            sealed: false,
            methods: raw.methods.clone(),
            synthesized_from: Some(Arc::clone(&raw)),
        });

        debug!(target_type = %raw.name, proxy_type = %synthesized.name, "proxy created");
        Ok(ControllerProxy::new(
            synthesized,
            target,
            dispatch,
            handler,
            intercepted,
        ))
    }

    fn is_proxy(&self, object: Option<&dyn Any>) -> bool {
        object
            .and_then(|o| o.downcast_ref::<ControllerProxy>())
            .is_some_and(|p| self.is_proxy_type(p.descriptor()))
    }

    fn is_proxy_type(&self, descriptor: &TypeDescriptor) -> bool {
        let mut proxy = descriptor.is_synthesized();

        if !proxy {
            // Advisory third-party checks; a detector that cannot resolve
            // its framework's types counts as "not a proxy of that kind".
            for detector in self.detectors.read().iter() {
                match detector.detect(descriptor) {
                    Ok(true) => {
                        proxy = true;
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        warn!(
                            detector = detector.name(),
                            type_name = %descriptor.name,
                            error = %e,
                            "foreign proxy detection failed; treating type as non-proxy"
                        );
                    }
                }
            }
        }

        debug!(type_name = %descriptor.name, proxy, "proxy type check");
        proxy
    }
}

// =============================================================================
// Tests
// =============================================================================
