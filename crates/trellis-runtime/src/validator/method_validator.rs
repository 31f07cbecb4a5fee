//! Method-level parameter validation stage.
//!
//! Validates controller-method arguments against declared parameter
//! constraints.  A method is intercepted only if any of its parameters
//! carries constraints.  Violations become localized
//! [`ValidationMessage`]s in the request's collector; the stage then
//! always releases control to the rest of the chain — reported
//! violations never short-circuit method execution.

use std::sync::Arc;
use tracing::debug;
use trellis_kernel::controller::{ControllerInstance, ControllerMethod};
use trellis_kernel::i18n::{Locale, LocaleConfig, Localization};
use trellis_kernel::interceptor::{
    InterceptionError, Interceptor, InterceptorOrder, InterceptorStack,
};
use trellis_kernel::request::RequestContext;
use trellis_kernel::validation::{
    ConstraintViolation, ExecutableValidator, MessageInterpolator, ParameterNameProvider,
    PathNode, ValidationError, ValidationMessage, ValidationMetadata,
};

pub struct MethodValidator {
    metadata: Arc<dyn ValidationMetadata>,
    validator: Arc<dyn ExecutableValidator>,
    interpolator: Arc<dyn MessageInterpolator>,
    names: Arc<dyn ParameterNameProvider>,
    localization: Arc<dyn Localization>,
    locales: LocaleConfig,
}

impl MethodValidator {
    pub fn new(
        metadata: Arc<dyn ValidationMetadata>,
        validator: Arc<dyn ExecutableValidator>,
        interpolator: Arc<dyn MessageInterpolator>,
        names: Arc<dyn ParameterNameProvider>,
        localization: Arc<dyn Localization>,
    ) -> Self {
        Self {
            metadata,
            validator,
            interpolator,
            names,
            localization,
            locales: LocaleConfig::default(),
        }
    }

    /// Builder: override the process-wide locale fallback.
    pub fn with_locale_config(mut self, locales: LocaleConfig) -> Self {
        self.locales = locales;
        self
    }

    /// Configured locale if set, explicit process default otherwise.
    fn resolve_locale(&self) -> Locale {
        self.localization
            .current_locale()
            .unwrap_or_else(|| self.locales.default_locale.clone())
    }

    /// Dotted category with the parameter segment renamed to the real
    /// parameter name, e.g. `save.arg0.name` → `save.customer.name`.
    ///
    /// The rename is structural — only the parameter node (second path
    /// segment) is replaced, so parameter or property names that
    /// lexically resemble `arg<N>` placeholders are never corrupted.
    fn extract_category(
        names: &[String],
        violation: &ConstraintViolation,
    ) -> Result<String, ValidationError> {
        let nodes = violation.path.nodes();
        let index = violation
            .path
            .parameter_index()
            .ok_or_else(|| ValidationError::MalformedPath(violation.path.to_string()))?;
        let resolved = names.get(index).ok_or_else(|| {
            ValidationError::ParameterNames(
                violation.path.to_string(),
                format!("no declared name at parameter index {index}"),
            )
        })?;

        let segments: Vec<&str> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                if matches!(node, PathNode::Parameter { .. }) && i == 1 {
                    resolved.as_str()
                } else {
                    node.name()
                }
            })
            .collect();
        Ok(segments.join("."))
    }
}

impl Interceptor for MethodValidator {
    fn name(&self) -> &str {
        "method-validator"
    }

    fn order(&self) -> InterceptorOrder {
        InterceptorOrder::VALIDATION
    }

    fn accepts(&self, method: &ControllerMethod) -> bool {
        if method.method().arity() == 0 {
            // skip parameterless methods
            return false;
        }

        let Some(class) = self.metadata.constraints_for_class(method.controller()) else {
            return false;
        };
        class
            .constraints_for_method(method.method())
            .is_some_and(|m| m.has_constrained_parameters())
    }

    fn intercept(
        &self,
        stack: &mut InterceptorStack<'_>,
        method: &ControllerMethod,
        target: &ControllerInstance,
        ctx: &mut RequestContext,
    ) -> Result<(), InterceptionError> {
        let violations =
            self.validator
                .validate_parameters(target, method, ctx.method_info().arguments())?;
        debug!(
            request_id = %ctx.id(),
            method = %method.qualified_name(),
            violations = violations.len(),
            "parameter validation finished"
        );

        if !violations.is_empty() {
            // Resolved once, reused for every violation of this call.
            let names = self.names.parameter_names_for(method.method())?;
            let locale = self.resolve_locale();

            for violation in &violations {
                let text =
                    self.interpolator
                        .interpolate(&violation.message_template, violation, &locale)?;
                let category = Self::extract_category(&names, violation)?;
                debug!(category = %category, "violation reported");
                ctx.messages_mut().add(ValidationMessage::new(text, category));
            }
        }

        stack.next(method, target, ctx)
    }
}

// =============================================================================
// Tests
// =============================================================================
