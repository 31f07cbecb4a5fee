//! Collaborator contracts consumed by the validation stage.
//!
//! Concrete implementations live in `trellis-runtime`
//! (`DeclaredConstraints`, `BundleInterpolator`, `DescriptorNameProvider`);
//! callers may substitute their own.

use super::violation::ConstraintViolation;
use crate::controller::{ControllerInstance, ControllerMethod, MethodDescriptor, TypeDescriptor};
use crate::i18n::Locale;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failure raised by a validation collaborator.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The executable validator itself failed (not a violation — a fault).
    #[error("executable validator failed: {0}")]
    Validator(String),

    /// Message interpolation failed for the given template.
    #[error("message interpolation failed for template '{template}': {reason}")]
    Interpolation { template: String, reason: String },

    /// Parameter names could not be resolved for the given method.
    #[error("parameter names unavailable for method '{0}': {1}")]
    ParameterNames(String, String),

    /// A violation path lacks the method/parameter node structure.
    #[error("violation path '{0}' lacks a parameter node")]
    MalformedPath(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Constraint metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Per-method constraint summary: which parameter indices carry
/// declared constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodConstraints {
    constrained: BTreeSet<usize>,
}

impl MethodConstraints {
    pub fn new(constrained: impl IntoIterator<Item = usize>) -> Self {
        Self {
            constrained: constrained.into_iter().collect(),
        }
    }

    pub fn has_constrained_parameters(&self) -> bool {
        !self.constrained.is_empty()
    }

    /// Constrained parameter indices, ascending.
    pub fn constrained_parameters(&self) -> &BTreeSet<usize> {
        &self.constrained
    }
}

/// Per-type constraint summary, keyed by method name.
#[derive(Debug, Clone, Default)]
pub struct ClassConstraints {
    methods: HashMap<String, MethodConstraints>,
}

impl ClassConstraints {
    pub fn new(methods: HashMap<String, MethodConstraints>) -> Self {
        Self { methods }
    }

    pub fn constraints_for_method(&self, method: &MethodDescriptor) -> Option<&MethodConstraints> {
        self.methods.get(&method.name)
    }
}

/// Source of declared constraint metadata.
///
/// Derived metadata is recomputed per request, never cached by the
/// validation stage.
pub trait ValidationMetadata: Send + Sync {
    /// Constraint summary for a controller type, or `None` when the type
    /// declares no constraints at all.
    fn constraints_for_class(&self, controller: &TypeDescriptor) -> Option<ClassConstraints>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Execution-time collaborators
// ─────────────────────────────────────────────────────────────────────────────

/// Validates actual argument values against a method's declared
/// parameter constraints.
pub trait ExecutableValidator: Send + Sync {
    /// Returns the (unordered) violations for this invocation; an empty
    /// collection means all constraints held.
    fn validate_parameters(
        &self,
        target: &ControllerInstance,
        method: &ControllerMethod,
        args: &[Value],
    ) -> Result<Vec<ConstraintViolation>, ValidationError>;
}

/// Turns a message template into localized text.
pub trait MessageInterpolator: Send + Sync {
    fn interpolate(
        &self,
        template: &str,
        violation: &ConstraintViolation,
        locale: &Locale,
    ) -> Result<String, ValidationError>;
}

/// Supplies parameter names in declaration order for a method.
pub trait ParameterNameProvider: Send + Sync {
    fn parameter_names_for(&self, method: &MethodDescriptor) -> Result<Vec<String>, ValidationError>;
}
