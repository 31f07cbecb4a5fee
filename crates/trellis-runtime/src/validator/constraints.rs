//! Statically declared parameter constraints.
//!
//! [`DeclaredConstraints`] is the built-in constraint backend: a table
//! of per-controller, per-method, per-parameter rules declared at
//! startup.  It implements both sides of the validation contract —
//! [`ValidationMetadata`] (does this method have constrained
//! parameters?) and [`ExecutableValidator`] (which constraints does
//! this argument array violate?).

use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use trellis_kernel::controller::{ControllerInstance, ControllerMethod, TypeDescriptor};
use trellis_kernel::validation::{
    ClassConstraints, ConstraintViolation, ExecutableValidator, MethodConstraints, PathNode,
    PropertyPath, ValidationError, ValidationMetadata,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constraint kinds
// ─────────────────────────────────────────────────────────────────────────────

/// A declared rule for one parameter value.
///
/// Numeric and size rules follow the usual convention of treating null
/// as valid — combine with [`Constraint::NotNull`] to forbid absence.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Value must not be null.
    NotNull,
    /// String value must contain non-whitespace characters.
    NotBlank,
    /// Integer value must be >= the bound.
    Min(i64),
    /// Integer value must be <= the bound.
    Max(i64),
    /// String length or array length must lie in `[min, max]`.
    Size { min: usize, max: usize },
    /// Cascade: apply `rule` to the named field of an object-valued
    /// parameter.  Violations carry a trailing property path node.
    Valid { field: String, rule: Box<Constraint> },
}

impl Constraint {
    /// Message-bundle key template for this rule.
    pub fn message_template(&self) -> &'static str {
        match self {
            Constraint::NotNull => "{trellis.constraint.not_null}",
            Constraint::NotBlank => "{trellis.constraint.not_blank}",
            Constraint::Min(_) => "{trellis.constraint.min}",
            Constraint::Max(_) => "{trellis.constraint.max}",
            Constraint::Size { .. } => "{trellis.constraint.size}",
            Constraint::Valid { rule, .. } => rule.message_template(),
        }
    }

    /// Attributes exposed to the interpolator.
    pub fn attributes(&self) -> HashMap<String, Value> {
        match self {
            Constraint::Min(bound) | Constraint::Max(bound) => {
                HashMap::from([("value".to_string(), json!(bound))])
            }
            Constraint::Size { min, max } => HashMap::from([
                ("min".to_string(), json!(min)),
                ("max".to_string(), json!(max)),
            ]),
            Constraint::Valid { rule, .. } => rule.attributes(),
            _ => HashMap::new(),
        }
    }

    fn is_satisfied(&self, value: &Value) -> bool {
        match self {
            Constraint::NotNull => !value.is_null(),
            Constraint::NotBlank => value
                .as_str()
                .is_some_and(|s| !s.trim().is_empty()),
            Constraint::Min(bound) => value.as_i64().is_none_or(|v| v >= *bound),
            Constraint::Max(bound) => value.as_i64().is_none_or(|v| v <= *bound),
            Constraint::Size { min, max } => {
                let len = match value {
                    Value::String(s) => Some(s.chars().count()),
                    Value::Array(a) => Some(a.len()),
                    _ => None,
                };
                len.is_none_or(|l| l >= *min && l <= *max)
            }
            // Cascades are unfolded by the validator before checking.
            Constraint::Valid { .. } => true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DeclaredConstraints
// ─────────────────────────────────────────────────────────────────────────────

/// Constraint tables: controller name → method name → parameter index
/// → rules.
#[derive(Debug, Clone, Default)]
pub struct DeclaredConstraints {
    rules: HashMap<String, HashMap<String, BTreeMap<usize, Vec<Constraint>>>>,
}

impl DeclaredConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: declare one rule for a method parameter.
    pub fn declare(
        mut self,
        controller: impl Into<String>,
        method: impl Into<String>,
        parameter: usize,
        constraint: Constraint,
    ) -> Self {
        self.rules
            .entry(controller.into())
            .or_default()
            .entry(method.into())
            .or_default()
            .entry(parameter)
            .or_default()
            .push(constraint);
        self
    }

    fn method_rules(
        &self,
        controller: &str,
        method: &str,
    ) -> Option<&BTreeMap<usize, Vec<Constraint>>> {
        self.rules.get(controller)?.get(method)
    }
}

impl ValidationMetadata for DeclaredConstraints {
    fn constraints_for_class(&self, controller: &TypeDescriptor) -> Option<ClassConstraints> {
        let methods = self.rules.get(&controller.name)?;
        let summaries = methods
            .iter()
            .map(|(name, params)| {
                (name.clone(), MethodConstraints::new(params.keys().copied()))
            })
            .collect();
        Some(ClassConstraints::new(summaries))
    }
}

impl ExecutableValidator for DeclaredConstraints {
    fn validate_parameters(
        &self,
        _target: &ControllerInstance,
        method: &ControllerMethod,
        args: &[Value],
    ) -> Result<Vec<ConstraintViolation>, ValidationError> {
        let Some(rules) = self.method_rules(&method.controller().name, &method.method().name)
        else {
            return Ok(Vec::new());
        };

        let mut violations = Vec::new();
        for (&index, constraints) in rules {
            let value = args.get(index).cloned().unwrap_or(Value::Null);
            for constraint in constraints {
                match constraint {
                    Constraint::Valid { field, rule } => {
                        let nested = value.get(field.as_str()).cloned().unwrap_or(Value::Null);
                        if !rule.is_satisfied(&nested) {
                            violations.push(
                                ConstraintViolation::new(
                                    rule.message_template(),
                                    PropertyPath::new(vec![
                                        PathNode::method(method.method().name.as_str()),
                                        PathNode::parameter(index),
                                        PathNode::property(field.as_str()),
                                    ]),
                                )
                                .with_invalid_value(nested)
                                .with_attributes(rule.attributes()),
                            );
                        }
                    }
                    _ => {
                        if !constraint.is_satisfied(&value) {
                            violations.push(
                                ConstraintViolation::new(
                                    constraint.message_template(),
                                    PropertyPath::new(vec![
                                        PathNode::method(method.method().name.as_str()),
                                        PathNode::parameter(index),
                                    ]),
                                )
                                .with_invalid_value(value.clone())
                                .with_attributes(constraint.attributes()),
                            );
                        }
                    }
                }
            }
        }
        Ok(violations)
    }
}

// =============================================================================
// Tests
// =============================================================================
