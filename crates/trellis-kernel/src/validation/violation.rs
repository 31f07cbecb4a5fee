//! Constraint violations and their property paths.
//!
//! A violation's path addresses the offending value structurally: the
//! first node names the method, the second the parameter (with its
//! zero-based index), and any further nodes name cascaded properties of
//! an object-valued parameter.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Path nodes
// ─────────────────────────────────────────────────────────────────────────────

/// One segment of a violation's property path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathNode {
    /// The method-level node, always first.
    Method { name: String },
    /// The parameter node, always second.  `name` is the synthetic
    /// placeholder (`arg<index>`) until the validation stage renames it
    /// to the resolved parameter name.
    Parameter { name: String, index: usize },
    /// A cascaded property of an object-valued parameter.
    Property { name: String },
}

impl PathNode {
    pub fn method(name: impl Into<String>) -> Self {
        PathNode::Method { name: name.into() }
    }

    /// Parameter node carrying the synthetic `arg<index>` placeholder.
    pub fn parameter(index: usize) -> Self {
        PathNode::Parameter {
            name: format!("arg{index}"),
            index,
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        PathNode::Property { name: name.into() }
    }

    /// The segment text used when joining a path into a category.
    pub fn name(&self) -> &str {
        match self {
            PathNode::Method { name }
            | PathNode::Parameter { name, .. }
            | PathNode::Property { name } => name,
        }
    }
}

/// Ordered node sequence addressing one validated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPath(Vec<PathNode>);

impl PropertyPath {
    pub fn new(nodes: Vec<PathNode>) -> Self {
        Self(nodes)
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.0
    }

    /// The zero-based index of the violated parameter, read from the
    /// second path node.  `None` when the path is malformed (missing or
    /// non-parameter second node).
    pub fn parameter_index(&self) -> Option<usize> {
        match self.0.get(1) {
            Some(PathNode::Parameter { index, .. }) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyPath {
    /// Dotted form with the synthetic parameter placeholder, e.g.
    /// `save.arg0.name`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(node.name())?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ConstraintViolation
// ─────────────────────────────────────────────────────────────────────────────

/// One reported failure of a declared constraint against a specific
/// parameter, as produced by an
/// [`ExecutableValidator`](super::ExecutableValidator).
///
/// Violation collections are inherently unordered; consumers must not
/// rely on iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    /// Uninterpolated message template, e.g. `{trellis.constraint.min}`.
    pub message_template: String,
    /// Structural address of the offending value.
    pub path: PropertyPath,
    /// The value that failed the constraint.
    pub invalid_value: Value,
    /// Constraint attributes exposed to the interpolator, e.g. `min`/`max`.
    pub attributes: HashMap<String, Value>,
}

impl ConstraintViolation {
    pub fn new(message_template: impl Into<String>, path: PropertyPath) -> Self {
        Self {
            message_template: message_template.into(),
            path,
            invalid_value: Value::Null,
            attributes: HashMap::new(),
        }
    }

    /// Builder: record the offending value.
    pub fn with_invalid_value(mut self, value: Value) -> Self {
        self.invalid_value = value;
        self
    }

    /// Builder: attach one interpolation attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Builder: attach a full attribute map.
    pub fn with_attributes(mut self, attributes: HashMap<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
