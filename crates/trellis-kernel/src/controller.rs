//! Controller type and method metadata tables.
//!
//! Trellis performs no runtime reflection: every controller type is
//! described by a statically declared [`TypeDescriptor`] whose method table
//! ([`MethodDescriptor`]) carries parameter names in declaration order.
//! Descriptors are supplied by the caller (typically generated at build
//! time alongside the controller's [`MethodDispatch`](crate::proxy::MethodDispatch)
//! adapter) and are the single source of truth for method resolution,
//! interception filtering, and parameter-name lookup.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A live controller object, as constructed by a dispatch adapter.
///
/// Erased to `Any` so the pipeline can carry arbitrary controller types;
/// adapters downcast back to their concrete type on invocation.
pub type ControllerInstance = Arc<dyn Any + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Type descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a controller type is an interface (trait-object-like contract)
/// or a concrete class.
///
/// A synthesized proxy *implements* an `Interface` raw type and
/// *subclasses* a `Class` raw type; sealed classes cannot be proxied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Interface,
    Class,
}

/// Statically declared metadata for one controller type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Fully qualified controller type name, e.g. `app.UserController`.
    pub name: String,
    /// Interface or class.
    pub kind: TypeKind,
    /// A sealed class admits no subclasses and therefore no proxy.
    pub sealed: bool,
    /// Declared methods, in declaration order.
    pub methods: Vec<MethodDescriptor>,
    /// Set on synthesized proxy types only: the real supertype this proxy
    /// implements or subclasses.  Proxies never proxy a proxy — the engine
    /// unwraps through this link before synthesizing.
    pub synthesized_from: Option<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Create a descriptor with an empty method table.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sealed: false,
            methods: Vec::new(),
            synthesized_from: None,
        }
    }

    /// Builder: append a method to the table.
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Builder: mark the class as sealed (no subclasses, no proxies).
    pub fn with_sealed(mut self) -> Self {
        self.sealed = true;
        self
    }

    /// True iff this type was produced by proxy synthesis.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized_from.is_some()
    }

    /// The real (non-proxy) type: the supertype for synthesized proxy
    /// types, `self` otherwise.
    pub fn raw_type(&self) -> &TypeDescriptor {
        self.synthesized_from.as_deref().unwrap_or(self)
    }

    /// Look up a declared method by name.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Method descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// One declared parameter: resolved name plus its declared type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub type_name: String,
}

/// Statically declared metadata for one controller method.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Method name, unique within its declaring type.
    pub name: String,
    /// Parameters in declaration order; the `name` fields form the static
    /// parameter-name table consumed by
    /// [`ParameterNameProvider`](crate::validation::ParameterNameProvider).
    pub parameters: Vec<ParameterDescriptor>,
    /// Generated trampoline (e.g. emitted by a derive macro).  Synthetic
    /// methods are never intercepted.
    pub synthetic: bool,
}

impl MethodDescriptor {
    /// Create a descriptor with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            synthetic: false,
        }
    }

    /// Builder: append a parameter.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        self.parameters.push(ParameterDescriptor {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Builder: mark the method as a generated trampoline.
    pub fn with_synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&p.type_name)?;
        }
        f.write_str(")")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ControllerMethod
// ─────────────────────────────────────────────────────────────────────────────

/// A resolved (controller type, method) pair — the pipeline's unit of work.
#[derive(Debug, Clone)]
pub struct ControllerMethod {
    controller: Arc<TypeDescriptor>,
    method: MethodDescriptor,
}

impl ControllerMethod {
    /// Pair a controller type with one of its declared methods.
    pub fn new(controller: Arc<TypeDescriptor>, method: MethodDescriptor) -> Self {
        Self { controller, method }
    }

    /// Resolve a method by name against the controller's method table.
    pub fn resolve(controller: &Arc<TypeDescriptor>, method_name: &str) -> Option<Self> {
        controller.method(method_name).cloned().map(|method| Self {
            controller: Arc::clone(controller),
            method,
        })
    }

    /// The declaring controller type.
    pub fn controller(&self) -> &TypeDescriptor {
        &self.controller
    }

    /// The resolved method descriptor.
    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    /// `Type.method` label used in logs and error context.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.controller.name, self.method.name)
    }
}

// =============================================================================
// Tests
// =============================================================================
