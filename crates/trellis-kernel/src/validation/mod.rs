//! Parameter-validation data model and collaborator contracts.
//!
//! The validation stage in `trellis-runtime` consumes these contracts:
//! an [`ExecutableValidator`] produces [`ConstraintViolation`]s, a
//! [`MessageInterpolator`] localizes their templates, and the resulting
//! [`ValidationMessage`]s land in the request's [`Messages`] collector
//! under a dotted category built from the violation's [`PropertyPath`].

pub mod message;
pub mod traits;
pub mod violation;

// ── Flat re-exports ────────────────────────────────────────────────────────

pub use message::{Messages, ValidationMessage};
pub use traits::{
    ClassConstraints, ExecutableValidator, MessageInterpolator, MethodConstraints,
    ParameterNameProvider, ValidationError, ValidationMetadata,
};
pub use violation::{ConstraintViolation, PathNode, PropertyPath};
