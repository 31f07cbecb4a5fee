//! Parameter-validation stage and its built-in collaborators.

mod constraints;
mod interpolator;
mod method_validator;
mod names;

pub use constraints::{Constraint, DeclaredConstraints};
pub use interpolator::BundleInterpolator;
pub use method_validator::MethodValidator;
pub use names::DescriptorNameProvider;
