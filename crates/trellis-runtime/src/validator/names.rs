//! Parameter-name resolution from static descriptors.

use trellis_kernel::controller::MethodDescriptor;
use trellis_kernel::validation::{ParameterNameProvider, ValidationError};

/// Reads parameter names straight from the method descriptor's declared
/// parameter table.
pub struct DescriptorNameProvider;

impl ParameterNameProvider for DescriptorNameProvider {
    fn parameter_names_for(
        &self,
        method: &MethodDescriptor,
    ) -> Result<Vec<String>, ValidationError> {
        Ok(method.parameters.iter().map(|p| p.name.clone()).collect())
    }
}
