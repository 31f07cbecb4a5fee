//! Foreign-framework proxy detection.

use trellis_kernel::controller::TypeDescriptor;
use trellis_kernel::proxy::{DetectorError, ForeignProxyDetector};

/// Recognizes proxy types emitted by a DI container or interception
/// framework from the marker the framework stamps into generated type
/// names (e.g. `app.UserController_$$_container`).
pub struct NameMarkerDetector {
    marker: String,
}

impl NameMarkerDetector {
    /// Marker used by container-enhanced subclasses.
    pub const CONTAINER_MARKER: &'static str = "_$$_container";

    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// Detector for the default container marker.
    pub fn container() -> Self {
        Self::new(Self::CONTAINER_MARKER)
    }
}

impl ForeignProxyDetector for NameMarkerDetector {
    fn name(&self) -> &str {
        "name-marker"
    }

    fn detect(&self, descriptor: &TypeDescriptor) -> Result<bool, DetectorError> {
        Ok(descriptor.name.contains(&self.marker))
    }
}
