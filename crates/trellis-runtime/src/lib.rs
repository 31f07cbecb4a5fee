// =============================================================================
// Trellis Runtime - Proxy Engine and Interceptor Stack
// =============================================================================
//
// This crate provides the concrete machinery behind the trellis-kernel
// contracts.  It follows the kernel/runtime split: trellis-kernel owns
// the trait interfaces and data model, this crate owns behavior.
//
// Main Components:
// - DispatchProxifier: proxy synthesis over caller-supplied adapters
// - RequestDispatcher: ordered interceptor stack for one request
// - MethodValidator: method-level parameter validation stage
// - DeclaredConstraints / BundleInterpolator: built-in validation backend
//
// =============================================================================

pub mod i18n;
pub mod interceptor;
pub mod proxy;
pub mod validator;

pub use i18n::FixedLocalization;
pub use interceptor::{
    DispatchRegistry, ExecuteMethodInterceptor, ParametersInstantiator, RequestDispatcher,
};
pub use proxy::{DispatchProxifier, NameMarkerDetector};
pub use validator::{
    BundleInterpolator, Constraint, DeclaredConstraints, DescriptorNameProvider, MethodValidator,
};

// Re-exports from Kernel (minimal, only what callers typically need)
pub use trellis_kernel::controller::{
    ControllerInstance, ControllerMethod, MethodDescriptor, TypeDescriptor, TypeKind,
};
pub use trellis_kernel::error::{KernelError, KernelResult};
pub use trellis_kernel::i18n::{Locale, LocaleConfig, Localization};
pub use trellis_kernel::interceptor::{
    InterceptionError, Interceptor, InterceptorOrder, InterceptorStack,
};
pub use trellis_kernel::proxy::{
    ControllerProxy, InterceptionHandler, MethodDispatch, Proxifier, SuperCall,
};
pub use trellis_kernel::request::RequestContext;
pub use trellis_kernel::validation::{Messages, ValidationMessage};
