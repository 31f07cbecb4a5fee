//! Crate-level error types for `trellis-kernel`.
//!
//! Provides a unified [`KernelError`] that composes errors from every
//! sub-module (proxy, interception, validation, dispatch) together with
//! [`error_stack::Report`] for rich, context-carrying error propagation
//! at the dispatcher boundary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trellis_kernel::error::{KernelError, KernelResult};
//! use error_stack::ResultExt;
//!
//! fn process() -> KernelResult<()> {
//!     // Errors from sub-modules convert automatically via From impls;
//!     // attach request context as they propagate.
//!     run_stack()
//!         .map_err(KernelError::from)
//!         .map_err(error_stack::Report::new)
//!         .attach_printable("request 7f9f…")?;
//!     Ok(())
//! }
//! ```

use crate::interceptor::InterceptionError;
use crate::proxy::{DispatchError, ProxyError};
use crate::validation::ValidationError;
use thiserror::Error;

/// Crate-level error type for `trellis-kernel`.
///
/// Wraps each sub-module's typed error via `#[from]` so that the `?`
/// operator converts them automatically.  Use
/// [`error_stack::Report<KernelError>`] (via [`KernelResult`]) to attach
/// human-readable context as the error propagates up the call stack.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KernelError {
    /// An error originating from the proxy engine.
    #[error("Proxy error: {0}")]
    Proxy(#[from] ProxyError),

    /// A failure during interceptor-stack execution.
    #[error("Interception error: {0}")]
    Interception(#[from] InterceptionError),

    /// A validation-collaborator failure.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A dispatch-adapter failure.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An internal / untyped error described by a message string.
    #[error("{0}")]
    Internal(String),
}

/// Convenience result alias using [`error_stack::Report`].
///
/// Equivalent to `Result<T, error_stack::Report<KernelError>>`.
pub type KernelResult<T> = Result<T, error_stack::Report<KernelError>>;
