//! Proxy-engine error taxonomy.
//!
//! [`ProxyCreationError`] means synthesis itself failed; fatal for that
//! `proxify` call.  [`ProxyInvocationError`] means the *original* method
//! body failed during a super-call, so callers can tell business-logic
//! failure apart from proxy-machinery failure.

use super::dispatch::DispatchError;
use thiserror::Error;

/// Synthesis of a proxy failed.  Not retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProxyCreationError {
    /// The raw type is a sealed class and admits no subclass.
    #[error("cannot subclass sealed type '{0}'")]
    SealedType(String),

    /// Constructing the proxy target failed.
    #[error("failed to construct proxy target for '{0}'")]
    Construction(String, #[source] DispatchError),
}

/// The original method body failed while a super-call was executing it.
#[derive(Debug, Error)]
#[error("original method body failed")]
pub struct ProxyInvocationError {
    #[from]
    source: DispatchError,
}

impl ProxyInvocationError {
    /// The underlying dispatch failure.
    pub fn cause(&self) -> &DispatchError {
        &self.source
    }
}

/// Any failure surfaced by a proxy call path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProxyError {
    #[error(transparent)]
    Creation(#[from] ProxyCreationError),

    #[error(transparent)]
    Invocation(#[from] ProxyInvocationError),

    /// The called method is not declared on the proxied type.
    #[error("method '{0}' is not declared on proxied type '{1}'")]
    UnknownMethod(String, String),

    /// The interception handler itself failed.
    #[error("interception handler failed: {0}")]
    Handler(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_error_preserves_the_cause() {
        let body_failure = DispatchError::MethodFailed(
            "save".to_string(),
            "boom".to_string().into(),
        );
        let err = ProxyInvocationError::from(body_failure);
        assert!(matches!(err.cause(), DispatchError::MethodFailed(name, _) if name == "save"));
    }

    #[test]
    fn creation_and_invocation_stay_distinguishable() {
        let creation: ProxyError = ProxyCreationError::SealedType("app.Sealed".into()).into();
        let invocation: ProxyError = ProxyInvocationError::from(DispatchError::UnknownMethod(
            "save".to_string(),
        ))
        .into();

        assert!(matches!(creation, ProxyError::Creation(_)));
        assert!(matches!(invocation, ProxyError::Invocation(_)));
    }
}
