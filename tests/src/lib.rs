//! Trellis Testing Framework
//!
//! Shared fixtures for exercising the proxy engine and the interceptor
//! stack end to end: a sample controller with its dispatch adapter, and
//! interception handlers that record or replace behavior.

pub mod controllers;
pub mod handlers;

pub use controllers::{UserController, UserControllerDispatch};
pub use handlers::{RecordingHandler, ReplacingHandler};
