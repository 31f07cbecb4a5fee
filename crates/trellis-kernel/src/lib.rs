// controller module
pub mod controller;
pub use controller::*;

// interceptor module
pub mod interceptor;
pub use interceptor::*;

// proxy module
pub mod proxy;
pub use proxy::*;

// validation module
pub mod validation;
pub use validation::*;

// i18n module
pub mod i18n;
pub use i18n::*;

// request module
pub mod request;
pub use request::*;

// error module
pub mod error;
