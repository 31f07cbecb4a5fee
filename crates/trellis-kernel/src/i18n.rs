//! Locale model for validation-message interpolation.
//!
//! The fallback chain is explicit configuration, not implicit global
//! state: a [`Localization`] implementation supplies the currently
//! configured locale (nullable), and [`LocaleConfig`] names the
//! process-wide default used when none is configured.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language tag such as `en`, `pt-BR`, or `de-CH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The full tag, e.g. `pt-BR`.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `pt` for `pt-BR`.
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-wide locale defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Used whenever [`Localization::current_locale`] reports none.
    pub default_locale: Locale,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::new("en"),
        }
    }
}

/// Source of the currently configured locale.
///
/// Request- or application-scoped; returns `None` when nothing is
/// configured, in which case callers fall back to
/// [`LocaleConfig::default_locale`].
pub trait Localization: Send + Sync {
    fn current_locale(&self) -> Option<Locale>;
}
