//! Built-in [`Localization`] sources.

use trellis_kernel::i18n::{Locale, Localization};

/// Localization source returning a fixed, optional locale — the
/// application-level "configured locale" in most deployments.
pub struct FixedLocalization {
    locale: Option<Locale>,
}

impl FixedLocalization {
    /// Always reports the given locale.
    pub fn of(locale: Locale) -> Self {
        Self {
            locale: Some(locale),
        }
    }

    /// Reports no configured locale; callers fall back to their
    /// [`LocaleConfig`](trellis_kernel::i18n::LocaleConfig) default.
    pub fn unset() -> Self {
        Self { locale: None }
    }
}

impl Localization for FixedLocalization {
    fn current_locale(&self) -> Option<Locale> {
        self.locale.clone()
    }
}
