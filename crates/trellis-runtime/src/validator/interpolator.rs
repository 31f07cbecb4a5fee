//! Bundle-backed message interpolation.

use std::collections::HashMap;
use trellis_kernel::i18n::Locale;
use trellis_kernel::validation::{ConstraintViolation, MessageInterpolator, ValidationError};

/// Interpolates `{key}` message templates against per-locale bundles,
/// then substitutes `{attribute}` placeholders from the violation's
/// attribute map.
///
/// Lookup order: exact locale tag, then primary language subtag
/// (`pt-BR` falls back to `pt`).  Unresolvable keys keep the template
/// text unchanged, so missing bundles degrade visibly rather than
/// failing the request.
pub struct BundleInterpolator {
    // locale tag → message key → template
    bundles: HashMap<String, HashMap<String, String>>,
}

impl BundleInterpolator {
    /// Interpolator preloaded with the English templates for the
    /// built-in constraint keys.
    pub fn new() -> Self {
        Self::empty().with_bundle(
            Locale::new("en"),
            [
                ("trellis.constraint.not_null", "must not be null"),
                ("trellis.constraint.not_blank", "must not be blank"),
                (
                    "trellis.constraint.min",
                    "must be greater than or equal to {value}",
                ),
                (
                    "trellis.constraint.max",
                    "must be less than or equal to {value}",
                ),
                (
                    "trellis.constraint.size",
                    "size must be between {min} and {max}",
                ),
            ],
        )
    }

    /// Interpolator with no bundles at all.
    pub fn empty() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }

    /// Builder: merge entries into the bundle for `locale`.
    pub fn with_bundle<K, V>(
        mut self,
        locale: Locale,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let bundle = self.bundles.entry(locale.tag().to_string()).or_default();
        for (key, template) in entries {
            bundle.insert(key.into(), template.into());
        }
        self
    }

    fn lookup(&self, locale: &Locale, key: &str) -> Option<&str> {
        if let Some(template) = self.bundles.get(locale.tag()).and_then(|b| b.get(key)) {
            return Some(template.as_str());
        }
        self.bundles
            .get(locale.language())
            .and_then(|b| b.get(key))
            .map(String::as_str)
    }
}

impl Default for BundleInterpolator {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageInterpolator for BundleInterpolator {
    fn interpolate(
        &self,
        template: &str,
        violation: &ConstraintViolation,
        locale: &Locale,
    ) -> Result<String, ValidationError> {
        // A fully braced template is a bundle key; anything else is
        // literal text.
        let resolved = template
            .strip_prefix('{')
            .and_then(|t| t.strip_suffix('}'))
            .and_then(|key| self.lookup(locale, key))
            .unwrap_or(template);

        let mut text = resolved.to_string();
        for (key, value) in &violation.attributes {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            text = text.replace(&format!("{{{key}}}"), &rendered);
        }
        Ok(text)
    }
}
