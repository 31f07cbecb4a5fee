//! Validation messages and the request-scoped message collector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A localized, category-addressed validation message.
///
/// Created once per violation and never mutated afterwards; the category
/// is the dotted path with the resolved parameter name, e.g. `save.age`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationMessage {
    text: String,
    category: String,
}

impl ValidationMessage {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Interpolated, human-readable message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Dotted identifier of the offending field or parameter.
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.text)
    }
}

/// Ordered, append-only, request-scoped sink of validation messages.
///
/// Later pipeline stages and view rendering read the collected messages;
/// the owning request context clears the collector between requests.
#[derive(Debug, Default)]
pub struct Messages {
    entries: Vec<ValidationMessage>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message.  Messages are never removed individually.
    pub fn add(&mut self, message: ValidationMessage) {
        self.entries.push(message);
    }

    /// All collected messages, in append order.
    pub fn all(&self) -> &[ValidationMessage] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all messages; called between requests.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
