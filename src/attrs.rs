//! Attribute sync: the declared attribute table, coercion, and the
//! external declarative surface.
//!
//! The widget observes exactly three attributes. The table below is the
//! single source of truth: the set of observed names is derived from it, and
//! the change dispatcher in [`crate::slideshow`] looks coercions up here
//! rather than hand-rolling per-attribute logic.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Attribute table
// ---------------------------------------------------------------------------

/// How a raw attribute string is coerced into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Parse as `f64`.
    Number,
    /// Keep verbatim.
    Text,
}

/// The fixed attribute table: `name -> coercion`.
///
/// - `timeout`: seconds, stored internally x1000 as milliseconds
/// - `animation`: opaque pass-through
/// - `slide`: routed through the slide selector, which normalizes it
pub const ATTRIBUTES: &[(&str, Coercion)] = &[
    ("timeout", Coercion::Number),
    ("animation", Coercion::Text),
    ("slide", Coercion::Number),
];

/// The attribute names the widget observes, derived from [`ATTRIBUTES`].
pub fn observed_attributes() -> Vec<&'static str> {
    ATTRIBUTES.iter().map(|(name, _)| *name).collect()
}

/// Look up the coercion for an attribute name. `None` for unobserved names.
pub fn coercion_for(name: &str) -> Option<Coercion> {
    ATTRIBUTES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Errors from attribute coercion.
#[derive(Debug, thiserror::Error)]
pub enum AttrError {
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("invalid value for {attribute}: {message}")]
    InvalidValue { attribute: String, message: String },
}

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl Coercion {
    /// Apply this coercion to a raw attribute string.
    pub fn apply(self, attribute: &str, raw: &str) -> Result<AttrValue, AttrError> {
        match self {
            Coercion::Number => raw
                .trim()
                .parse::<f64>()
                .map(AttrValue::Number)
                .map_err(|_| AttrError::InvalidValue {
                    attribute: attribute.to_string(),
                    message: format!("expected a number, got '{raw}'"),
                }),
            Coercion::Text => Ok(AttrValue::Text(raw.to_string())),
        }
    }
}

/// Format a number for reflection back to an attribute.
///
/// Integral values print without a decimal point (`5`, not `5.0`) so the
/// reflected form round-trips through [`Coercion::Number`] unchanged.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ---------------------------------------------------------------------------
// AttrMap
// ---------------------------------------------------------------------------

/// The external declarative surface: an ordered map of attribute strings.
///
/// This is the reflection target: after any internal property write that
/// reflects, introspecting this map shows the true (normalized) state.
#[derive(Debug, Clone, Default)]
pub struct AttrMap {
    entries: BTreeMap<String, String>,
}

impl AttrMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Set an attribute, returning the previous value if any.
    pub fn set(&mut self, name: &str, value: &str) -> Option<String> {
        self.entries.insert(name.to_string(), value.to_string())
    }

    /// Remove an attribute, returning the previous value if any.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Whether the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Attribute names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of attributes present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
