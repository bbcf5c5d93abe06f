//! Values that mostly shape the HTTP response: options, caching wrappers and exceptions.

use super::DomainValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Methods allowed on a resource, rendered as an `Allow` header with no body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub allowed_methods: Vec<String>,
}

/// A value whose response may be cached by HTTP intermediaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedValue {
    pub value: Box<DomainValue>,
    /// Location the cached value belongs to, exposed as `X-Location-Id`
    #[serde(default)]
    pub location_id: Option<u64>,
    #[serde(default = "default_max_age")]
    pub max_age: u32,
}

fn default_max_age() -> u32 {
    60
}

/// The closed set of repository exceptions surfaced to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExceptionKind {
    BadRequest,
    ContentFieldValidation,
    Unauthorized,
    Forbidden,
    NotFound,
    InvalidArgument,
    BadState,
    Generic,
    NotImplemented,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 9] = [
        ExceptionKind::BadRequest,
        ExceptionKind::ContentFieldValidation,
        ExceptionKind::Unauthorized,
        ExceptionKind::Forbidden,
        ExceptionKind::NotFound,
        ExceptionKind::InvalidArgument,
        ExceptionKind::BadState,
        ExceptionKind::Generic,
        ExceptionKind::NotImplemented,
    ];

    /// The more general kind a visitor lookup falls back to.
    #[must_use]
    pub fn parent(&self) -> Option<ExceptionKind> {
        match self {
            ExceptionKind::Generic => None,
            ExceptionKind::ContentFieldValidation => Some(ExceptionKind::BadRequest),
            _ => Some(ExceptionKind::Generic),
        }
    }
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An exception caught by a controller, to be rendered as an `ErrorMessage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestException {
    pub kind: ExceptionKind,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub trace: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub previous: Option<Box<RestException>>,
    /// Field identifier → validation messages (content field validation only)
    #[serde(default)]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl RestException {
    #[must_use]
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: None,
            file: None,
            line: None,
            previous: None,
            field_errors: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_previous(mut self, previous: RestException) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    #[must_use]
    pub fn with_field_error(mut self, field: &str, message: impl Into<String>) -> Self {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_parent_chain_ends_at_generic() {
        for kind in ExceptionKind::ALL {
            let mut current = kind;
            let mut steps = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                steps += 1;
                assert!(steps < 4);
            }
            assert_eq!(current, ExceptionKind::Generic);
        }
        assert_eq!(
            ExceptionKind::ContentFieldValidation.parent(),
            Some(ExceptionKind::BadRequest)
        );
    }
}
