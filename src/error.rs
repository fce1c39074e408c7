//! Configuration error types for rule decoding and translation.

use thiserror::Error;

/// Errors raised while decoding or translating a monitoring rule.
///
/// Every variant is a configuration problem local to one rule; nothing here
/// is ever passed on to the downtime executable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The rule root is not a mapping
    #[error("Rule must be a mapping, found {found}")]
    NotAMapping { found: String },

    /// `display_service_name` is absent or empty
    #[error("Missing required key 'display_service_name'")]
    MissingServiceName,

    /// `connect_to` does not have exactly five elements
    #[error("'connect_to' must have 5 elements (host, port, site, verify_ssl, no_proxy), found {arity}")]
    InvalidConnectTo { arity: usize },

    /// A key holds a value of the wrong shape
    #[error("Invalid value for '{key}': expected {expected}, found {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// `dependency_detection` names a mode the executable does not know
    #[error("Unknown dependency detection mode '{0}' (expected fully_automated, search_parent_child or specify_targets)")]
    UnknownDetectionMode(String),

    /// A `specify_targets` entry is malformed
    #[error("Invalid target #{index}: {reason}")]
    InvalidTarget { index: usize, reason: String },

    /// A target field would be split apart by the executable's `--target` parser
    #[error("Target #{index}: {field} must not contain ','")]
    TargetFieldContainsComma { index: usize, field: &'static str },
}

impl ConfigError {
    pub(crate) fn invalid_type(
        key: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        ConfigError::InvalidType {
            key: key.into(),
            expected,
            found: describe_value(found),
        }
    }
}

/// Short human-readable description of a JSON value's shape
pub(crate) fn describe_value(value: &serde_json::Value) -> String {
    use serde_json::Value;

    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(items) => format!("sequence of {} elements", items.len()),
        Value::Object(_) => "mapping".to_string(),
    }
}
