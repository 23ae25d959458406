//! Error types for roster and rule decoding.
//!
//! Validation itself never fails: problems in the data are reported as
//! [`Finding`](crate::models::Finding)s. These errors only cover turning
//! external JSON into the typed input model.

use thiserror::Error;

/// Errors that can occur while decoding validation input.
#[derive(Debug, Error)]
pub enum Error {
    /// The roster document is not valid JSON or has the wrong shape.
    #[error("failed to decode roster: {source}")]
    RosterDecode {
        #[source]
        source: serde_json::Error,
    },

    /// The rule document is not valid JSON or a rule lacks its envelope fields.
    #[error("failed to decode rules: {source}")]
    RulesDecode {
        #[source]
        source: serde_json::Error,
    },

    /// A rule declares a type this crate does not know.
    #[error("unknown rule type '{rule_type}' on rule '{id}'")]
    UnknownRuleType { id: String, rule_type: String },

    /// A rule's parameters do not match the shape its type requires.
    #[error("invalid parameters for {rule_type} rule '{id}': {source}")]
    RuleParameters {
        id: String,
        rule_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
