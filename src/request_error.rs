//! Errors raised while gathering, validating and submitting a request body.

use thiserror::Error;

use crate::payments_api::ApiError;

#[derive(Debug, Error)]
pub enum RequestError {
    /// Structurally inconsistent input, such as no routing method at all.
    #[error("{0}")]
    UserInput(String),

    /// A value does not have the shape its flag requires.
    #[error("--{flag} must be {expected}")]
    Format { flag: String, expected: String },

    /// A `--field` entry is not of the form `path=value`.
    #[error("invalid --field entry '{entry}': expected path=value with a non-empty path")]
    OverrideParse { entry: String },

    #[error("failed to fetch validation schema: {0}")]
    SchemaFetch(#[source] ApiError),

    /// Every missing field and rejected value reported by the schema.
    #[error("request failed schema validation:\n{}", .problems.join("\n"))]
    SchemaValidation { problems: Vec<String> },
}

impl RequestError {
    pub fn user_input(message: impl Into<String>) -> RequestError {
        RequestError::UserInput(message.into())
    }

    pub fn format(flag: &str, expected: impl Into<String>) -> RequestError {
        RequestError::Format {
            flag: flag.to_string(),
            expected: expected.into(),
        }
    }
}
