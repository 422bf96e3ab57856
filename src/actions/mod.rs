use thiserror::Error;

use crate::{
    auth::AuthError, exit_codes::PayExitCode, payments_api::ApiError,
    request_error::RequestError,
};

pub mod auth;
pub mod config;
pub mod resources;
pub mod utils;

#[derive(Debug, Error)]
pub enum CliActionError {
    #[error("{0}")]
    RequestError(#[from] RequestError),

    #[error("{0}")]
    ApiError(#[from] ApiError),

    #[error("{0}")]
    AuthError(#[from] AuthError),

    #[error("{0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),

    #[error("{0}")]
    FormattingError(#[from] crate::format::FormattingError),

    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
}

fn api_exit_code(error: &ApiError) -> PayExitCode {
    match error {
        ApiError::HttpError(e) if e.status().is_none() => PayExitCode::NetworkError,
        ApiError::Status { status, .. } if *status == 401 || *status == 403 => {
            PayExitCode::AuthError
        }
        _ => PayExitCode::ApiError,
    }
}

impl CliActionError {
    pub fn exit_code(&self) -> PayExitCode {
        match self {
            CliActionError::RequestError(e) => match e {
                RequestError::UserInput(_)
                | RequestError::Format { .. }
                | RequestError::OverrideParse { .. } => PayExitCode::UsageError,
                RequestError::SchemaValidation { .. } => PayExitCode::DataError,
                RequestError::SchemaFetch(e) => api_exit_code(e),
            },
            CliActionError::ApiError(e) => api_exit_code(e),
            CliActionError::AuthError(AuthError::Transport(e)) => match api_exit_code(e) {
                PayExitCode::NetworkError => PayExitCode::NetworkError,
                _ => PayExitCode::AuthError,
            },
            CliActionError::AuthError(_) => PayExitCode::AuthError,
            CliActionError::ConfigurationError(_) => PayExitCode::ConfigError,
            CliActionError::FormattingError(_) | CliActionError::JsonError(_) => {
                PayExitCode::DataError
            }
            CliActionError::MissingRequiredArgument(_) => PayExitCode::UsageError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_map_to_usage_or_data() {
        let err: CliActionError = RequestError::format("routing-number", "exactly 9 digits").into();
        assert_eq!(err.exit_code(), PayExitCode::UsageError);

        let err: CliActionError = RequestError::SchemaValidation { problems: vec![] }.into();
        assert_eq!(err.exit_code(), PayExitCode::DataError);
    }

    #[test]
    fn test_api_status_maps_to_api_error() {
        let err: CliActionError = ApiError::Status {
            status: 400,
            body: "{}".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), PayExitCode::ApiError);

        let err: CliActionError = ApiError::Status {
            status: 401,
            body: "{}".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), PayExitCode::AuthError);
    }
}
