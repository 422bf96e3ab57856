use thiserror::Error;

use crate::{actions::CliActionError, exit_codes::PayExitCode};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),
    #[error("{0}")]
    ActionError(#[from] CliActionError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> PayExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => PayExitCode::UsageError,
            CliError::ConfigurationError(_) => PayExitCode::ConfigError,
            CliError::ActionError(e) => e.exit_code(),
        }
    }
}
