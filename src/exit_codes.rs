//! Exit codes for the paycli application
//!
//! Scripts can tell bad input apart from remote failures by the process
//! exit status.

/// Exit codes for paycli
///
/// These codes follow the BSD sysexits.h conventions where possible:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: Custom application-specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayExitCode {
    /// Success (0) - Command completed successfully
    Success = 0,

    /// Command line usage error (64) - Inconsistent or malformed flags
    UsageError = 64,

    /// Data format error (65) - Request rejected by the validation schema
    DataError = 65,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = 70,

    /// Configuration error (78) - Application configuration issue
    ConfigError = 78,

    /// Authentication error (100) - Missing or rejected credentials
    AuthError = 100,

    /// Network error (101) - Connection or communication issues
    NetworkError = 101,

    /// API error (102) - Remote API returned an error
    ApiError = 102,
}

impl PayExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            PayExitCode::Success => "Success",
            PayExitCode::UsageError => "Command line usage error",
            PayExitCode::DataError => "Data format error",
            PayExitCode::SoftwareError => "Internal software error",
            PayExitCode::ConfigError => "Configuration error",
            PayExitCode::AuthError => "Authentication error",
            PayExitCode::NetworkError => "Network communication error",
            PayExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<PayExitCode> for i32 {
    fn from(code: PayExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(PayExitCode::UsageError.code(), 64);
        assert_eq!(i32::from(PayExitCode::ApiError), 102);
        assert_eq!(PayExitCode::ConfigError.message(), "Configuration error");
    }
}
