//! Exit codes for the gta CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0: success
//! - 10-19: user/input errors (recoverable by fixing arguments, config or data)
//! - 20-29: internal and environment errors

use gta_common::{Error, ErrorCategory};

/// Exit codes for gta operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    // ========================================================================
    // User / Input Errors (10-19)
    // ========================================================================
    /// Invalid arguments
    ArgsError = 10,

    /// Configuration rejected or alphabet lookup failed
    ConfigError = 11,

    /// Malformed learner output or graph file
    ParseError = 12,

    /// Invalid sequence data
    DataError = 13,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19, resolvable by the user.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&self.as_i32())
    }

    /// Codes 20 and above.
    pub fn is_internal_error(self) -> bool {
        self.as_i32() >= 20
    }

    pub fn is_error(self) -> bool {
        self.as_i32() >= 10
    }

    /// Stable name for JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::ParseError => "ERR_PARSE",
            ExitCode::DataError => "ERR_DATA",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Parse => ExitCode::ParseError,
            ErrorCategory::Data => ExitCode::DataError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(!ExitCode::Clean.is_error());
        for code in [
            ExitCode::ArgsError,
            ExitCode::ConfigError,
            ExitCode::ParseError,
            ExitCode::DataError,
        ] {
            assert!(code.is_user_error(), "{code}");
            assert!(!code.is_internal_error());
        }
        assert!(ExitCode::IoError.is_internal_error());
        assert!(ExitCode::InternalError.is_error());
    }

    #[test]
    fn test_error_mapping() {
        let parse = Error::parse(3, "x", "bad");
        assert_eq!(ExitCode::from(&parse), ExitCode::ParseError);

        let data = Error::LengthMismatch {
            predictions: 1,
            observations: 2,
        };
        assert_eq!(ExitCode::from(&data), ExitCode::DataError);

        let config = Error::UnknownCategory {
            symbol: "9".into(),
            line_no: 1,
        };
        assert_eq!(ExitCode::from(&config), ExitCode::ConfigError);

        let io = Error::io("/nope", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(ExitCode::from(&io), ExitCode::IoError);
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitCode::ParseError.to_string(), "ERR_PARSE (12)");
        assert_eq!(i32::from(ExitCode::IoError), 21);
    }
}
