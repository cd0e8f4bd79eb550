//! Error types for the rsapl library.

use thiserror::Error;

/// Result type alias for rsapl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while compiling formats and parsing log lines.
#[derive(Error, Debug)]
pub enum Error {
    /// A `%` sequence in the format string is not a known directive.
    ///
    /// Carries the raw offending text, e.g. `%Z` or `%{`.
    #[error("unknown format string: {directive}")]
    InvalidFormat { directive: String },

    /// A log line does not match the compiled format.
    #[error("cannot parse log line: {line}")]
    UnparsableLine { line: String },

    /// The assembled pattern was rejected by the regex engine.
    #[error("regex error: {source}")]
    Regex {
        #[from]
        source: regex::Error,
    },

    /// Error when a field is not found in an entry.
    #[error("field '{field}' not found")]
    FieldNotFound { field: String },

    /// Error when a field value cannot be parsed as the requested type.
    #[error("field '{field}' with value '{value}' cannot be parsed as {target_type}: {source}")]
    FieldParseError {
        field: String,
        value: String,
        target_type: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error when a log format nickname is not defined in an Apache configuration.
    #[error("log format '{nickname}' not found in apache configuration")]
    LogFormatNotFound { nickname: String },

    /// Error when an environment variable holding a format is missing or not unicode.
    #[error("environment variable '{name}': {source}")]
    EnvVar {
        name: String,
        #[source]
        source: std::env::VarError,
    },

    /// IO error when reading an Apache configuration.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new invalid format error.
    pub fn invalid_format(directive: impl Into<String>) -> Self {
        Self::InvalidFormat {
            directive: directive.into(),
        }
    }

    /// Create a new unparsable line error.
    pub fn unparsable_line(line: impl Into<String>) -> Self {
        Self::UnparsableLine { line: line.into() }
    }

    /// Create a new field not found error.
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    /// Create a new field parse error.
    pub fn field_parse_error(
        field: impl Into<String>,
        value: impl Into<String>,
        target_type: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::FieldParseError {
            field: field.into(),
            value: value.into(),
            target_type: target_type.into(),
            source: Box::new(source),
        }
    }

    /// Create a new log format not found error.
    pub fn log_format_not_found(nickname: impl Into<String>) -> Self {
        Self::LogFormatNotFound {
            nickname: nickname.into(),
        }
    }

    /// Create a new environment variable error.
    pub fn env_var(name: impl Into<String>, source: std::env::VarError) -> Self {
        Self::EnvVar {
            name: name.into(),
            source,
        }
    }
}
