//! Error types for the padscan CLI

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Protocol error: {0}")]
    ProtocolError(#[from] padscan_protocol::ProtocolError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ConfigNotFound(_) => 2,
            CliError::InvalidConfiguration(_)
            | CliError::JsonError(_)
            | CliError::YamlError(_)
            | CliError::ProtocolError(_) => 4,
            CliError::IoError(_) => 1,
        }
    }

    /// Variant name, reported as the error `type` in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::ConfigNotFound(_) => "ConfigNotFound",
            CliError::InvalidConfiguration(_) => "InvalidConfiguration",
            CliError::IoError(_) => "IoError",
            CliError::JsonError(_) => "JsonError",
            CliError::YamlError(_) => "YamlError",
            CliError::ProtocolError(_) => "ProtocolError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padscan_protocol::ProtocolError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::ConfigNotFound("x".into()).exit_code(), 2);
        assert_eq!(CliError::InvalidConfiguration("x".into()).exit_code(), 4);
        assert_eq!(
            CliError::from(ProtocolError::InvalidSocket(9)).exit_code(),
            4
        );
        assert_eq!(
            CliError::from(std::io::Error::other("broken pipe")).exit_code(),
            1
        );
    }

    #[test]
    fn test_kind_names_variant() {
        assert_eq!(CliError::ConfigNotFound("x".into()).kind(), "ConfigNotFound");
        assert_eq!(
            CliError::from(ProtocolError::InvalidSocket(9)).kind(),
            "ProtocolError"
        );
    }
}
