//! Error types for Shipway
//!
//! Uses `thiserror` for library errors. Every variant is terminal to the
//! current invocation; nothing retries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Shipway operations
pub type ShipwayResult<T> = Result<T, ShipwayError>;

/// Main error type for Shipway operations
#[derive(Error, Debug)]
pub enum ShipwayError {
    /// Verb not in the recognized command set
    #[error("unknown command '{verb}' - run 'shipway --help' for the list of commands")]
    UnknownCommand { verb: String },

    /// Environment name not present in the loaded configuration
    #[error("unknown environment '{name}' - configured environments: {known}")]
    UnknownEnvironment { name: String, known: String },

    /// upload-vhost requires a local vhost artifact
    #[error(
        "could not locate vhost file {path} - download an existing one with \
         'shipway download-vhost {environment}' or create a template with \
         'shipway create-vhost {environment}'"
    )]
    LocalVhostMissing { path: PathBuf, environment: String },

    /// download-vhost requires the remote vhost to exist
    #[error("there is no vhost currently present in {path}")]
    RemoteVhostMissing { path: PathBuf },

    /// The main configuration carries none of the Passenger directives
    #[error("could not find Passenger configuration in {path}, has it ever been set up?")]
    ConfigurationNotManaged { path: PathBuf },

    /// A remote probe produced output we could not parse
    #[error("could not determine {what}")]
    DetectionFailed { what: String },

    /// Operator declined a confirmation gate
    #[error("aborted by operator")]
    Aborted,

    /// Remote command or transfer failure
    #[error("remote execution failed: {0}")]
    Remote(String),

    /// Configuration file unreadable or invalid
    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShipwayError {
    /// Operator aborts exit cleanly; everything else is a failure.
    pub fn is_abort(&self) -> bool {
        matches!(self, ShipwayError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_command() {
        let err = ShipwayError::UnknownCommand {
            verb: "explode".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown command 'explode' - run 'shipway --help' for the list of commands"
        );
    }

    #[test]
    fn test_error_display_local_vhost_missing_names_both_remedies() {
        let err = ShipwayError::LocalVhostMissing {
            path: PathBuf::from(".shipway/apache/staging.vhost"),
            environment: "staging".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("download-vhost staging"));
        assert!(msg.contains("create-vhost staging"));
    }

    #[test]
    fn test_error_display_detection_failed() {
        let err = ShipwayError::DetectionFailed {
            what: "the current Passenger version".to_string(),
        };
        assert_eq!(err.to_string(), "could not determine the current Passenger version");
    }

    #[test]
    fn test_abort_is_abort() {
        assert!(ShipwayError::Aborted.is_abort());
        assert!(!ShipwayError::Remote("ssh: boom".to_string()).is_abort());
    }
}
