//! Error types for docker-hosts.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while keeping the hosts file in sync.
#[derive(Debug, Error)]
pub enum HostsError {
    /// Docker API error
    #[error("Docker API error: {0}")]
    Docker(#[from] bollard::errors::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The hosts file could not be read before taking a backup.
    #[error("failed to read {path} for backup: {source}")]
    BackupRead {
        /// File being backed up.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The backup copy could not be written.
    #[error("failed to write backup {path}: {source}")]
    BackupWrite {
        /// Backup destination.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The rendered hosts file could not be written.
    #[error("failed to write hosts file {path}: {source}")]
    Render {
        /// Target hosts file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Container inspection returned something unusable.
    #[error("failed to inspect container {id}: {reason}")]
    Inspect {
        /// Container identifier.
        id: String,
        /// What went wrong.
        reason: String,
    },

    /// The lifecycle event source closed; the registry can no longer be kept current.
    #[error("container event stream ended")]
    EventSourceClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_file_errors_name_the_path_and_keep_the_io_source() {
        let err = HostsError::Render {
            path: PathBuf::from("/etc/hosts"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            err.to_string(),
            "failed to write hosts file /etc/hosts: denied"
        );
        let source = err.source().and_then(|s| s.downcast_ref::<io::Error>());
        assert_eq!(
            source.map(io::Error::kind),
            Some(io::ErrorKind::PermissionDenied)
        );
    }
}
