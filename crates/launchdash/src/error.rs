//! Error types for launchdash.
//!
//! This module defines all error types used throughout the launchdash crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launchdash operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// Failed to open the dataset file.
    #[error("failed to open dataset at {path}: {source}")]
    DatasetOpen {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A dataset row could not be read or parsed.
    #[error("malformed dataset row at line {line}: {message}")]
    DatasetParse {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of what went wrong.
        message: String,
    },

    /// A required column is absent from the dataset header.
    #[error("dataset is missing required column '{column}'")]
    DatasetMissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },

    /// The dataset contains no records.
    #[error("dataset contains no launch records")]
    DatasetEmpty,

    /// A record violates a data invariant.
    #[error("invalid launch record: {message}")]
    InvalidRecord {
        /// Description of the violated invariant.
        message: String,
    },

    // === Selection Errors ===
    /// A real launch site uses the reserved "all sites" value.
    #[error("launch site '{site}' collides with the reserved all-sites value")]
    SentinelCollision {
        /// The offending site identifier.
        site: String,
    },

    /// The selected site is not in the catalog.
    #[error("unknown launch site: {site}")]
    UnknownSite {
        /// The requested site identifier.
        site: String,
    },

    /// The payload range is inverted or not finite.
    #[error("invalid payload range [{min_kg}, {max_kg}]")]
    InvalidRange {
        /// Requested lower bound.
        min_kg: f64,
        /// Requested upper bound.
        max_kg: f64,
    },

    /// The request's query string could not be decoded.
    #[error("invalid query: {message}")]
    InvalidQuery {
        /// Description of the decoding failure.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the HTTP listener.
    #[error("failed to bind {addr}: {source}")]
    ServerBind {
        /// Address the server tried to bind.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for launchdash operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a dataset parse error for the given line.
    #[must_use]
    pub fn dataset_parse(line: u64, message: impl Into<String>) -> Self {
        Self::DatasetParse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create an unknown site error.
    #[must_use]
    pub fn unknown_site(site: impl Into<String>) -> Self {
        Self::UnknownSite { site: site.into() }
    }

    /// Create an invalid query error.
    #[must_use]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Check if this error was caused by bad user input rather than the
    /// dataset or environment.
    #[must_use]
    pub fn is_selection_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownSite { .. } | Self::InvalidRange { .. } | Self::InvalidQuery { .. }
        )
    }

    /// Check if this error happened while loading the dataset.
    #[must_use]
    pub fn is_dataset_error(&self) -> bool {
        matches!(
            self,
            Self::DatasetOpen { .. }
                | Self::DatasetParse { .. }
                | Self::DatasetMissingColumn { .. }
                | Self::DatasetEmpty
                | Self::InvalidRecord { .. }
                | Self::SentinelCollision { .. }
        )
    }

    /// Short machine-readable code, used in API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DatasetOpen { .. } => "dataset_open",
            Self::DatasetParse { .. } => "dataset_parse",
            Self::DatasetMissingColumn { .. } => "dataset_missing_column",
            Self::DatasetEmpty => "dataset_empty",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::SentinelCollision { .. } => "sentinel_collision",
            Self::UnknownSite { .. } => "unknown_site",
            Self::InvalidRange { .. } => "invalid_range",
            Self::InvalidQuery { .. } => "invalid_query",
            Self::ConfigLoad(_) => "config_load",
            Self::ConfigValidation { .. } => "config_validation",
            Self::ServerBind { .. } => "server_bind",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DatasetEmpty;
        assert_eq!(err.to_string(), "dataset contains no launch records");

        let err = Error::unknown_site("LC-99");
        assert_eq!(err.to_string(), "unknown launch site: LC-99");
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_dataset_parse_error_display() {
        let err = Error::dataset_parse(7, "column 'class' is not 0 or 1");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("class"));
    }

    #[test]
    fn test_missing_column_display() {
        let err = Error::DatasetMissingColumn {
            column: "Launch Site",
        };
        assert!(err.to_string().contains("Launch Site"));
    }

    #[test]
    fn test_invalid_range_display() {
        let err = Error::InvalidRange {
            min_kg: 5000.0,
            max_kg: 1000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("5000"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn test_sentinel_collision_display() {
        let err = Error::SentinelCollision {
            site: "ALL".to_string(),
        };
        assert!(err.to_string().contains("'ALL'"));
    }

    #[test]
    fn test_is_selection_error() {
        assert!(Error::unknown_site("X").is_selection_error());
        assert!(Error::InvalidRange {
            min_kg: 1.0,
            max_kg: 0.0
        }
        .is_selection_error());
        assert!(!Error::DatasetEmpty.is_selection_error());
    }

    #[test]
    fn test_is_dataset_error() {
        assert!(Error::DatasetEmpty.is_dataset_error());
        assert!(Error::invalid_record("negative payload").is_dataset_error());
        assert!(!Error::unknown_site("X").is_dataset_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::DatasetEmpty.code(), "dataset_empty");
        assert_eq!(Error::unknown_site("X").code(), "unknown_site");
        assert_eq!(Error::internal("x").code(), "internal");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_dataset_open_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::DatasetOpen {
            path: PathBuf::from("/nonexistent/path/launches.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/nonexistent/path/launches.csv"));
        assert!(msg.contains("no such file"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_query_is_selection_error() {
        let err = Error::invalid_query("min: invalid float literal");
        assert!(err.is_selection_error());
        assert!(!err.is_dataset_error());
        assert_eq!(err.code(), "invalid_query");
        assert!(err.to_string().contains("invalid float literal"));
    }

    #[test]
    fn test_server_bind_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = Error::ServerBind {
            addr: "127.0.0.1:8050".to_string(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:8050"));
        assert!(msg.contains("address in use"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "port must be non-zero".to_string(),
        };
        assert!(err.to_string().contains("port must be non-zero"));
    }
}
