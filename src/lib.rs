//! ARGOS Importer Library
//!
//! A Rust library for converting ARGOS satellite wildlife-tracking exports
//! into point feature collections ready for mapping.
//!
//! This library provides tools for:
//! - Parsing the two-line ARGOS "Date :" / location record pattern
//! - Converting hemisphere-suffixed coordinates into signed decimal degrees
//! - Walking an export directory file by file, skipping the README notice
//! - Writing point features to GeoJSON, Parquet or CSV containers
//! - Counting accepted and skipped records without changing the silent
//!   best-effort ingestion policy

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod argos_parser;
        pub mod directory_processor;
        pub mod feature_sink;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Observation, PointFeature};
pub use config::{ImportConfig, SpatialReference};

use std::path::PathBuf;

/// Result type alias for the ARGOS importer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for import operations
///
/// Record-level problems (short lines, bad coordinates, a header on the last
/// line) never surface here; they are counted and skipped by the parser. These
/// variants cover the failures that stop a run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be opened or read
    #[error("Failed to read input file '{}'", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input directory missing or not a directory
    #[error("Input directory not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Output container could not be created or written
    #[error("Feature sink error: {message}")]
    Sink {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file read error for a specific input file
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
            source: None,
        }
    }

    /// Create a sink error wrapping a backend failure
    pub fn sink_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Sink {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::sink_with_source("Columnar write failed", error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::sink_with_source("JSON serialization failed", error)
    }
}
