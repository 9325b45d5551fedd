//! Error types for the Tierboard plugin.
//!
//! This module defines the centralized error type [`TierboardError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. The board core
//! itself never produces errors (stale references are no-ops); these variants cover
//! the I/O edges: catalog lookups, theme loading, configuration and exports.

use thiserror::Error;

/// The main error type for Tierboard plugin operations.
///
/// # Examples
///
/// ```
/// use tierboard::domain::TierboardError;
///
/// fn fetch() -> Result<(), TierboardError> {
///     Err(TierboardError::Catalog("status 401".to_string()))
/// }
/// assert!(fetch().is_err());
/// ```
#[derive(Debug, Error)]
pub enum TierboardError {
    /// Catalog lookup failed (transport error or non-success status).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A catalog payload could not be decoded.
    ///
    /// Wraps `serde_json` failures so callers can degrade to an empty result set.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing a board export failed.
    #[error("Export error: {0}")]
    Export(String),
}

/// A specialized `Result` type for Tierboard operations.
pub type Result<T> = std::result::Result<T, TierboardError>;
