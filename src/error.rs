//! # Error Handling
//!
//! This module defines the centralized error type for `gcc-options`. It uses
//! `thiserror` to build a single `Error` enum covering every failure the
//! library can report.
//!
//! Note that the merge core itself never fails: malformed defines are
//! ignored, packages without a compiler block are skipped and unresolvable
//! paths fall back to project-relative resolution. Errors only come from the
//! shell around it:
//!
//! - Run configuration parsing (`.gcc-options.yaml`).
//! - Reading and decoding `package.json` manifests.
//! - Lock poisoning on a shared session.
//! - Wrapped I/O, JSON and YAML errors.

use thiserror::Error;

/// Main error type for gcc-options operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `.gcc-options.yaml` run configuration.
    ///
    /// This error includes the specific parsing issue and optionally a hint
    /// about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A package manifest could not be read or decoded.
    #[error("Package manifest error: {path} - {message}")]
    Manifest { path: String, message: String },

    /// A mutex guarding shared run state has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
