/*!
 * Error types for the xlifftab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while converting between XLIFF documents and tables
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Input bytes are not well-formed XML or lack the expected
    /// `xliff.file.body.trans-unit` structure
    #[error("malformed document: {reason}")]
    MalformedDocument {
        /// What was wrong, including the byte offset or element context
        reason: String,
    },

    /// A required input buffer was not supplied by the caller
    #[error("missing required input: {what}")]
    MissingInput {
        /// Which input was missing
        what: &'static str,
    },

    /// The translation table could not be read
    #[error("invalid translation table: {reason}")]
    Table {
        /// What was wrong with the table
        reason: String,
    },

    /// The rebuilt document could not be serialized
    #[error("failed to serialize document: {reason}")]
    Serialize {
        /// Underlying writer error
        reason: String,
    },
}

impl ConvertError {
    /// Structural failure with element context only
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument { reason: reason.into() }
    }

    /// Parser-level failure carrying the byte offset reported by the XML reader
    pub fn malformed_at(reason: impl std::fmt::Display, offset: u64) -> Self {
        Self::MalformedDocument {
            reason: format!("{reason} (byte offset {offset})"),
        }
    }

    pub fn table(reason: impl std::fmt::Display) -> Self {
        Self::Table { reason: reason.to_string() }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document/table conversion
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
