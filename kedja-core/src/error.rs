//! Error types for Kedja.
//!
//! Dispatch itself has no error path: a malformed frame maps to the
//! flavor's abort verdict and an exhausted chain maps to accept. Errors
//! only arise on the composer side, when turning external input into a
//! dispatcher configuration.

use thiserror::Error;

/// Errors from parsing verdict values supplied by external composers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The raw value does not name a verdict in this flavor's vocabulary.
    #[error("invalid verdict value: {0}")]
    InvalidValue(i32),

    /// The string does not name a verdict in this flavor's vocabulary.
    #[error("invalid verdict name: {0}")]
    InvalidName(String),
}

/// Configuration blob metadata mismatches detected before stage binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatError {
    /// The blob does not carry the expected magic marker.
    #[error("dispatcher magic mismatch: expected {expected:#04x}, found {found:#04x}")]
    Magic {
        /// Magic value this build expects.
        expected: u8,
        /// Magic value found in the blob.
        found: u8,
    },

    /// The blob was produced for a different dispatcher protocol version.
    #[error("dispatcher version mismatch: expected {expected}, found {found}")]
    Version {
        /// Protocol version this build expects.
        expected: u8,
        /// Protocol version found in the blob.
        found: u8,
    },
}
