// File:    error.rs
// Author:  apezoo
// Date:    2026-10-16
//
// Description: Error types for widget construction, configuration loading, and the storage port.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Error types shared across the crate.

use std::io;
use thiserror::Error;

/// Errors raised while building a widget or loading its configuration.
#[derive(Debug, Error)]
pub enum OtpError {
    /// The configured cell count was zero.
    #[error("invalid length {length}: an OTP input needs at least one cell")]
    InvalidLength {
        /// The rejected length.
        length: usize,
    },
    /// `allowed_pattern` is not a valid regular expression.
    #[error("invalid allowed_pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),
    /// The configuration file is not valid JSON for this schema.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`crate::storage::KeyValueStorage`] backend.
///
/// The resend timer never propagates these; it logs them and keeps its in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The backing file holds something other than a JSON string map.
    #[error("storage contents are corrupt: {0}")]
    Json(#[from] serde_json::Error),
    /// Storage is disabled or denied in this environment.
    #[error("storage is unavailable")]
    Unavailable,
}
