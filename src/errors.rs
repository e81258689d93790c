//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Txnoise.
//! The Txnoise project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Txnoise Error Module
//!
//! This module defines the error types and utilities used throughout the
//! Txnoise library for consistent error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Configuration**: Unknown placement policies, unknown mutator or keymap
//!   names, malformed probability and weight vectors. Always carries the
//!   offending configuration key.
//! - **ResourceUnavailable**: A required external resource (for instance an
//!   embedding model file) is missing
//! - **Validation**: Input validation failures (field paths, record shapes)
//! - **Operator**: Failures in record operator implementations
//! - **Pipeline**: Pipeline orchestration failures
//! - **Io / Serde**: Filesystem and (de)serialization errors
//! - **Internal**: Unexpected internal failures
//!
//! Degenerate inputs (empty words, sentences without eligible tokens,
//! synonym substitution without combinations) are not errors: the
//! augmenters return unchanged or empty results for them.
//!
//! ## Usage
//!
//! ```rust
//! use txnoise::errors::{Result, TxError};
//!
//! fn pick_weight(weights: &[f64]) -> Result<f64> {
//!     weights
//!         .iter()
//!         .copied()
//!         .find(|w| *w > 0.0)
//!         .ok_or_else(|| TxError::configuration("weight", "all weights are zero"))
//! }
//! ```

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Txnoise.
pub type Result<T> = std::result::Result<T, TxError>;

/// Canonical error enumeration for Txnoise.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum TxError {
    /// Invalid augmentation settings, reported together with the key that
    /// holds the offending value.
    #[error("configuration error at '{key}': {message}")]
    Configuration { key: String, message: String },

    /// A required external resource could not be found or loaded.
    #[error("resource '{resource}' unavailable: {message}")]
    ResourceUnavailable { resource: String, message: String },

    /// Validation errors triggered by invalid parameters or inputs.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Any failure raised by an operator implementation.
    #[error("operator '{operator}' failed: {message}")]
    Operator { operator: String, message: String },

    /// Failures that occur while orchestrating a pipeline.
    #[error("pipeline error at stage '{stage}': {message}")]
    Pipeline { stage: String, message: String },

    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for TxError {
    fn from(err: io::Error) -> Self {
        TxError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TxError {
    fn from(err: serde_json::Error) -> Self {
        TxError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for TxError {
    fn from(err: serde_yaml::Error) -> Self {
        TxError::Serde(err.to_string())
    }
}

impl TxError {
    /// Helper to construct configuration errors for a given settings key.
    pub fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        TxError::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Helper to construct errors for missing external resources.
    pub fn resource(resource: impl Into<String>, message: impl Into<String>) -> Self {
        TxError::ResourceUnavailable {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        TxError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct operator errors.
    pub fn operator(name: impl Into<String>, message: impl Into<String>) -> Self {
        TxError::Operator {
            operator: name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct pipeline errors.
    pub fn pipeline(stage: impl Into<String>, message: impl Into<String>) -> Self {
        TxError::Pipeline {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        TxError::Internal(message.into())
    }

    /// Returns the configuration key for configuration errors.
    pub fn config_key(&self) -> Option<&str> {
        match self {
            TxError::Configuration { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}
