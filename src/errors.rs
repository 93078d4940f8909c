//! Error Types
//!
//! This module defines the error types used throughout the loader.
//!
//! # Overview
//!
//! Every failure is fatal for the load that raised it. [`LoadError`] sorts
//! them into four families:
//! - [`LoadError::Format`]: bad GLB framing, bad JSON, bad version strings
//! - [`LoadError::UnsupportedFeature`]: valid glTF the loader refuses to handle
//! - [`LoadError::Reference`]: a foreign-key index that does not resolve
//! - [`LoadError::Transport`]: fetch or image decode failures
//!
//! Non-fatal conditions (newer minor version, unsupported optional extension)
//! are reported through `log::warn!` and never surface here.
//!
//! # Usage
//!
//! ```rust,ignore
//! use myth_loader::errors::{LoadError, Result};
//!
//! fn check(index: usize, len: usize) -> Result<()> {
//!     if index >= len {
//!         return Err(LoadError::reference("node", index, len));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The error type returned by every fallible loader operation.
#[derive(Error, Debug)]
pub enum LoadError {
    // ========================================================================
    // Format Errors
    // ========================================================================
    /// The input is not well-formed glTF / GLB.
    #[error("Format error: {0}")]
    Format(String),

    /// The JSON document could not be parsed into the glTF schema.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data URI carried an invalid base64 payload.
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    // ========================================================================
    // Unsupported Features
    // ========================================================================
    /// Valid glTF that this loader does not implement (skins, morph targets,
    /// sparse accessors, animations, required extensions).
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    // ========================================================================
    // Reference Errors
    // ========================================================================
    /// A foreign-key index is out of range, or the node hierarchy is not a tree.
    #[error("Invalid reference: {context} (index: {index})")]
    Reference {
        /// What was being resolved
        context: String,
        /// The offending index
        index: usize,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fetch or decode performed by a collaborator failed.
    #[error("Transport error while loading '{uri}': {message}")]
    Transport {
        /// The resource being loaded
        uri: String,
        /// Collaborator-provided description
        message: String,
    },
}

impl LoadError {
    #[must_use]
    pub fn format(msg: impl Into<String>) -> Self {
        LoadError::Format(msg.into())
    }

    #[must_use]
    pub fn unsupported(msg: impl Into<String>) -> Self {
        LoadError::UnsupportedFeature(msg.into())
    }

    /// An out-of-bounds index into a collection of `len` elements.
    #[must_use]
    pub fn reference(kind: &str, index: usize, len: usize) -> Self {
        LoadError::Reference {
            context: format!("{kind} index out of bounds (len {len})"),
            index,
        }
    }

    #[must_use]
    pub fn transport(uri: impl Into<String>, message: impl ToString) -> Self {
        LoadError::Transport {
            uri: uri.into(),
            message: message.to_string(),
        }
    }

    /// `true` for the format family (framing, JSON, base64).
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format(_) | LoadError::Json(_) | LoadError::Base64(_))
    }

    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, LoadError::UnsupportedFeature(_))
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, LoadError::Reference { .. })
    }

    /// `true` for the transport family (I/O, fetch, decode).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, LoadError::Io(_) | LoadError::Transport { .. })
    }
}

impl From<image::ImageError> for LoadError {
    fn from(err: image::ImageError) -> Self {
        LoadError::Transport {
            uri: "<image>".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for LoadError {
    fn from(err: tokio::task::JoinError) -> Self {
        LoadError::Transport {
            uri: "<task>".to_string(),
            message: err.to_string(),
        }
    }
}

/// Alias for `Result<T, LoadError>`.
pub type Result<T> = std::result::Result<T, LoadError>;
