// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the batchflow stream batcher
//!
//! The batcher has no runtime failure modes of its own. The only checked failure
//! is construction-time validation, which is reported through [`BatchError`].
//! Everything else (input closure, cancellation, a consumer that went away) is a
//! shutdown path of the worker, not an error returned to the caller.
//!
//! # Examples
//!
//! ```
//! use batchflow_error::{BatchError, Result};
//!
//! fn validate(size: usize) -> Result<usize> {
//!     if size == 0 {
//!         return Err(BatchError::invalid_size(size));
//!     }
//!     Ok(size)
//! }
//!
//! assert!(validate(0).is_err());
//! ```

/// Root error type for batchflow operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// Batch size below one
    ///
    /// A zero size would make every cycle end immediately with an empty batch,
    /// so it is rejected instead of clamped.
    #[error("Invalid batch size: {size} (must be at least 1)")]
    InvalidSize {
        /// The rejected size
        size: usize,
    },

    /// Output capacity below one
    #[error("Invalid output capacity: {capacity} (must be at least 1)")]
    InvalidCapacity {
        /// The rejected capacity
        capacity: usize,
    },

    /// The consumer dropped the output stream
    ///
    /// Observed by the worker when a completed batch can no longer be delivered.
    #[error("Batch consumer closed the output stream")]
    ConsumerClosed,
}

impl BatchError {
    /// Create an invalid size error
    #[must_use]
    pub const fn invalid_size(size: usize) -> Self {
        Self::InvalidSize { size }
    }

    /// Create an invalid capacity error
    #[must_use]
    pub const fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Check if this error was raised while validating construction parameters
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidSize { .. } | Self::InvalidCapacity { .. })
    }
}

/// Specialized Result type for batchflow operations
pub type Result<T> = std::result::Result<T, BatchError>;
