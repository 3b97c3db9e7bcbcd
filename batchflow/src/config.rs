// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Validated construction parameters for a batcher.
//!
//! A [`BatchConfig`] is fixed for the lifetime of one batcher. It is checked once,
//! when it is built, so the worker never has to deal with a degenerate size.

use batchflow_error::{BatchError, Result};
use core::fmt;
use core::num::NonZeroUsize;
use core::time::Duration;

/// Number of completed batches that may wait in the output stream by default.
pub const DEFAULT_CAPACITY: usize = NonZeroUsize::MIN.get();

/// Size, timeout and output capacity of a batcher.
///
/// # Example
///
/// ```
/// use batchflow::BatchConfig;
/// use std::time::Duration;
///
/// let config = BatchConfig::new(10, Duration::from_secs(5)).unwrap();
/// assert_eq!(config.size(), 10);
/// assert_eq!(config.capacity(), 1);
///
/// assert!(BatchConfig::new(0, Duration::from_secs(5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    size: NonZeroUsize,
    timeout: Duration,
    capacity: NonZeroUsize,
}

impl BatchConfig {
    /// Creates a configuration flushing at `size` items or after `timeout`.
    ///
    /// A `timeout` of zero is accepted: every cycle then flushes whatever items
    /// were already waiting on the input.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidSize`] when `size` is 0.
    pub fn new(size: usize, timeout: Duration) -> Result<Self> {
        let size = NonZeroUsize::new(size).ok_or(BatchError::invalid_size(size))?;

        Ok(Self {
            size,
            timeout,
            capacity: NonZeroUsize::MIN,
        })
    }

    /// Sets how many completed batches may be buffered before the worker blocks.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidCapacity`] when `capacity` is 0.
    pub fn with_capacity(self, capacity: usize) -> Result<Self> {
        let capacity =
            NonZeroUsize::new(capacity).ok_or(BatchError::invalid_capacity(capacity))?;
        Ok(Self { capacity, ..self })
    }

    /// Maximum number of items per batch.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size.get()
    }

    /// Maximum time a batch may accumulate before it is flushed.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Output stream buffer, in batches.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl fmt::Display for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={} timeout={:?} capacity={}",
            self.size, self.timeout, self.capacity
        )
    }
}
