// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::batcher::Batcher;
use crate::batches::Batches;
use crate::config::BatchConfig;
use batchflow_error::Result;
use core::time::Duration;
use futures::Stream;
use tokio_util::sync::CancellationToken;

/// Extension trait providing the [`batches`](BatchesExt::batches) operator.
///
/// Implemented for every `Send + 'static` stream.
pub trait BatchesExt<T>: Stream<Item = T> + Sized + Send + 'static
where
    T: Send + 'static,
{
    /// Groups items into batches of at most `size`, flushed at least every `timeout`.
    ///
    /// See [`batches`](crate::batches()) for the full contract.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidSize`](crate::BatchError::InvalidSize) when `size` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use batchflow::BatchesExt;
    /// use futures::{stream, StreamExt};
    /// use std::time::Duration;
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let out: Vec<Vec<char>> = stream::iter("abcde".chars())
    ///     .batches(2, Duration::from_secs(1), CancellationToken::new())
    ///     .unwrap()
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(out, vec![vec!['a', 'b'], vec!['c', 'd'], vec!['e']]);
    /// # }
    /// ```
    fn batches(
        self,
        size: usize,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<Batches<T>>;

    /// Groups items according to an already validated `config`.
    fn batches_with(self, config: BatchConfig, cancel: CancellationToken) -> Batches<T>;
}

impl<S, T> BatchesExt<T> for S
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    fn batches(
        self,
        size: usize,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<Batches<T>> {
        let config = BatchConfig::new(size, timeout)?;
        Ok(self.batches_with(config, cancel))
    }

    fn batches_with(self, config: BatchConfig, cancel: CancellationToken) -> Batches<T> {
        Batcher::new(config).spawn(self, cancel)
    }
}
