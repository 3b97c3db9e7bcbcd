// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background worker that turns a stream of items into a stream of batches.
//!
//! Each collection cycle arms a fresh deadline and then waits for the first of:
//!
//! - **cancellation** - stop the batcher
//! - **next item** - append it; end the cycle once the batch holds `size` items
//! - **end of input** - stop the batcher
//! - **deadline** - end the cycle, whatever the batch holds
//! - **consumer gone** - stop the batcher; nobody can receive further batches
//!
//! A non-empty batch is delivered at the end of every cycle, including the last one.
//!
//! # Loss window
//!
//! Cancellation is checked before the input on every wait. An item that becomes
//! ready at the same moment the token fires is not received and does not appear in
//! any batch. Items already collected when the token is observed are delivered as one
//! final partial batch, on a best-effort basis: a consumer that stopped draining keeps
//! that delivery (and the worker) blocked.

use crate::batches::Batches;
use crate::config::BatchConfig;
use crate::logging::{log_debug, log_trace, log_warn};
use batchflow_error::{BatchError, Result};
use core::pin::{pin, Pin};
use core::time::Duration;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Why a collection cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flush {
    Full,
    Deadline,
    InputClosed,
    Cancelled,
    ConsumerClosed,
}

impl Flush {
    /// After a terminal flush the worker closes the output and exits.
    const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::InputClosed | Self::Cancelled | Self::ConsumerClosed
        )
    }
}

/// Groups items from an input stream into bounded batches.
///
/// # Example
///
/// ```
/// use batchflow::{BatchConfig, Batcher};
/// use futures::{stream, StreamExt};
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() {
/// let config = BatchConfig::new(3, Duration::from_secs(5)).unwrap();
/// let batches = Batcher::new(config).spawn(stream::iter(1..=7), CancellationToken::new());
///
/// let all: Vec<Vec<i32>> = batches.collect().await;
/// assert_eq!(all, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Batcher {
    config: BatchConfig,
}

impl Batcher {
    #[must_use]
    pub const fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Spawns the worker on the current Tokio runtime and returns its output.
    ///
    /// The worker owns `input` until it stops. It stops when `input` ends, when
    /// `cancel` fires, or as soon as the returned [`Batches`] is dropped or closed,
    /// even while the input is idle. The output is closed exactly once, after the
    /// last delivery.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<S, T>(self, input: S, cancel: CancellationToken) -> Batches<T>
    where
        S: Stream<Item = T> + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(self.config.capacity());
        tokio::spawn(self.run(input, sender, cancel));
        Batches::new(receiver)
    }

    async fn run<S, T>(self, input: S, sender: mpsc::Sender<Vec<T>>, cancel: CancellationToken)
    where
        S: Stream<Item = T>,
    {
        let mut input = pin!(input);
        let mut emitted = 0usize;

        log_debug!("batcher started: {}", self.config);

        loop {
            let (batch, flush) = self.collect(input.as_mut(), &cancel, &sender).await;

            if flush == Flush::ConsumerClosed {
                log_warn!(
                    "batcher stopped after {} batches: {} ({} collected items dropped)",
                    emitted,
                    BatchError::ConsumerClosed,
                    batch.len()
                );
                return;
            }

            if !batch.is_empty() {
                log_trace!("flushing batch: trigger={:?} len={}", flush, batch.len());
                if let Err(err) = deliver(&sender, batch).await {
                    log_warn!("batcher stopped after {} batches: {}", emitted, err);
                    return;
                }
                emitted += 1;
            }

            if flush.is_terminal() {
                log_debug!("batcher stopped: reason={:?} batches={}", flush, emitted);
                return;
            }
        }
    }

    /// Runs one collection cycle.
    async fn collect<S, T>(
        &self,
        mut input: Pin<&mut S>,
        cancel: &CancellationToken,
        sender: &mpsc::Sender<Vec<T>>,
    ) -> (Vec<T>, Flush)
    where
        S: Stream<Item = T>,
    {
        let size = self.config.size();
        let mut batch = Vec::new();
        let mut deadline = pin!(sleep(self.config.timeout()));

        let flush = loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break Flush::Cancelled,
                () = sender.closed() => break Flush::ConsumerClosed,
                item = input.next() => match item {
                    Some(item) => {
                        batch.push(item);
                        if batch.len() == size {
                            break Flush::Full;
                        }
                    }
                    None => break Flush::InputClosed,
                },
                () = &mut deadline => break Flush::Deadline,
            }
        };

        (batch, flush)
    }
}

async fn deliver<T>(sender: &mpsc::Sender<Vec<T>>, batch: Vec<T>) -> Result<()> {
    sender.send(batch).await.map_err(|_| BatchError::ConsumerClosed)
}

/// Batches `input` into groups of at most `size` items, flushed at least every `timeout`.
///
/// This is the one-call form of [`BatchConfig::new`] followed by [`Batcher::spawn`].
/// Validation runs first, so an invalid `size` spawns nothing.
///
/// # Errors
///
/// Returns [`BatchError::InvalidSize`] when `size` is 0.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime.
///
/// # Example
///
/// ```
/// use batchflow::batches;
/// use futures::{stream, StreamExt};
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), batchflow::BatchError> {
/// let cancel = CancellationToken::new();
/// let mut out = batches(stream::iter(0..4), 2, Duration::from_secs(1), cancel)?;
///
/// assert_eq!(out.next().await, Some(vec![0, 1]));
/// assert_eq!(out.next().await, Some(vec![2, 3]));
/// assert_eq!(out.next().await, None);
/// # Ok(())
/// # }
/// ```
pub fn batches<S, T>(
    input: S,
    size: usize,
    timeout: Duration,
    cancel: CancellationToken,
) -> Result<Batches<T>>
where
    S: Stream<Item = T> + Send + 'static,
    T: Send + 'static,
{
    let config = BatchConfig::new(size, timeout)?;
    Ok(Batcher::new(config).spawn(input, cancel))
}
