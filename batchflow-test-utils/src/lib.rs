// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the batchflow workspace.
//!
//! Designed for development and testing only, not for production code.
//!
//! - `test_channel` - An unbounded sender paired with a stream, for feeding a batcher
//! - `helpers` - Timed receive and "nothing arrived" assertions

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{assert_no_recv, collect_all, recv_timeout};

/// Creates an unbounded test channel whose receiving half is a `Stream`.
///
/// Dropping the sender ends the stream, which is how tests close a batcher's input.
///
/// # Example
///
/// ```rust
/// use batchflow_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send(42).unwrap();
/// drop(tx);
///
/// assert_eq!(stream.next().await, Some(42));
/// assert_eq!(stream.next().await, None);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = T> + Send + Unpin + 'static,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
