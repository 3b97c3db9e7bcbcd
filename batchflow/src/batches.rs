// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use tokio::sync::mpsc;

/// Output side of a batcher.
///
/// Yields completed batches in the order their collection cycles finished and ends
/// once the worker has stopped. Batches are never empty and never longer than the
/// configured size.
///
/// The consumer must keep draining it: a batch that cannot be delivered blocks the
/// worker, which in turn stops pulling from the input.
///
/// Dropping `Batches` (or calling [`close`](Batches::close)) releases the worker the
/// next time it tries to deliver a batch.
#[derive(Debug)]
pub struct Batches<T> {
    receiver: mpsc::Receiver<Vec<T>>,
}

impl<T> Batches<T> {
    pub(crate) const fn new(receiver: mpsc::Receiver<Vec<T>>) -> Self {
        Self { receiver }
    }

    /// Receives the next batch, or `None` once the worker has closed the output.
    pub async fn recv(&mut self) -> Option<Vec<T>> {
        self.receiver.recv().await
    }

    /// Closes the output from the consumer side.
    ///
    /// Batches already buffered can still be received. The worker stops when it
    /// next attempts a delivery.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

impl<T> Stream for Batches<T> {
    type Item = Vec<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
