// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Waits up to `timeout_ms` for the next element.
///
/// Returns `None` if the stream ended or nothing arrived in time.
pub async fn recv_timeout<S, T>(stream: &mut S, timeout_ms: u64) -> Option<T>
where
    S: Stream<Item = T> + Unpin,
{
    timeout(Duration::from_millis(timeout_ms), stream.next())
        .await
        .ok()
        .flatten()
}

/// Panics if the stream yields an element or ends within `timeout_ms`.
pub async fn assert_no_recv<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: std::fmt::Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected emission, expected no output: {item:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Drains the stream until it ends, panicking if that takes longer than `timeout_ms`.
pub async fn collect_all<S, T>(stream: S, timeout_ms: u64) -> Vec<T>
where
    S: Stream<Item = T>,
{
    timeout(Duration::from_millis(timeout_ms), stream.collect::<Vec<T>>())
        .await
        .unwrap_or_else(|_| panic!("stream did not end within {timeout_ms}ms"))
}
