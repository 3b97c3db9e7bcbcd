// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use batchflow::{BatchConfig, BatchesExt, CancellationToken};
use batchflow_test_utils::{collect_all, recv_timeout, test_channel};
use futures::{stream, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::spawn;
use tokio::time::{pause, sleep};

#[tokio::test]
async fn test_mixed_triggers_preserve_arrival_order() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, stream) = test_channel::<i32>();
    let mut out = stream.batches(5, Duration::from_millis(100), CancellationToken::new())?;

    // Act & Assert
    for i in 0..3 {
        tx.send(i)?;
    }
    assert_eq!(recv_timeout(&mut out, 150).await, Some(vec![0, 1, 2]));

    for i in 3..13 {
        tx.send(i)?;
    }
    assert_eq!(recv_timeout(&mut out, 10).await, Some(vec![3, 4, 5, 6, 7]));
    assert_eq!(recv_timeout(&mut out, 10).await, Some(vec![8, 9, 10, 11, 12]));

    drop(tx);
    assert_eq!(out.next().await, None);

    Ok(())
}

#[tokio::test]
async fn test_concatenated_batches_reproduce_input() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, stream) = test_channel::<u32>();
    let out = stream.batches(7, Duration::from_millis(50), CancellationToken::new())?;

    // Act
    spawn(async move {
        for i in 0..200u32 {
            tx.send(i).unwrap();
            if i % 11 == 0 {
                sleep(Duration::from_millis(u64::from(i % 80))).await;
            }
        }
    });

    // Assert
    let all = collect_all(out, 1_000_000).await;
    assert!(all.iter().all(|batch| !batch.is_empty() && batch.len() <= 7));
    assert_eq!(all.concat(), (0..200).collect::<Vec<_>>());

    Ok(())
}

#[tokio::test]
async fn test_slow_consumer_stops_input_pulls() -> anyhow::Result<()> {
    // Arrange
    pause();
    let pulled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulled);
    let input = stream::iter(0..1_000).inspect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let config = BatchConfig::new(2, Duration::from_secs(5))?;
    let mut out = input.batches_with(config, CancellationToken::new());

    // Act
    sleep(Duration::from_secs(60)).await;

    // Assert
    // One batch buffered in the output, one blocked in delivery
    assert_eq!(pulled.load(Ordering::SeqCst), 4);

    assert_eq!(out.next().await, Some(vec![0, 1]));
    sleep(Duration::from_millis(10)).await;
    assert_eq!(pulled.load(Ordering::SeqCst), 6);

    assert_eq!(out.next().await, Some(vec![2, 3]));
    assert_eq!(out.next().await, Some(vec![4, 5]));

    Ok(())
}
