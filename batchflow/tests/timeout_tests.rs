// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use batchflow::{BatchesExt, CancellationToken};
use batchflow_test_utils::{assert_no_recv, collect_all, recv_timeout, test_channel};
use futures::{stream, StreamExt};
use std::time::Duration;
use tokio::spawn;
use tokio::time::{pause, sleep};

#[tokio::test]
async fn test_timeout_flushes_partial_batch() -> anyhow::Result<()> {
    // Arrange
    pause();
    let cancel = CancellationToken::new();
    let (tx, stream) = test_channel::<i32>();
    let mut batches = stream.batches(10, Duration::from_secs(1), cancel.clone())?;

    // Act
    for i in 0..5 {
        tx.send(i)?;
    }

    // Assert
    assert_no_recv(&mut batches, 900).await;
    assert_eq!(recv_timeout(&mut batches, 200).await, Some(vec![0, 1, 2, 3, 4]));

    Ok(())
}

#[tokio::test]
async fn test_idle_cycles_emit_nothing() -> anyhow::Result<()> {
    // Arrange
    pause();
    let cancel = CancellationToken::new();
    let (tx, stream) = test_channel::<i32>();
    let mut batches = stream.batches(10, Duration::from_secs(1), cancel.clone())?;

    for i in 0..5 {
        tx.send(i)?;
    }
    assert_eq!(recv_timeout(&mut batches, 1_500).await, Some(vec![0, 1, 2, 3, 4]));

    // Act & Assert
    assert_no_recv(&mut batches, 10_000).await;

    cancel.cancel();
    assert_eq!(batches.next().await, None);
    drop(tx);

    Ok(())
}

#[tokio::test]
async fn test_slow_input_yields_single_item_batches() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, stream) = test_channel::<i32>();
    let batches = stream.batches(10, Duration::from_secs(1), CancellationToken::new())?;

    // Act
    spawn(async move {
        for i in 0..100 {
            tx.send(i).unwrap();
            sleep(Duration::from_secs(2)).await;
        }
    });

    // Assert
    let all = collect_all(batches, 1_000_000).await;
    let expected: Vec<Vec<i32>> = (0..100).map(|i| vec![i]).collect();
    assert_eq!(all, expected);

    Ok(())
}

#[tokio::test]
async fn test_deadline_is_rearmed_every_cycle() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, stream) = test_channel::<&str>();
    let mut batches = stream.batches(10, Duration::from_millis(100), CancellationToken::new())?;

    // Act & Assert
    tx.send("first")?;
    assert_eq!(recv_timeout(&mut batches, 150).await, Some(vec!["first"]));

    sleep(Duration::from_millis(330)).await;
    tx.send("second")?;
    tx.send("third")?;
    assert_eq!(
        recv_timeout(&mut batches, 150).await,
        Some(vec!["second", "third"])
    );

    drop(tx);
    assert_eq!(batches.next().await, None);

    Ok(())
}

#[tokio::test]
async fn test_zero_timeout_keeps_order_and_bounds() -> anyhow::Result<()> {
    // Arrange
    pause();
    let batches = stream::iter(0..20).batches(4, Duration::ZERO, CancellationToken::new())?;

    // Act
    let all = collect_all(batches, 10_000).await;

    // Assert
    assert!(all.iter().all(|batch| !batch.is_empty() && batch.len() <= 4));
    assert_eq!(all.concat(), (0..20).collect::<Vec<_>>());

    Ok(())
}
