// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Size- and time-bounded batching for async streams.
//!
//! A batcher reads items one at a time from an input stream and re-emits them as
//! `Vec<T>` groups. A group is flushed when it reaches the configured size, when the
//! configured timeout elapses, or when the input ends or the cancellation token fires,
//! whichever comes first.
//!
//! # Overview
//!
//! - **[`batches()`]** - One-call construction: input, size, timeout, cancellation token
//! - **[`BatchesExt`]** - Extension trait for `.batches(size, timeout, cancel)`
//! - **[`BatchConfig`]** - Validated size, timeout and output capacity
//! - **[`Batcher`]** - Spawns the background worker for a config
//! - **[`Batches`]** - The output stream of batches
//!
//! # Guarantees
//!
//! - No batch is empty and no batch holds more than `size` items.
//! - Items keep their arrival order, within and across batches.
//! - The output ends after at most one more (partial) batch once the input ends or
//!   the token fires.
//!
//! Items racing with cancellation may be lost; see the [`batcher`] module docs.
//! Callers cannot tell from the output alone whether it ended because the input was
//! exhausted or because of cancellation; check the token for that.
//!
//! # Features
//!
//! - `tracing` (default) - Emit worker lifecycle and flush events through `tracing`
//!
//! # Example
//!
//! ```rust
//! use batchflow::BatchesExt;
//! use futures::StreamExt;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//! use tokio_stream::wrappers::UnboundedReceiverStream;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), batchflow::BatchError> {
//! let (tx, rx) = mpsc::unbounded_channel();
//!
//! // Up to 10 items, or after 5 seconds
//! let mut batches = UnboundedReceiverStream::new(rx)
//!     .batches(10, Duration::from_secs(5), CancellationToken::new())?;
//!
//! tokio::spawn(async move {
//!     for i in 0..100 {
//!         tx.send(i).unwrap();
//!     }
//! });
//!
//! while let Some(batch) = batches.next().await {
//!     assert_eq!(batch.len(), 10);
//! }
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

mod logging;

pub mod batcher;
mod batches;
pub mod config;
mod ext;

pub use batcher::{batches, Batcher};
pub use batches::Batches;
pub use config::BatchConfig;
pub use ext::BatchesExt;

pub use batchflow_error::{BatchError, Result};
pub use tokio_util::sync::CancellationToken;
