// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the bufgate workspace.
//!
//! Provides channels that bridge imperative test setup (push values in) with
//! the stream-consuming operator API, plus assertion helpers that poll with
//! timeouts. For development and testing only.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod helpers;

use bufgate_core::StreamItem;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, expect_next_value, unwrap_stream, unwrap_value,
};

/// Creates a test channel that automatically wraps sent values in
/// `StreamItem::Value`.
///
/// Dropping the sender completes the stream.
///
/// # Example
///
/// ```rust
/// use bufgate_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx, mut stream) = test_channel::<i32>();
///
/// tx.send(42).unwrap();
/// assert_eq!(stream.next().await.unwrap().unwrap(), 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Sync + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` directly, so tests can
/// inject errors as well as values.
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Sync + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
