// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use bufgate_core::StreamItem;
use futures::stream::StreamExt;
use futures::Stream;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

/// Asserts that the stream emits nothing within `timeout_ms` milliseconds.
///
/// Polling the stream here also drives any pending work inside it, so tests
/// use this between setup steps to force events to be processed in order.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected element emitted, expected no output.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Returns the next item from the stream, panicking if the stream ends or
/// stays silent for `timeout_ms` milliseconds.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    tokio::select! {
        item = stream.next() => {
            item.expect("stream ended while an item was expected")
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("no item emitted within {timeout_ms}ms");
        }
    }
}

/// Extracts the value from an item, panicking on `None` or an error item.
pub fn unwrap_value<T>(item: Option<StreamItem<T>>) -> T {
    match item {
        Some(StreamItem::Value(v)) => v,
        Some(StreamItem::Error(e)) => panic!("expected a value, got error: {e:?}"),
        None => panic!("expected a value, got end of stream"),
    }
}

/// Asserts that the next item equals `expected`, with a 500ms timeout.
pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: PartialEq + Debug,
{
    let actual = unwrap_value(Some(unwrap_stream(stream, 500).await));
    assert_eq!(actual, expected);
}

/// Asserts that the stream ends (yields `None`) within `timeout_ms`
/// milliseconds.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            assert!(item.is_none(), "expected end of stream, got {item:?}");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("stream did not end within {timeout_ms}ms");
        }
    }
}
