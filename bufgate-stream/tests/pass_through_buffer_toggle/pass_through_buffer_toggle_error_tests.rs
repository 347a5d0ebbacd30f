// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error propagation tests for the `pass_through_buffer_toggle` operator.
//!
//! Errors discard what completion flushes: whichever input faults, open
//! buffers are dropped unflushed and the error is the last item downstream.

use bufgate_core::{BufgateError, BufgateSubject, StreamItem};
use bufgate_stream::PassThroughBufferToggleExt;
use bufgate_test_utils::{
    assert_no_element_emitted, assert_stream_ended, test_channel, test_channel_with_errors,
    unwrap_stream,
};
use futures::Stream;
use std::pin::Pin;

#[tokio::test]
async fn test_source_error_propagates_when_no_buffer_open() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel_with_errors::<i32>();
    let (_openings_tx, openings) = test_channel::<bool>();
    let closings = BufgateSubject::<bool>::new();

    let gate = closings.clone();
    let mut result =
        source.pass_through_buffer_toggle(openings, move |_: bool| Ok(Some(gate.subscribe()?)));

    // Act
    source_tx.send(StreamItem::Value(1))?;
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Value(v) if v == vec![1]
    ));

    source_tx.send(StreamItem::Error(BufgateError::stream_error("boom")))?;

    // Assert - the error is the only further item
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_source_error_discards_open_buffers() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel_with_errors::<i32>();
    let (openings_tx, openings) = test_channel::<bool>();
    let closings = BufgateSubject::<bool>::new();

    let gate = closings.clone();
    let mut result =
        source.pass_through_buffer_toggle(openings, move |_: bool| Ok(Some(gate.subscribe()?)));

    // Act - buffer some values, then fault the source
    openings_tx.send(true)?;
    assert_no_element_emitted(&mut result, 50).await;

    source_tx.send(StreamItem::Value(1))?;
    source_tx.send(StreamItem::Value(2))?;
    assert_no_element_emitted(&mut result, 50).await;

    source_tx.send(StreamItem::Error(BufgateError::stream_error(
        "source failed",
    )))?;

    // Assert - no flush for the buffered values, just the error
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_openings_error_aborts_operator() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel::<i32>();
    let (openings_tx, openings) = test_channel_with_errors::<bool>();
    let closings = BufgateSubject::<bool>::new();

    let gate = closings.clone();
    let mut result =
        source.pass_through_buffer_toggle(openings, move |_: bool| Ok(Some(gate.subscribe()?)));

    // Act
    openings_tx.send(StreamItem::Value(true))?;
    assert_no_element_emitted(&mut result, 50).await;

    source_tx.send(1)?;
    assert_no_element_emitted(&mut result, 50).await;

    openings_tx.send(StreamItem::Error(BufgateError::stream_error(
        "openings failed",
    )))?;

    // Assert
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_closing_notifier_error_aborts_operator() -> anyhow::Result<()> {
    // Arrange
    let (source_tx, source) = test_channel::<i32>();
    let (openings_tx, openings) = test_channel::<bool>();
    let closings = BufgateSubject::<bool>::new();

    let gate = closings.clone();
    let mut result =
        source.pass_through_buffer_toggle(openings, move |_: bool| Ok(Some(gate.subscribe()?)));

    // Act
    openings_tx.send(true)?;
    assert_no_element_emitted(&mut result, 50).await;

    source_tx.send(1)?;
    assert_no_element_emitted(&mut result, 50).await;

    closings.error(BufgateError::stream_error("notifier failed"))?;

    // Assert - window-scoped it is not: the whole operator goes down
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_error_abandons_flush_queued_in_same_poll() -> anyhow::Result<()> {
    type BoxedNotifier = Pin<Box<dyn Stream<Item = StreamItem<bool>> + Send + Sync>>;

    // Arrange - two buffers with separate notifiers
    let (source_tx, source) = test_channel::<i32>();
    let (openings_tx, openings) = test_channel::<bool>();
    let (first_close_tx, first_closing) = test_channel::<bool>();
    let (second_close_tx, second_closing) = test_channel_with_errors::<bool>();

    let mut notifiers: Vec<BoxedNotifier> = vec![Box::pin(second_closing), Box::pin(first_closing)];
    let mut result =
        source.pass_through_buffer_toggle(openings, move |_: bool| Ok(notifiers.pop()));

    openings_tx.send(true)?;
    assert_no_element_emitted(&mut result, 50).await;

    source_tx.send(1)?;
    source_tx.send(2)?;
    assert_no_element_emitted(&mut result, 50).await;

    openings_tx.send(true)?;
    assert_no_element_emitted(&mut result, 50).await;

    // Act - the first buffer closes and the second's notifier errors before
    // the operator is polled again, so the close's flush is still queued when
    // the error is processed
    first_close_tx.send(true)?;
    second_close_tx.send(StreamItem::Error(BufgateError::stream_error(
        "notifier failed",
    )))?;

    // Assert - the queued flush is abandoned, the error is the only item
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}

#[tokio::test]
async fn test_selector_failure_aborts_operator() -> anyhow::Result<()> {
    // Arrange - `true` openings make the selector fail
    let (source_tx, source) = test_channel::<i32>();
    let (openings_tx, openings) = test_channel::<bool>();
    let closings = BufgateSubject::<bool>::new();

    let gate = closings.clone();
    let mut result = source.pass_through_buffer_toggle(openings, move |fail: bool| {
        if fail {
            Err(BufgateError::stream_error("closing selector failed"))
        } else {
            Ok(Some(gate.subscribe()?))
        }
    });

    // Act - a healthy buffer first, so the abort also discards it
    openings_tx.send(false)?;
    assert_no_element_emitted(&mut result, 50).await;

    source_tx.send(1)?;
    source_tx.send(2)?;
    assert_no_element_emitted(&mut result, 50).await;

    openings_tx.send(true)?;

    // Assert - buffered values are lost, the error is the last item
    assert!(matches!(
        unwrap_stream(&mut result, 500).await,
        StreamItem::Error(_)
    ));
    assert_stream_ended(&mut result, 100).await;

    Ok(())
}
