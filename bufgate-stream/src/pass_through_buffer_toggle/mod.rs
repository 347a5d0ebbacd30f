// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pass-through toggle buffering.
//!
//! Works like a toggle buffer, except that while no buffering window is open
//! values pass straight through the operator, emitted as vectors of length 1.
//!
//! This makes it usable as a buffered gate: open the gate to collect values,
//! close it to flush everything collected since opening as one vector, after
//! which fresh values are emitted as singletons again the moment they arrive.
//! Several windows may be open at once; overlapping windows accumulate the
//! same source values independently and flush separately.
//!
//! # Behavior
//!
//! - Source value with no window open: emitted immediately as `vec![value]`.
//! - Source value with N windows open: appended to all N buffers, nothing
//!   emitted.
//! - Openings value: the closing selector is invoked with it. `Ok(Some(ns))`
//!   opens a window closed by `ns`'s first emission or completion; `Ok(None)`
//!   declines to open one; `Err` aborts the operator.
//! - Window close: the window's whole buffer is flushed as one vector, even
//!   if empty.
//! - Source completion: remaining windows flush in the order they opened,
//!   then the stream ends.
//! - Source error (or an error from the openings stream or any closing
//!   notifier): remaining windows are discarded without flushing and the
//!   error is the only further item.
//! - The openings stream completing on its own has no effect.

mod implementation;

pub use implementation::pass_through_buffer_toggle_impl;

use bufgate_core::into_stream::IntoStream;
use bufgate_core::{Result, StreamItem};
use futures::Stream;

/// Extension trait providing the
/// [`pass_through_buffer_toggle`](PassThroughBufferToggleExt::pass_through_buffer_toggle)
/// operator.
///
/// Implemented for every stream of [`StreamItem<T>`] with cloneable values.
pub trait PassThroughBufferToggleExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + Sync + 'static,
{
    /// Buffers source values into toggle-controlled windows, passing them
    /// through as singletons while no window is open.
    ///
    /// # Arguments
    ///
    /// * `openings` - Stream whose values request new buffering windows.
    /// * `closing_selector` - Invoked with each opening value; returns the
    ///   stream whose first emission or completion closes that window,
    ///   `Ok(None)` to decline opening one, or `Err` to abort the operator.
    ///
    /// # Returns
    ///
    /// A stream of `Vec<T>`: singletons while no window is open, one vector
    /// per closed window otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufgate_stream::prelude::*;
    /// use bufgate_core::BufgateSubject;
    /// use bufgate_test_utils::{assert_no_element_emitted, test_channel};
    /// use futures::StreamExt;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let (source_tx, source) = test_channel::<i32>();
    /// let (openings_tx, openings) = test_channel::<()>();
    /// let closings = BufgateSubject::<()>::new();
    ///
    /// let gate = closings.clone();
    /// let mut buffered = source.pass_through_buffer_toggle(openings, move |_| {
    ///     Ok(Some(gate.subscribe()?))
    /// });
    ///
    /// // No window open: values pass through as singletons.
    /// source_tx.send(1).unwrap();
    /// assert_eq!(buffered.next().await.unwrap().unwrap(), vec![1]);
    ///
    /// // Open a window, collect, close: one flush with everything collected.
    /// openings_tx.send(()).unwrap();
    /// assert_no_element_emitted(&mut buffered, 50).await;
    /// source_tx.send(2).unwrap();
    /// source_tx.send(3).unwrap();
    /// assert_no_element_emitted(&mut buffered, 50).await;
    /// closings.next(()).unwrap();
    /// assert_eq!(buffered.next().await.unwrap().unwrap(), vec![2, 3]);
    /// # }
    /// ```
    fn pass_through_buffer_toggle<O, C, IS, CS, F>(
        self,
        openings: IS,
        closing_selector: F,
    ) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Sync + Unpin
    where
        O: Send + Sync + 'static,
        C: Send + Sync + 'static,
        IS: IntoStream<Item = StreamItem<O>>,
        IS::Stream: Send + Sync + 'static,
        CS: Stream<Item = StreamItem<C>> + Send + Sync + 'static,
        F: FnMut(O) -> Result<Option<CS>> + Send + Sync + Unpin + 'static;
}

impl<S, T> PassThroughBufferToggleExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn pass_through_buffer_toggle<O, C, IS, CS, F>(
        self,
        openings: IS,
        closing_selector: F,
    ) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Sync + Unpin
    where
        O: Send + Sync + 'static,
        C: Send + Sync + 'static,
        IS: IntoStream<Item = StreamItem<O>>,
        IS::Stream: Send + Sync + 'static,
        CS: Stream<Item = StreamItem<C>> + Send + Sync + 'static,
        F: FnMut(O) -> Result<Option<CS>> + Send + Sync + Unpin + 'static,
    {
        pass_through_buffer_toggle_impl(self, openings, closing_selector)
    }
}
