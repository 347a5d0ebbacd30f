// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject.
//!
//! A [`BufgateSubject`] broadcasts each [`StreamItem<T>`] to all active
//! subscribers. It is the push entry point into a bufgate pipeline and the
//! natural way to hand the same closing notifier to several buffering
//! windows: each window subscribes independently, one `next` closes them all.
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers do not receive past items.
//! - **Unbounded**: no backpressure; `send` never blocks.
//! - **Thread-safe**: cheap to clone, all clones share the same state.
//! - **Error/close**: an error is broadcast to every subscriber and
//!   terminates the subject.
//!
//! ## Example
//!
//! ```
//! use bufgate_core::{BufgateSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let subject = BufgateSubject::<i32>::new();
//! let mut stream = subject.subscribe().unwrap();
//!
//! subject.next(1).unwrap();
//! subject.next(2).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(2)));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::{BufgateError, StreamItem, SubjectError};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Boxed subscriber stream handed out by [`BufgateSubject::subscribe`].
pub type SubjectStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + Sync + 'static>>;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
}

// Sync-capable wrapper around the unbounded receiver backing a subscription.
struct SubscriberStream<T> {
    receiver: Arc<Mutex<UnboundedReceiver<StreamItem<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> SubscriberStream<T> {
    fn boxed(receiver: UnboundedReceiver<StreamItem<T>>) -> SubjectStream<T> {
        Box::pin(Self {
            receiver: Arc::new(Mutex::new(receiver)),
        })
    }
}

impl<T: Clone + Send + Sync + 'static> Stream for SubscriberStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut guard = self.receiver.lock();
        Pin::new(&mut *guard).poll_next(cx)
    }
}

/// A hot, unbounded subject that broadcasts items to all current subscribers.
pub struct BufgateSubject<T: Clone + Send + Sync + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> BufgateSubject<T> {
    /// Creates a new open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe and receive every item sent from now on.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        Ok(SubscriberStream::boxed(rx))
    }

    /// Send an item to all active subscribers.
    ///
    /// Subscribers that have been dropped are pruned here.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        Ok(())
    }

    /// Send a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Broadcast a stream error to all subscribers and terminate the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject was already closed.
    pub fn error(&self, err: BufgateError) -> Result<(), SubjectError> {
        let result = self.send(StreamItem::Error(err));
        self.close();
        result
    }

    /// Closes the subject, completing all subscriber streams.
    ///
    /// After closing, `send`, `next`, `error` and `subscribe` fail with
    /// [`SubjectError::Closed`]. Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the number of currently active subscribers.
    ///
    /// Dropped subscribers are counted until the next `send` prunes them.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for BufgateSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for BufgateSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
