// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging;
use bufgate_core::into_stream::IntoStream;
use bufgate_core::{BufgateError, StreamItem};
use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// One open buffering window: the values collected so far plus the owned
/// closing notifier. Dropping the context is the window's teardown; the
/// notifier cannot outlive it.
struct BufferContext<T, CS> {
    buffer: Vec<T>,
    closing: Pin<Box<CS>>,
}

impl<T, CS> BufferContext<T, CS> {
    fn new(closing: CS) -> Self {
        Self {
            buffer: Vec::new(),
            closing: Box::pin(closing),
        }
    }
}

/// Engine behind the `pass_through_buffer_toggle` operator.
///
/// A hand-written `poll_next` state machine. Each poll pass drains closing
/// notifiers first (so a window closed by an earlier event flushes before any
/// further input is consumed), then the openings stream, then the source.
/// Flushes produced by a single event are queued and delivered one per poll.
struct PassThroughBufferToggle<T, S, SO, CS, F> {
    source: Pin<Box<S>>,
    openings: Option<Pin<Box<SO>>>,
    closing_selector: F,
    contexts: Vec<BufferContext<T, CS>>,
    flushes: VecDeque<StreamItem<Vec<T>>>,
    done: bool,
}

impl<T, S, SO, CS, F> PassThroughBufferToggle<T, S, SO, CS, F> {
    fn new(source: S, openings: SO, closing_selector: F) -> Self {
        Self {
            source: Box::pin(source),
            openings: Some(Box::pin(openings)),
            closing_selector,
            contexts: Vec::new(),
            flushes: VecDeque::new(),
            done: false,
        }
    }

    /// Terminal error transition: every open window is discarded without
    /// flushing, queued-but-undelivered flushes are abandoned, and the error
    /// is the last item the operator yields.
    fn fail(&mut self, error: BufgateError) -> Poll<Option<StreamItem<Vec<T>>>> {
        logging::warn!("pass_through_buffer_toggle terminated by error: {}", error);
        self.flushes.clear();
        self.contexts.clear();
        self.openings = None;
        self.done = true;
        Poll::Ready(Some(StreamItem::Error(error)))
    }
}

// Every inner stream is boxed and the struct is never pin-projected, so
// pinning it pins nothing structurally. Spelled out because the auto impl
// would demand `T: Unpin` for the buffered values.
impl<T, S, SO, CS, F: Unpin> Unpin for PassThroughBufferToggle<T, S, SO, CS, F> {}

impl<T, O, C, S, SO, CS, F> Stream for PassThroughBufferToggle<T, S, SO, CS, F>
where
    T: Clone,
    S: Stream<Item = StreamItem<T>>,
    SO: Stream<Item = StreamItem<O>>,
    CS: Stream<Item = StreamItem<C>>,
    F: FnMut(O) -> Result<Option<CS>, BufgateError> + Unpin,
{
    type Item = StreamItem<Vec<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(flush) = this.flushes.pop_front() {
                return Poll::Ready(Some(flush));
            }
            if this.done {
                return Poll::Ready(None);
            }

            let mut progressed = false;

            // Closing notifiers. A first emission or completion closes the
            // window it belongs to: its buffer is flushed as one vector (even
            // if empty) and the notifier is dropped with the context.
            let mut index = 0;
            while index < this.contexts.len() {
                match this.contexts[index].closing.as_mut().poll_next(cx) {
                    Poll::Ready(Some(StreamItem::Value(_))) | Poll::Ready(None) => {
                        let context = this.contexts.remove(index);
                        this.flushes.push_back(StreamItem::Value(context.buffer));
                        progressed = true;
                    }
                    Poll::Ready(Some(StreamItem::Error(e))) => return this.fail(e),
                    Poll::Pending => index += 1,
                }
            }

            // Openings. Each value asks the selector for a closing notifier;
            // `Ok(None)` declines to open a window, `Err` aborts the whole
            // operator. The openings stream running out is not terminal.
            let mut openings_exhausted = false;
            if let Some(openings) = this.openings.as_mut() {
                loop {
                    match openings.as_mut().poll_next(cx) {
                        Poll::Ready(Some(StreamItem::Value(opening))) => {
                            match (this.closing_selector)(opening) {
                                Ok(Some(closing)) => {
                                    this.contexts.push(BufferContext::new(closing));
                                    progressed = true;
                                }
                                Ok(None) => {}
                                Err(e) => return this.fail(e),
                            }
                        }
                        Poll::Ready(Some(StreamItem::Error(e))) => return this.fail(e),
                        Poll::Ready(None) => {
                            openings_exhausted = true;
                            break;
                        }
                        Poll::Pending => break,
                    }
                }
            }
            if openings_exhausted {
                this.openings = None;
            }

            // A newly opened window must have its notifier polled before any
            // source value lands in its buffer; an already-exhausted notifier
            // closes it right here with an empty flush.
            if progressed {
                continue;
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    if this.contexts.is_empty() {
                        // Pass-through: no window open, emit as a singleton.
                        return Poll::Ready(Some(StreamItem::Value(vec![value])));
                    }
                    for context in &mut this.contexts {
                        context.buffer.push(value.clone());
                    }
                }
                Poll::Ready(Some(StreamItem::Error(e))) => return this.fail(e),
                Poll::Ready(None) => {
                    // Completion flushes what error discards: every remaining
                    // window drains downstream in registration order.
                    this.done = true;
                    this.openings = None;
                    for context in this.contexts.drain(..) {
                        this.flushes.push_back(StreamItem::Value(context.buffer));
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Free-function form of the operator, for pipelines that compose functions
/// rather than chain methods. See
/// [`PassThroughBufferToggleExt::pass_through_buffer_toggle`](crate::PassThroughBufferToggleExt::pass_through_buffer_toggle)
/// for the semantics.
///
/// Construction performs no side effects; the openings stream and every
/// closing notifier are first polled when the returned stream is.
pub fn pass_through_buffer_toggle_impl<T, O, C, S, IS, CS, F>(
    source: S,
    openings: IS,
    closing_selector: F,
) -> impl Stream<Item = StreamItem<Vec<T>>> + Send + Sync + Unpin
where
    T: Clone + Send + Sync + 'static,
    S: Stream<Item = StreamItem<T>> + Send + Sync + 'static,
    IS: IntoStream<Item = StreamItem<O>>,
    IS::Stream: Send + Sync + 'static,
    CS: Stream<Item = StreamItem<C>> + Send + Sync + 'static,
    F: FnMut(O) -> Result<Option<CS>, BufgateError> + Send + Sync + Unpin + 'static,
{
    PassThroughBufferToggle::new(source, openings.into_stream(), closing_selector)
}
