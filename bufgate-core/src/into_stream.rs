// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;

/// A trait for types that can be converted into a `Stream`.
///
/// Operator arguments use this so that channels, wrappers and plain streams
/// can all be passed without explicit conversion at the call site.
pub trait IntoStream {
    /// The type of items in the stream.
    type Item;
    /// The stream type this object converts into.
    type Stream: Stream<Item = Self::Item>;

    /// Converts this object into a stream.
    fn into_stream(self) -> Self::Stream;
}

/// Blanket implementation: any `Stream` converts into itself.
impl<S> IntoStream for S
where
    S: Stream,
{
    type Item = S::Item;
    type Stream = S;

    fn into_stream(self) -> Self::Stream {
        self
    }
}
