// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pass-through toggle buffering for async Rust streams.
//!
//! The [`pass_through_buffer_toggle`](PassThroughBufferToggleExt::pass_through_buffer_toggle)
//! operator works like a toggle buffer, except that while no buffering window
//! is open, source values flow straight through as one-element vectors. Open a
//! window to start collecting; close it to flush everything collected as a
//! single vector. Overlapping windows accumulate independently.
//!
//! The operator is consumed by explicit composition: import the extension
//! trait (or the [`prelude`]) and chain it onto any
//! `Stream<Item = StreamItem<T>>`. Nothing is registered globally.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod logging;
pub mod pass_through_buffer_toggle;
pub mod prelude;

pub use self::pass_through_buffer_toggle::{
    pass_through_buffer_toggle_impl, PassThroughBufferToggleExt,
};
