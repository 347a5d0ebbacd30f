// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the commonly used traits and types.
//!
//! ```ignore
//! use bufgate_stream::prelude::*;
//!
//! let buffered = source.pass_through_buffer_toggle(openings, selector);
//! ```

pub use crate::pass_through_buffer_toggle::PassThroughBufferToggleExt;
pub use bufgate_core::{BufgateError, IntoStream, Result, StreamItem};
