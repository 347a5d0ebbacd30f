// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core vocabulary for the bufgate stream operators.
//!
//! This crate defines the in-band notification type ([`StreamItem`]), the
//! root error type ([`BufgateError`]), the hot push-based producer
//! ([`BufgateSubject`]) and the [`IntoStream`] conversion trait that makes
//! operator arguments accept anything stream-like.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod error;
pub mod into_stream;
pub mod stream_item;
pub mod subject;
pub mod subject_error;

pub use self::error::{BufgateError, Result};
pub use self::into_stream::IntoStream;
pub use self::stream_item::StreamItem;
pub use self::subject::{BufgateSubject, SubjectStream};
pub use self::subject_error::SubjectError;
