// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::BufgateError;
use core::fmt;

/// Errors specific to subject operations (lifecycle and broadcasting).
///
/// Distinct from stream processing errors; convertible to [`BufgateError`]
/// when a subject failure has to propagate through a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The subject has been closed and cannot accept new items or subscribers.
    Closed,
}

impl fmt::Display for SubjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Subject is closed"),
        }
    }
}

impl std::error::Error for SubjectError {}

impl From<SubjectError> for BufgateError {
    fn from(err: SubjectError) -> Self {
        BufgateError::stream_error(format!("subject: {err}"))
    }
}
