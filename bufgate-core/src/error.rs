// Copyright 2025 The bufgate authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the bufgate stream operators.
//!
//! The root [`BufgateError`] travels in-band through streams as
//! [`StreamItem::Error`](crate::StreamItem::Error). A closing selector that
//! needs to abort the whole pipeline returns one of these as `Err`.

/// Root error type for all bufgate operations.
#[derive(Debug, thiserror::Error)]
pub enum BufgateError {
    /// Stream processing encountered an error.
    ///
    /// General error for stream operations that do not fit a more specific
    /// category.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code.
    ///
    /// Wraps errors produced by user-provided callbacks such as closing
    /// selectors, so they can be propagated through the stream.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BufgateError {
    /// Create a stream processing error with the given context.
    ///
    /// # Examples
    ///
    /// ```
    /// use bufgate_core::BufgateError;
    ///
    /// let err = BufgateError::stream_error("source went away");
    /// assert!(matches!(err, BufgateError::StreamProcessingError { .. }));
    /// ```
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error.
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

/// Specialized `Result` type for bufgate operations.
pub type Result<T> = std::result::Result<T, BufgateError>;

impl Clone for BufgateError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors cannot be cloned; degrade to their message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}
