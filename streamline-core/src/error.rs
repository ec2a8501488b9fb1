// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The error payload carried by [`crate::Notification::Error`].
//!
//! Per §7's taxonomy: upstream errors are opaque and propagated verbatim,
//! `Timeout` is the one operator-specific error kind this library defines.

use std::sync::Arc;

/// Root error type carried by stream notifications.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
    /// A time-based operator (currently only `timeout`) exceeded its bound.
    #[error("timeout: {context}")]
    Timeout {
        /// Human-readable context, e.g. the configured duration.
        context: String,
    },

    /// An opaque error from upstream: a source, a user closure, or an inner
    /// subscription. Passed through verbatim — this library never inspects
    /// or reinterprets the wrapped error's content.
    #[error("upstream error: {0}")]
    Upstream(Arc<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    /// Builds a [`StreamError::Timeout`] with the given context string.
    pub fn timeout(context: impl Into<String>) -> Self {
        Self::Timeout {
            context: context.into(),
        }
    }

    /// Wraps any `std::error::Error` as an opaque upstream error.
    pub fn upstream(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upstream(Arc::new(error))
    }

    /// Returns `true` if this is the `Timeout` sentinel.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Specialized `Result` for fallible, non-streaming Streamline operations
/// (e.g. subject sends, configuration parsing).
pub type Result<T> = std::result::Result<T, StreamError>;
