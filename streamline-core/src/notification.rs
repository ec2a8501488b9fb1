// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The single tagged value that flows through every Streamline subscription.

use crate::StreamError;

/// A single notification delivered from a producer to a consumer.
///
/// A well-behaved producer sends zero or more [`Notification::Next`] values
/// followed by exactly one terminal notification ([`Notification::Error`] or
/// [`Notification::Complete`]); nothing further is sent after a terminal
/// notification. `Notification` itself is immutable once created.
#[derive(Debug, Clone)]
pub enum Notification<T> {
    /// A value emitted by the producer.
    Next(T),
    /// A terminal error notification.
    Error(StreamError),
    /// A terminal completion notification.
    Complete,
}

impl<T> Notification<T> {
    /// `true` for `Error` or `Complete` — the two terminal variants.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Complete)
    }

    /// `true` only for `Next`.
    #[must_use]
    pub const fn is_next(&self) -> bool {
        matches!(self, Self::Next(_))
    }

    /// `true` only for `Error`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// `true` only for `Complete`.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The wrapped error, if this is `Error`.
    #[must_use]
    pub fn err(&self) -> Option<&StreamError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// The wrapped value, if this is `Next`. Partial: only defined for `Next`.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the notification, returning the wrapped value if `Next`.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Maps the `Next` payload, leaving terminal notifications unchanged.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Notification<U> {
        match self {
            Self::Next(v) => Notification::Next(f(v)),
            Self::Error(e) => Notification::Error(e),
            Self::Complete => Notification::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        let next = Notification::Next(1);
        assert!(next.is_next());
        assert!(!next.is_end());
        assert_eq!(next.value(), Some(&1));

        let complete = Notification::<i32>::Complete;
        assert!(complete.is_end());
        assert!(complete.is_complete());
        assert_eq!(complete.value(), None);

        let error = Notification::<i32>::Error(StreamError::timeout("1ms"));
        assert!(error.is_end());
        assert!(error.is_error());
        assert!(error.err().unwrap().is_timeout());
    }

    #[test]
    fn map_only_touches_next() {
        let next = Notification::Next(2).map(|v| v * 10);
        assert_eq!(next.value(), Some(&20));

        let complete: Notification<i32> = Notification::Complete.map(|v| v * 10);
        assert!(complete.is_complete());
    }
}
