// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tagged-variant configuration for operators that accept either a bare
//! primitive or a small struct (§9 "Replacing dynamic dispatch on config
//! unions").

use std::time::Duration;

/// Configuration for [`crate::repeat`].
///
/// `Count(0)` means unbounded repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatConfig {
    /// Repeat up to `count` times, with no delay between resubscriptions.
    Count(u64),
    /// Repeat up to `count` times, sleeping `delay` before each
    /// resubscription.
    CountWithDelay {
        /// Maximum number of repetitions. `0` means unbounded.
        count: u64,
        /// Delay before each resubscription.
        delay: Duration,
    },
}

impl RepeatConfig {
    #[must_use]
    pub const fn count(&self) -> u64 {
        match self {
            Self::Count(count) | Self::CountWithDelay { count, .. } => *count,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        match self {
            Self::Count(_) => Duration::ZERO,
            Self::CountWithDelay { delay, .. } => *delay,
        }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.count() == 0
    }
}

impl From<u64> for RepeatConfig {
    fn from(count: u64) -> Self {
        Self::Count(count)
    }
}

impl From<(u64, Duration)> for RepeatConfig {
    fn from((count, delay): (u64, Duration)) -> Self {
        Self::CountWithDelay { count, delay }
    }
}

/// Configuration for [`crate::timeout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeoutConfig {
    /// A bare duration, with a generated context string.
    Duration(Duration),
    /// A duration plus a caller-supplied context string, surfaced in the
    /// resulting `StreamError::Timeout`.
    DurationWithContext {
        /// Maximum time to wait between `Next` values.
        duration: Duration,
        /// Included in the timeout error's context.
        context: String,
    },
}

impl TimeoutConfig {
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::Duration(d) | Self::DurationWithContext { duration: d, .. } => *d,
        }
    }

    #[must_use]
    pub fn context(&self) -> String {
        match self {
            Self::Duration(d) => format!("{d:?}"),
            Self::DurationWithContext { context, .. } => context.clone(),
        }
    }
}

impl From<Duration> for TimeoutConfig {
    fn from(duration: Duration) -> Self {
        Self::Duration(duration)
    }
}

impl From<(Duration, &str)> for TimeoutConfig {
    fn from((duration, context): (Duration, &str)) -> Self {
        Self::DurationWithContext {
            duration,
            context: context.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_config_from_bare_count() {
        let config: RepeatConfig = 3.into();
        assert_eq!(config.count(), 3);
        assert!(!config.is_unbounded());
    }

    #[test]
    fn repeat_config_zero_is_unbounded() {
        let config: RepeatConfig = 0.into();
        assert!(config.is_unbounded());
    }

    #[test]
    fn timeout_config_from_bare_duration() {
        let config: TimeoutConfig = Duration::from_millis(5).into();
        assert_eq!(config.duration(), Duration::from_millis(5));
    }
}
