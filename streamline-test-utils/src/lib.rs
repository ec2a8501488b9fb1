// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Testing harness shared across Streamline's crates.

use std::time::Duration;
use streamline_core::{active_task_count, Notification, Observable, Subscriber};

/// Drains `observable` to its terminal notification and returns every
/// notification observed, in order, for exact-sequence assertions.
pub async fn collect_notifications<T>(observable: &Observable<T>) -> Vec<Notification<T>>
where
    T: Send + 'static,
{
    let subscriber = observable.subscribe_on();
    let mut items = Vec::new();
    while let Some(item) = subscriber.for_each().await {
        let is_end = item.is_end();
        items.push(item);
        if is_end {
            break;
        }
    }
    items
}

/// A manually-driven [`Subscriber`] for test setups that need to push
/// notifications imperatively rather than from an `Observable`'s producer
/// closure.
///
/// Pushing and subscribing are separated so a test can set up the channel,
/// hand the `Subscriber` to the code under test, then push values on its own
/// schedule.
pub struct TestChannel<T> {
    subscriber: Subscriber<T>,
}

impl<T> TestChannel<T> {
    /// Creates a fresh test channel with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriber: Subscriber::new(),
        }
    }

    /// Returns a clone of the underlying subscriber, for handing to the code
    /// under test.
    #[must_use]
    pub fn subscriber(&self) -> Subscriber<T> {
        self.subscriber.clone()
    }

    /// Pushes a `Next` value onto the channel.
    pub async fn push(&self, value: T) -> bool {
        self.subscriber.send(Notification::Next(value)).await
    }

    /// Pushes `Complete` onto the channel.
    pub async fn complete(&self) -> bool {
        self.subscriber.send(Notification::Complete).await
    }

    /// Pushes `Error(err)` onto the channel.
    pub async fn error(&self, err: streamline_core::StreamError) -> bool {
        self.subscriber.send(Notification::Error(err)).await
    }
}

impl<T> Default for TestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Asserts that `subscriber` yields no notification within `timeout`.
///
/// # Panics
/// Panics if a notification arrives before the timeout elapses.
pub async fn assert_no_notification_within<T>(subscriber: &Subscriber<T>, timeout: Duration) {
    tokio::select! {
        item = subscriber.for_each() => {
            panic!("expected no notification within {timeout:?}, got {item:?}");
        }
        () = tokio::time::sleep(timeout) => {}
    }
}

/// Guards a test body, asserting that the number of [`streamline_core::TaskHandle`]s
/// alive when the guard is dropped matches the count observed when it was
/// created — i.e. the test body leaked no background tasks.
///
/// ```ignore
/// let _guard = LeakGuard::new();
/// // ... subscribe, drive to termination, drop subscriber ...
/// tokio::task::yield_now().await;
/// // guard's Drop asserts active_task_count() returned to baseline
/// ```
pub struct LeakGuard {
    baseline: usize,
}

impl LeakGuard {
    /// Captures the current active task count as the baseline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            baseline: active_task_count(),
        }
    }

    /// Asserts the active task count has returned to the baseline.
    ///
    /// # Panics
    /// Panics if any task spawned during the guard's lifetime is still
    /// running.
    pub fn assert_no_leaks(&self) {
        assert_eq!(
            active_task_count(),
            self.baseline,
            "expected no task leaks: active task count did not return to baseline"
        );
    }
}

impl Default for LeakGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps an async test body with a timeout, so a hung subscription fails the
/// test instead of the test suite itself.
#[macro_export]
macro_rules! with_timeout {
    ($body:expr) => {
        ::tokio::time::timeout(::std::time::Duration::from_secs(5), async { $body })
            .await
            .expect("test timed out after 5 seconds")
    };
}
