// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use streamline_core::{Notification, Observable};

/// The time-aware counterpart of [`crate::of`]: emits each value from
/// `values`, spaced `period` apart, then `Complete`.
///
/// The first value is also delayed by `period` — every emission, including
/// the first, waits one full period after subscription.
#[must_use]
pub fn scheduled<T>(values: Vec<T>, period: Duration) -> Observable<T>
where
    T: Send + Clone + 'static,
{
    Observable::new(move |subscriber| {
        let values = values.clone();
        async move {
            for v in values {
                tokio::select! {
                    biased;
                    () = subscriber.closed() => return,
                    () = tokio::time::sleep(period) => {}
                }
                if !subscriber.send(Notification::Next(v)).await {
                    return;
                }
            }
            subscriber.send(Notification::Complete).await;
        }
    })
}
