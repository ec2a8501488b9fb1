// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::{Notification, Observable};

/// Builds an operator that forwards the first `n` `Next` values, then
/// synthesizes `Complete` and cancels the upstream subscription.
///
/// `n == 0` completes immediately without subscribing downstream-visibly to
/// any `Next` value. An `Error` that arrives before the `n`th item passes
/// through unchanged.
#[must_use]
pub fn take<T>(n: usize) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            async move {
                if n == 0 {
                    subscriber.send(Notification::Complete).await;
                    return;
                }

                let upstream = source.subscribe_on();
                let mut taken = 0usize;
                while let Some(item) = upstream.for_each().await {
                    match item {
                        Notification::Next(_) => {
                            taken += 1;
                            let reached_limit = taken == n;
                            if !subscriber.send(item).await {
                                upstream.stop();
                                return;
                            }
                            if reached_limit {
                                upstream.stop();
                                subscriber.send(Notification::Complete).await;
                                return;
                            }
                        }
                        end => {
                            subscriber.send(end).await;
                            return;
                        }
                    }
                }
            }
        })
    }
}
