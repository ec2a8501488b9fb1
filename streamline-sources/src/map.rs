// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use streamline_core::{Notification, Observable};

/// Builds an operator that transforms every `Next` value with `f`, passing
/// `Error`/`Complete` through unchanged.
#[must_use]
pub fn map<T, U, F>(f: F) -> impl FnOnce(Observable<T>) -> Observable<U>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    let f = Arc::new(f);
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            let f = Arc::clone(&f);
            async move {
                let upstream = source.subscribe_on();
                loop {
                    tokio::select! {
                        biased;
                        () = subscriber.closed() => {
                            upstream.stop();
                            return;
                        }
                        item = upstream.for_each() => {
                            let Some(item) = item else { return };
                            let forwarded: Notification<U> = item.map(|v| f(v));
                            let is_end = forwarded.is_end();
                            if !subscriber.send(forwarded).await || is_end {
                                upstream.stop();
                                return;
                            }
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::of;
    use streamline_core::Notification;

    #[tokio::test]
    async fn transforms_next_values() {
        let observable = of(vec![1, 2, 3]).pipe(map(|v| v * 10));
        let subscriber = observable.subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(10))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(20))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(30))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
    }

    #[tokio::test]
    async fn leaves_error_untouched() {
        use crate::throw;
        use streamline_core::StreamError;

        let observable = throw::<i32>(StreamError::timeout("x")).pipe(map(|v| v * 10));
        let subscriber = observable.subscribe_on();
        match subscriber.for_each().await {
            Some(Notification::Error(e)) => assert!(e.is_timeout()),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn downstream_cancellation_stops_an_unbounded_upstream() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use streamline_core::Observable;

        let upstream_closed = Arc::new(AtomicBool::new(false));
        let upstream_closed_clone = Arc::clone(&upstream_closed);
        let source: Observable<i32> = Observable::new(move |subscriber| {
            let upstream_closed = Arc::clone(&upstream_closed_clone);
            async move {
                let mut v = 0;
                loop {
                    tokio::select! {
                        biased;
                        () = subscriber.closed() => {
                            upstream_closed.store(true, Ordering::SeqCst);
                            return;
                        }
                        sent = subscriber.send(Notification::Next(v)) => {
                            if !sent {
                                return;
                            }
                            v += 1;
                        }
                    }
                }
            }
        });

        let observable = source.pipe(map(|v| v * 2));
        let subscriber = observable.subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(0))));
        subscriber.stop();

        for _ in 0..100 {
            if upstream_closed.load(Ordering::SeqCst) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(upstream_closed.load(Ordering::SeqCst), "map did not stop its upstream on downstream cancellation");
    }
}
