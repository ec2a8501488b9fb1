// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::{Notification, Observable, StreamError};

/// Side-effect callbacks invoked by [`tap`] alongside passthrough of every
/// notification. RxGo calls this operator `Do`.
pub struct TapObserver<T> {
    /// Called for every `Next` value, before it is forwarded downstream.
    pub on_next: Box<dyn Fn(&T) + Send + Sync>,
    /// Called once, if the upstream terminates with `Error`.
    pub on_error: Box<dyn Fn(&StreamError) + Send + Sync>,
    /// Called once, if the upstream terminates with `Complete`.
    pub on_complete: Box<dyn Fn() + Send + Sync>,
}

impl<T> Default for TapObserver<T> {
    fn default() -> Self {
        Self {
            on_next: Box::new(|_| {}),
            on_error: Box::new(|_| {}),
            on_complete: Box::new(|| {}),
        }
    }
}

/// Builds an operator that runs `observer`'s callbacks alongside unchanged
/// passthrough of every notification.
///
/// Observer panics are not caught: a panicking callback unwinds through the
/// subscription task like any other Rust panic.
#[must_use]
pub fn tap<T>(observer: TapObserver<T>) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    let observer = std::sync::Arc::new(observer);
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            let observer = std::sync::Arc::clone(&observer);
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
                            match &item {
                                Notification::Next(v) => (observer.on_next)(v),
                                Notification::Error(e) => (observer.on_error)(e),
                                Notification::Complete => (observer.on_complete)(),
                            }
                            let is_end = item.is_end();
                            if !subscriber.send(item).await || is_end {
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
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn runs_on_next_without_altering_the_value() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        let observer = TapObserver {
            on_next: Box::new(move |v: &i32| {
                seen_clone.fetch_add(*v as usize, Ordering::SeqCst);
            }),
            ..Default::default()
        };

        let observable = of(vec![1, 2, 3]).pipe(tap(observer));
        let subscriber = observable.subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(1))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(2))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(3))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
        assert_eq!(seen.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn runs_on_complete_exactly_once() {
        let completions = Arc::new(AtomicUsize::new(0));
        let completions_clone = Arc::clone(&completions);
        let observer = TapObserver {
            on_complete: Box::new(move || {
                completions_clone.fetch_add(1, Ordering::SeqCst);
            }),
            ..Default::default()
        };

        let observable = of(vec![1]).pipe(tap(observer));
        let subscriber = observable.subscribe_on();
        while subscriber.for_each().await.is_some() {}
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn downstream_cancellation_stops_an_unbounded_upstream() {
        use std::sync::atomic::AtomicBool;
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

        let observable = source.pipe(tap(TapObserver::default()));
        let subscriber = observable.subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(0))));
        subscriber.stop();

        for _ in 0..100 {
            if upstream_closed.load(Ordering::SeqCst) {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(upstream_closed.load(Ordering::SeqCst), "tap did not stop its upstream on downstream cancellation");
    }
}
