// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Delay` / `DelayWhen` (§4.2).

use std::time::Duration;
use streamline_core::{Notification, Observable};

/// Suspends each `Next` value by `duration` before forwarding it. `Error`
/// and `Complete` pass through immediately, without delay.
#[must_use]
pub fn delay<T>(duration: Duration) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
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
                            match item {
                                Some(Notification::Next(value)) => {
                                    tokio::select! {
                                        biased;
                                        () = subscriber.closed() => {
                                            upstream.stop();
                                            return;
                                        }
                                        () = tokio::time::sleep(duration) => {
                                            if !subscriber.send(Notification::Next(value)).await {
                                                upstream.stop();
                                                return;
                                            }
                                        }
                                    }
                                }
                                Some(terminal @ (Notification::Error(_) | Notification::Complete)) => {
                                    subscriber.send(terminal).await;
                                    return;
                                }
                                None => return,
                            }
                        }
                    }
                }
            }
        })
    }
}

/// Subscribes to `selector(value, index)` for each incoming value and
/// forwards `value` once that stream produces its first `Next`. If the
/// selector stream completes without emitting, `value` is dropped. If the
/// selector stream errors, the error propagates and cancels the source.
#[must_use]
pub fn delay_when<T, U, F>(selector: F) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(&T, usize) -> Observable<U> + Send + Sync + 'static,
{
    let selector = std::sync::Arc::new(selector);
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            let selector = std::sync::Arc::clone(&selector);
            async move {
                let upstream = source.subscribe_on();
                let mut index = 0usize;
                loop {
                    tokio::select! {
                        biased;
                        () = subscriber.closed() => {
                            upstream.stop();
                            return;
                        }
                        item = upstream.for_each() => {
                            match item {
                                Some(Notification::Next(value)) => {
                                    let gate = selector(&value, index).subscribe_on();
                                    index += 1;
                                    loop {
                                        match gate.for_each().await {
                                            Some(Notification::Next(_)) => {
                                                gate.stop();
                                                if !subscriber.send(Notification::Next(value)).await {
                                                    upstream.stop();
                                                    return;
                                                }
                                                break;
                                            }
                                            Some(Notification::Error(err)) => {
                                                gate.stop();
                                                upstream.stop();
                                                subscriber.send(Notification::Error(err)).await;
                                                return;
                                            }
                                            Some(Notification::Complete) | None => break,
                                        }
                                    }
                                }
                                Some(terminal @ (Notification::Error(_) | Notification::Complete)) => {
                                    subscriber.send(terminal).await;
                                    return;
                                }
                                None => return,
                            }
                        }
                    }
                }
            }
        })
    }
}
