// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `ToSlice` (§4.2): buffers an entire source into a single `Vec`.

use streamline_core::{Notification, Observable};

/// Buffers every `Next` value. On `Complete`, emits the buffer as a single
/// `Next(Vec<T>)` followed by `Complete`. On `Error`, the buffer is
/// discarded and the error is forwarded as-is.
#[must_use]
pub fn to_slice<T>() -> impl FnOnce(Observable<T>) -> Observable<Vec<T>>
where
    T: Send + 'static,
{
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            async move {
                let upstream = source.subscribe_on();
                let mut buffer = Vec::new();
                loop {
                    tokio::select! {
                        biased;
                        () = subscriber.closed() => {
                            upstream.stop();
                            return;
                        }
                        item = upstream.for_each() => {
                            match item {
                                Some(Notification::Next(value)) => buffer.push(value),
                                Some(Notification::Error(err)) => {
                                    subscriber.send(Notification::Error(err)).await;
                                    return;
                                }
                                Some(Notification::Complete) | None => {
                                    subscriber.send(Notification::Next(buffer)).await;
                                    subscriber.send(Notification::Complete).await;
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}
