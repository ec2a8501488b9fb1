// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Timeout` (§4.2): a deadline reset on every `Next`.

use crate::config::TimeoutConfig;
use streamline_core::{Notification, Observable, StreamError};

/// Resets a `duration`-long timer on every `Next`. If the timer expires
/// before another `Next`, `Error`, or `Complete` arrives, the source is
/// cancelled and a `StreamError::Timeout` is emitted instead.
#[must_use]
pub fn timeout<T>(config: impl Into<TimeoutConfig>) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    let config = config.into();
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            let config = config.clone();
            async move {
                let upstream = source.subscribe_on();
                let duration = config.duration();
                loop {
                    tokio::select! {
                        biased;
                        () = subscriber.closed() => {
                            upstream.stop();
                            return;
                        }
                        () = tokio::time::sleep(duration) => {
                            upstream.stop();
                            let err = StreamError::timeout(config.context());
                            subscriber.send(Notification::Error(err)).await;
                            return;
                        }
                        item = upstream.for_each() => {
                            match item {
                                Some(terminal @ (Notification::Error(_) | Notification::Complete)) => {
                                    subscriber.send(terminal).await;
                                    return;
                                }
                                Some(next @ Notification::Next(_)) => {
                                    if !subscriber.send(next).await {
                                        upstream.stop();
                                        return;
                                    }
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
