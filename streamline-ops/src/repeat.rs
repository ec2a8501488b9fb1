// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `Repeat` (§4.2): resubscribes to a completed source, optionally bounded
//! and optionally delayed between attempts.

use crate::config::RepeatConfig;
use streamline_core::{Notification, Observable};

/// Resubscribes to the piped-in source each time it completes, up to
/// `config`'s count (`0` means unbounded), optionally waiting `delay`
/// between subscriptions. An `Error` ends the sequence immediately; there
/// is no retry on error.
#[must_use]
pub fn repeat<T>(config: impl Into<RepeatConfig>) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    let config = config.into();
    move |source: Observable<T>| {
        Observable::new(move |subscriber| {
            let source = source.clone();
            let config = config.clone();
            async move {
                let mut attempt: u64 = 0;
                loop {
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
                                        if !subscriber.send(Notification::Next(value)).await {
                                            upstream.stop();
                                            return;
                                        }
                                    }
                                    Some(Notification::Error(err)) => {
                                        subscriber.send(Notification::Error(err)).await;
                                        return;
                                    }
                                    Some(Notification::Complete) | None => break,
                                }
                            }
                        }
                    }

                    attempt += 1;
                    if !config.is_unbounded() && attempt >= config.count() {
                        subscriber.send(Notification::Complete).await;
                        return;
                    }
                    let delay = config.delay();
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use streamline_sources::of;

    #[tokio::test]
    async fn repeats_the_given_number_of_times() {
        let observable = of(vec![1, 2]).pipe(repeat(3u64));
        let items = streamline_test_utils::collect_notifications(&observable).await;
        let values: Vec<i32> = items.iter().filter_map(|n| n.value().copied()).collect();
        assert_eq!(values, vec![1, 2, 1, 2, 1, 2]);
        assert!(matches!(items.last(), Some(Notification::Complete)));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_the_configured_delay_between_attempts() {
        let config: RepeatConfig = (2u64, Duration::from_millis(50)).into();
        let observable = of(vec![1]).pipe(repeat(config));
        let started = tokio::time::Instant::now();
        let _ = streamline_test_utils::collect_notifications(&observable).await;
        assert!(tokio::time::Instant::now() - started >= Duration::from_millis(50));
    }
}
