// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `RaceWith` (§4.3).
//!
//! Doesn't reuse [`crate::relay::relay`]: the winning source must keep
//! running past the moment the shared cancellation signal fires (it fired
//! *because* that source won), while every losing source must stop the
//! instant it fires — a distinction `relay`'s generic shape doesn't
//! express, so the coordination loop is written out directly here.

use std::sync::atomic::{AtomicIsize, Ordering};
use std::sync::Arc;
use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable, TaskHandle};

use crate::relay::DoneOnDrop;

/// Subscribes to all sources in parallel. The first to emit any
/// notification becomes the winner; every other source is cancelled at
/// that instant, and all further output comes from the winner alone.
#[must_use]
pub fn race_with<T>(others: Vec<Observable<T>>) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + Sync + 'static,
{
    move |source: Observable<T>| {
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(source);
        sources.extend(others);

        Observable::new(move |subscriber| {
            let sources = sources.clone();
            async move {
                let n = sources.len();
                if n == 0 {
                    subscriber.send(Notification::Complete).await;
                    return;
                }

                let winner = Arc::new(AtomicIsize::new(-1));
                let race_decided = CancellationToken::new();
                let barrier = JoinBarrier::new();

                barrier.add(n);
                let mut handles = Vec::with_capacity(n);
                for (index, source) in sources.into_iter().enumerate() {
                    let winner = Arc::clone(&winner);
                    let race_decided = race_decided.clone();
                    let barrier = barrier.clone();
                    let subscriber = subscriber.clone();

                    handles.push(TaskHandle::spawn(move |_unused| async move {
                        let _done = DoneOnDrop(barrier);
                        let upstream = source.subscribe_on();
                        let mut decided = false;

                        loop {
                            tokio::select! {
                                biased;
                                () = race_decided.cancelled(), if !decided => {
                                    upstream.stop();
                                    return;
                                }
                                item = upstream.for_each() => {
                                    let Some(notification) = item else { return };

                                    if !decided {
                                        decided = true;
                                        let won = winner
                                            .compare_exchange(-1, index as isize, Ordering::SeqCst, Ordering::SeqCst)
                                            .is_ok();
                                        if won {
                                            streamline_core::debug!(
                                                "race_with: source {index} won, cancelling the rest"
                                            );
                                            race_decided.cancel();
                                        } else {
                                            upstream.stop();
                                            return;
                                        }
                                    }

                                    let is_end = notification.is_end();
                                    if !subscriber.send(notification).await {
                                        upstream.stop();
                                        return;
                                    }
                                    if is_end {
                                        upstream.stop();
                                        return;
                                    }
                                }
                            }
                        }
                    }));
                }

                barrier.wait().await;
                drop(handles);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use streamline_core::Notification;
    use streamline_sources::{of, scheduled};

    #[tokio::test(start_paused = true)]
    async fn fast_source_wins_and_slow_source_is_cancelled() {
        let slow = scheduled(vec![99], Duration::from_millis(50));
        let fast = of(vec![1, 2, 3]);

        let observable = fast.pipe(race_with(vec![slow]));
        let items = streamline_test_utils::collect_notifications(&observable).await;

        let values: Vec<i32> = items.iter().filter_map(|n| n.value().copied()).collect();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(matches!(items.last(), Some(Notification::Complete)));
    }

    #[tokio::test(start_paused = true)]
    async fn no_tasks_leak_after_termination() {
        let guard = streamline_test_utils::LeakGuard::new();
        let slow = scheduled(vec![99], Duration::from_millis(50));
        let fast = of(vec![1, 2, 3]);
        let observable = fast.pipe(race_with(vec![slow]));
        streamline_test_utils::collect_notifications(&observable).await;
        tokio::task::yield_now().await;
        guard.assert_no_leaks();
    }
}
