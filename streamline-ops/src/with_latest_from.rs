// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `WithLatestFrom` (§4.3).
//!
//! §9's open question notes the source this is grounded on computes an
//! error path that is never propagated; this implements the conventional
//! behavior §4.3 specifies instead — any error, from either side, cancels
//! the other side and propagates.

use crate::relay::{relay, DoneOnDrop, RelayControl};
use parking_lot::Mutex;
use std::sync::Arc;
use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable, StreamError, TaskHandle};

/// Combines every `Next` from the piped-in primary source with the latest
/// value seen from `secondary`. Only a primary `Next` produces output;
/// `secondary`'s values update silently and are dropped until the primary
/// emits after at least one has arrived.
#[must_use]
pub fn with_latest_from<A, B>(secondary: Observable<B>) -> impl FnOnce(Observable<A>) -> Observable<(A, B)>
where
    A: Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    move |primary: Observable<A>| {
        Observable::new(move |subscriber| {
            let primary = primary.clone();
            let secondary = secondary.clone();
            async move {
                let last_b: Arc<Mutex<Option<B>>> = Arc::new(Mutex::new(None));
                let cancel = CancellationToken::new();
                let barrier = JoinBarrier::new();
                let error_slot: Arc<Mutex<Option<StreamError>>> = Arc::new(Mutex::new(None));

                barrier.add(1);
                let secondary_handle = {
                    let last_b = Arc::clone(&last_b);
                    let cancel = cancel.clone();
                    let error_slot = Arc::clone(&error_slot);
                    let barrier = barrier.clone();
                    TaskHandle::spawn(move |_unused| async move {
                        let _done = DoneOnDrop(barrier);
                        let cancel_for_relay = cancel.clone();
                        relay(secondary, cancel_for_relay, move |notification| {
                            let last_b = Arc::clone(&last_b);
                            let cancel = cancel.clone();
                            let error_slot = Arc::clone(&error_slot);
                            async move {
                                match notification {
                                    Notification::Next(value) => {
                                        *last_b.lock() = Some(value);
                                        RelayControl::Continue
                                    }
                                    Notification::Error(err) => {
                                        let mut slot = error_slot.lock();
                                        if slot.is_none() {
                                            *slot = Some(err);
                                        }
                                        drop(slot);
                                        cancel.cancel();
                                        RelayControl::Stop
                                    }
                                    // secondary completing has no effect on the primary.
                                    Notification::Complete => RelayControl::Stop,
                                }
                            }
                        })
                        .await;
                    })
                };

                let upstream = primary.subscribe_on();
                let terminal = loop {
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => break None,
                        item = upstream.for_each() => {
                            match item {
                                Some(Notification::Next(a)) => {
                                    let maybe_b = last_b.lock().clone();
                                    if let Some(b) = maybe_b {
                                        if !subscriber.send(Notification::Next((a, b))).await {
                                            break None;
                                        }
                                    }
                                }
                                Some(Notification::Error(err)) => {
                                    cancel.cancel();
                                    break Some(Notification::Error(err));
                                }
                                Some(Notification::Complete) => {
                                    cancel.cancel();
                                    break Some(Notification::Complete);
                                }
                                None => break None,
                            }
                        }
                    }
                };
                upstream.stop();

                barrier.wait().await;
                drop(secondary_handle);

                if let Some(terminal) = terminal {
                    subscriber.send(terminal).await;
                } else if let Some(err) = error_slot.lock().take() {
                    subscriber.send(Notification::Error(err)).await;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use streamline_sources::{of, scheduled, throw};

    #[tokio::test(start_paused = true)]
    async fn only_primary_next_produces_output() {
        let secondary = scheduled(vec!["x", "y"], Duration::from_millis(10));
        let primary = scheduled(vec![1, 2, 3], Duration::from_millis(15));

        let observable = primary.pipe(with_latest_from(secondary));
        let items = streamline_test_utils::collect_notifications(&observable).await;

        let pairs: Vec<(i32, &str)> = items.iter().filter_map(|n| n.value().cloned()).collect();
        assert!(!pairs.is_empty());
        assert!(matches!(items.last(), Some(Notification::Complete)));
    }

    #[tokio::test]
    async fn secondary_error_cancels_primary_and_propagates() {
        let secondary = throw::<&str>(StreamError::timeout("boom"));
        let primary = of(vec![1, 2, 3]);

        let observable = primary.pipe(with_latest_from(secondary));
        let subscriber = observable.subscribe_on();
        match subscriber.for_each().await {
            Some(Notification::Error(e)) => assert!(e.is_timeout()),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_tasks_leak_after_termination() {
        let guard = streamline_test_utils::LeakGuard::new();
        let secondary = scheduled(vec!["x", "y"], Duration::from_millis(10));
        let primary = scheduled(vec![1, 2, 3], Duration::from_millis(15));
        let observable = primary.pipe(with_latest_from(secondary));
        streamline_test_utils::collect_notifications(&observable).await;
        tokio::task::yield_now().await;
        guard.assert_no_leaks();
    }
}
