// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `ForkJoin` (§4.3).

use crate::relay::{relay, DoneOnDrop, RelayControl};
use parking_lot::Mutex;
use std::sync::Arc;
use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable, StreamError, TaskHandle};

struct ForkJoinState<T> {
    latest: Vec<Option<T>>,
    emitted: Vec<bool>,
}

/// Runs `sources` in parallel, each overwriting its own slot on every
/// `Next`. Once every source has completed, emits `Next(latest)` then
/// `Complete` *only if* every source emitted at least once; otherwise
/// completes with no `Next`. An empty source list completes immediately.
/// Any error cancels the rest and propagates.
#[must_use]
pub fn fork_join<T>(sources: Vec<Observable<T>>) -> Observable<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    Observable::new(move |subscriber| {
        let sources = sources.clone();
        async move {
            let n = sources.len();
            if n == 0 {
                subscriber.send(Notification::Complete).await;
                return;
            }

            let state = Arc::new(Mutex::new(ForkJoinState::<T> {
                latest: (0..n).map(|_| None).collect(),
                emitted: vec![false; n],
            }));
            let cancel = CancellationToken::new();
            let barrier = JoinBarrier::new();
            let error_slot: Arc<Mutex<Option<StreamError>>> = Arc::new(Mutex::new(None));

            barrier.add(n);
            let mut handles = Vec::with_capacity(n);
            for (index, source) in sources.into_iter().enumerate() {
                let state = Arc::clone(&state);
                let error_slot = Arc::clone(&error_slot);
                let cancel = cancel.clone();
                let barrier = barrier.clone();

                handles.push(TaskHandle::spawn(move |_unused| async move {
                    let _done = DoneOnDrop(barrier);
                    let cancel_for_relay = cancel.clone();
                    relay(source, cancel_for_relay, move |notification| {
                        let state = Arc::clone(&state);
                        let error_slot = Arc::clone(&error_slot);
                        let cancel = cancel.clone();
                        async move {
                            match notification {
                                Notification::Next(value) => {
                                    let mut guard = state.lock();
                                    guard.latest[index] = Some(value);
                                    guard.emitted[index] = true;
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
                                Notification::Complete => RelayControl::Stop,
                            }
                        }
                    })
                    .await;
                }));
            }

            barrier.wait().await;
            drop(handles);

            if let Some(err) = error_slot.lock().take() {
                subscriber.send(Notification::Error(err)).await;
                return;
            }

            let guard = state.lock();
            if guard.emitted.iter().all(|&e| e) {
                let values: Vec<T> = guard.latest.iter().cloned().map(|v| v.expect("checked above")).collect();
                drop(guard);
                if !subscriber.send(Notification::Next(values)).await {
                    return;
                }
            }
            subscriber.send(Notification::Complete).await;
        }
    })
}
