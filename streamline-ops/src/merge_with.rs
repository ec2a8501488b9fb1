// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `MergeWith` (§4.3).
//!
//! The source this is grounded on (`original_source/join.go`'s `MergeWith`)
//! uses a tentative error-channel scheme marked with a FIXME; per §9's open
//! question, this implementation instead uses a single atomically-guarded
//! "first error wins" slot plus a shared cancellation signal — the same
//! race-free pattern used by every other fan-in operator in this crate.

use crate::relay::{relay, DoneOnDrop, RelayControl};
use parking_lot::Mutex;
use std::sync::Arc;
use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable, StreamError, TaskHandle};

async fn merge_core<T>(sources: Vec<Observable<T>>, subscriber: streamline_core::Subscriber<T>)
where
    T: Send + Sync + 'static,
{
    let n = sources.len();
    if n == 0 {
        subscriber.send(Notification::Complete).await;
        return;
    }

    let cancel = CancellationToken::new();
    let barrier = JoinBarrier::new();
    let error_slot: Arc<Mutex<Option<StreamError>>> = Arc::new(Mutex::new(None));

    barrier.add(n);
    let mut handles = Vec::with_capacity(n);
    for source in sources {
        let error_slot = Arc::clone(&error_slot);
        let cancel = cancel.clone();
        let barrier = barrier.clone();
        let subscriber = subscriber.clone();

        handles.push(TaskHandle::spawn(move |_unused| async move {
            let _done = DoneOnDrop(barrier);
            let cancel_for_relay = cancel.clone();
            relay(source, cancel_for_relay, move |notification| {
                let error_slot = Arc::clone(&error_slot);
                let cancel = cancel.clone();
                let subscriber = subscriber.clone();
                async move {
                    match notification {
                        Notification::Next(value) => {
                            subscriber.send(Notification::Next(value)).await;
                            RelayControl::Continue
                        }
                        Notification::Error(err) => {
                            let mut slot = error_slot.lock();
                            if slot.is_none() {
                                streamline_core::warn!(
                                    "merge_with: first error wins, cancelling sibling sources: {err}"
                                );
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
    subscriber.send(Notification::Complete).await;
}

/// `MergeWith`: interleaves the piped-in source with `others`. Per-source
/// order is preserved; arrival order across sources is not deterministic.
#[must_use]
pub fn merge_with<T>(others: Vec<Observable<T>>) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + Sync + 'static,
{
    move |source: Observable<T>| {
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(source);
        sources.extend(others);
        Observable::new(move |subscriber| {
            let sources = sources.clone();
            async move { merge_core(sources, subscriber).await }
        })
    }
}
