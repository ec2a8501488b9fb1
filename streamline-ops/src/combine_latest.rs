// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `CombineLatestWith` / `CombineLatestAll` (§4.3).

use crate::relay::{relay, DoneOnDrop, RelayControl};
use parking_lot::Mutex;
use std::sync::Arc;
use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable, StreamError, Subscriber, TaskHandle};

struct CombineState<T> {
    latest: Vec<Option<T>>,
    emitted: Vec<bool>,
}

impl<T> CombineState<T> {
    fn new(n: usize) -> Self {
        Self {
            latest: (0..n).map(|_| None).collect(),
            emitted: vec![false; n],
        }
    }

    fn all_emitted(&self) -> bool {
        self.emitted.iter().all(|&e| e)
    }

    fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.latest.iter().map(|v| v.clone().expect("all_emitted checked")).collect()
    }
}

/// Combines `sources` (each of the same type `T`) into one `Observable<Vec<T>>`.
///
/// Emits a `Next(snapshot)` every time any source emits, once every source
/// has emitted at least once. Completes when all sources complete; any
/// source's error cancels the rest and propagates immediately.
async fn combine_latest_core<T>(sources: Vec<Observable<T>>, subscriber: Subscriber<Vec<T>>)
where
    T: Clone + Send + Sync + 'static,
{
    let n = sources.len();
    if n == 0 {
        subscriber.send(Notification::Complete).await;
        return;
    }

    let state = Arc::new(Mutex::new(CombineState::<T>::new(n)));
    let cancel = CancellationToken::new();
    let barrier = JoinBarrier::new();
    let error_slot: Arc<Mutex<Option<StreamError>>> = Arc::new(Mutex::new(None));

    barrier.add(n);
    let mut handles = Vec::with_capacity(n);
    for (index, source) in sources.into_iter().enumerate() {
        let state = Arc::clone(&state);
        let error_slot = Arc::clone(&error_slot);
        let subscriber = subscriber.clone();
        let cancel = cancel.clone();
        let barrier = barrier.clone();

        handles.push(TaskHandle::spawn(move |_unused| async move {
            let _done = DoneOnDrop(barrier);
            let cancel_for_relay = cancel.clone();

            relay(source, cancel_for_relay, move |notification| {
                let state = Arc::clone(&state);
                let error_slot = Arc::clone(&error_slot);
                let subscriber = subscriber.clone();
                let cancel = cancel.clone();
                async move {
                    match notification {
                        Notification::Next(value) => {
                            let snapshot = {
                                let mut guard = state.lock();
                                guard.latest[index] = Some(value);
                                guard.emitted[index] = true;
                                guard.all_emitted().then(|| guard.snapshot())
                            };
                            if let Some(values) = snapshot {
                                subscriber.send(Notification::Next(values)).await;
                            }
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
    subscriber.send(Notification::Complete).await;
}

/// `CombineLatestWith`: combines the piped-in source (index 0) with `others`.
#[must_use]
pub fn combine_latest_with<T>(others: Vec<Observable<T>>) -> impl FnOnce(Observable<T>) -> Observable<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    move |source: Observable<T>| {
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(source);
        sources.extend(others);
        Observable::new(move |subscriber| {
            let sources = sources.clone();
            async move {
                combine_latest_core(sources, subscriber).await;
            }
        })
    }
}

/// `CombineLatestAll`: `outer` is drained for inner observables until it
/// completes, then every collected inner is combined as in
/// [`combine_latest_with`]. An empty inner list completes immediately.
#[must_use]
pub fn combine_latest_all<T>(outer: Observable<Observable<T>>) -> Observable<Vec<T>>
where
    T: Clone + Send + Sync + 'static,
{
    Observable::new(move |subscriber| {
        let outer = outer.clone();
        async move {
            let outer_sub = outer.subscribe_on();
            let mut inners = Vec::new();
            loop {
                match outer_sub.for_each().await {
                    Some(Notification::Next(inner)) => inners.push(inner),
                    Some(Notification::Error(err)) => {
                        subscriber.send(Notification::Error(err)).await;
                        return;
                    }
                    Some(Notification::Complete) | None => break,
                }
            }
            combine_latest_core(inners, subscriber).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamline_sources::{of, throw};

    #[tokio::test]
    async fn emits_once_every_source_has_contributed() {
        let observable = of(vec![1, 2]).pipe(combine_latest_with(vec![of(vec![10, 20])]));
        let subscriber = observable.subscribe_on();

        let mut last = None;
        loop {
            match subscriber.for_each().await {
                Some(Notification::Next(v)) => last = Some(v),
                Some(Notification::Complete) => break,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(last, Some(vec![2, 20]));
    }

    #[tokio::test]
    async fn error_from_any_source_cancels_and_propagates() {
        let observable = throw::<i32>(StreamError::timeout("x"))
            .pipe(combine_latest_with(vec![of(vec![1, 2, 3])]));
        let subscriber = observable.subscribe_on();
        match subscriber.for_each().await {
            Some(Notification::Error(e)) => assert!(e.is_timeout()),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_inner_list_completes_immediately() {
        let outer: Observable<Observable<i32>> = Observable::new(|subscriber| async move {
            subscriber.send(Notification::Complete).await;
        });
        let subscriber = combine_latest_all(outer).subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
    }

    #[tokio::test]
    async fn no_tasks_leak_after_termination() {
        let guard = streamline_test_utils::LeakGuard::new();
        let observable = of(vec![1, 2]).pipe(combine_latest_with(vec![of(vec![10, 20])]));
        streamline_test_utils::collect_notifications(&observable).await;
        tokio::task::yield_now().await;
        guard.assert_no_leaks();
    }
}
