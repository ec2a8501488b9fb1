// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `SwitchAll` (§4.3).
//!
//! §9's open question notes the source this is grounded on never forwards
//! inner `Next` values; this implements the conventional semantics §4.3
//! spells out instead.

use streamline_core::{Notification, Observable, Subscriber};

/// Subscribes to `outer`. Each new inner observable replaces (and cancels)
/// whichever inner is currently active; only the current inner's values are
/// forwarded. Completes once the outer has completed and no inner remains
/// active.
#[must_use]
pub fn switch_all<T>(outer: Observable<Observable<T>>) -> Observable<T>
where
    T: Send + 'static,
{
    Observable::new(move |subscriber| {
        let outer = outer.clone();
        async move {
            let outer_sub = outer.subscribe_on();
            let mut current: Option<Subscriber<T>> = None;
            let mut outer_done = false;

            loop {
                let inner_recv = async {
                    match &current {
                        Some(inner) => inner.for_each().await,
                        None => std::future::pending().await,
                    }
                };

                tokio::select! {
                    biased;
                    () = subscriber.closed() => {
                        if let Some(inner) = current.take() {
                            inner.stop();
                        }
                        outer_sub.stop();
                        return;
                    }
                    outer_item = outer_sub.for_each(), if !outer_done => {
                        match outer_item {
                            Some(Notification::Next(inner_observable)) => {
                                if let Some(prev) = current.take() {
                                    prev.stop();
                                }
                                current = Some(inner_observable.subscribe_on());
                            }
                            Some(Notification::Error(err)) => {
                                if let Some(inner) = current.take() {
                                    inner.stop();
                                }
                                subscriber.send(Notification::Error(err)).await;
                                return;
                            }
                            Some(Notification::Complete) | None => {
                                outer_done = true;
                                if current.is_none() {
                                    subscriber.send(Notification::Complete).await;
                                    return;
                                }
                            }
                        }
                    }
                    inner_item = inner_recv => {
                        match inner_item {
                            Some(Notification::Next(value)) => {
                                if !subscriber.send(Notification::Next(value)).await {
                                    if let Some(inner) = current.take() {
                                        inner.stop();
                                    }
                                    outer_sub.stop();
                                    return;
                                }
                            }
                            Some(Notification::Error(err)) => {
                                current = None;
                                outer_sub.stop();
                                subscriber.send(Notification::Error(err)).await;
                                return;
                            }
                            Some(Notification::Complete) | None => {
                                current = None;
                                if outer_done {
                                    subscriber.send(Notification::Complete).await;
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}
