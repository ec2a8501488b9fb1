// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `ConcatAll` / `ConcatWith` (§4.3): strict sequential subscription, at
//! most one upstream active at a time.

use streamline_core::{Notification, Observable, Subscriber};

async fn concat_core<T>(sources: Vec<Observable<T>>, subscriber: Subscriber<T>)
where
    T: Send + 'static,
{
    for source in sources {
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
    }
    subscriber.send(Notification::Complete).await;
}

/// `ConcatWith`: runs the piped-in source, then each of `others`, in order.
#[must_use]
pub fn concat_with<T>(others: Vec<Observable<T>>) -> impl FnOnce(Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    move |source: Observable<T>| {
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(source);
        sources.extend(others);
        Observable::new(move |subscriber| {
            let sources = sources.clone();
            async move { concat_core(sources, subscriber).await }
        })
    }
}

/// `ConcatAll`: `outer` yields inner observables, collected in arrival
/// order; concatenation begins only once `outer` completes.
#[must_use]
pub fn concat_all<T>(outer: Observable<Observable<T>>) -> Observable<T>
where
    T: Send + 'static,
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
            concat_core(inners, subscriber).await;
        }
    })
}
