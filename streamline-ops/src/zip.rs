// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! `ZipAll` / `ZipWith` (§4.3): round-robin pairing, one value per source
//! per round.

use streamline_core::{Notification, Observable, Subscriber};

async fn zip_core<T>(sources: Vec<Observable<T>>, subscriber: Subscriber<T>)
where
    T: Send + 'static,
{
    if sources.is_empty() {
        subscriber.send(Notification::Complete).await;
        return;
    }

    let upstreams: Vec<_> = sources.into_iter().map(|s| s.subscribe_on()).collect();

    'rounds: loop {
        let mut row = Vec::with_capacity(upstreams.len());
        for upstream in &upstreams {
            tokio::select! {
                biased;
                () = subscriber.closed() => {
                    for u in &upstreams { u.stop(); }
                    return;
                }
                item = upstream.for_each() => {
                    match item {
                        Some(Notification::Next(value)) => row.push(value),
                        Some(Notification::Error(err)) => {
                            for u in &upstreams { u.stop(); }
                            subscriber.send(Notification::Error(err)).await;
                            return;
                        }
                        // any source ending, even mid-round, ends the zip with no partial row.
                        Some(Notification::Complete) | None => {
                            for u in &upstreams { u.stop(); }
                            subscriber.send(Notification::Complete).await;
                            return;
                        }
                    }
                }
            }
        }

        if !subscriber.send(Notification::Next(row)).await {
            for u in &upstreams { u.stop(); }
            return;
        }
        continue 'rounds;
    }
}

/// `ZipWith`: pairs the piped-in source with `others`, one value from each
/// per round, in the order the sources were given.
#[must_use]
pub fn zip_with<T>(others: Vec<Observable<T>>) -> impl FnOnce(Observable<T>) -> Observable<Vec<T>>
where
    T: Send + 'static,
{
    move |source: Observable<T>| {
        let mut sources = Vec::with_capacity(others.len() + 1);
        sources.push(source);
        sources.extend(others);
        Observable::new(move |subscriber| {
            let sources = sources.clone();
            async move { zip_core(sources, subscriber).await }
        })
    }
}

/// `ZipAll`: `outer` yields the sources to zip, collected before zipping
/// begins.
#[must_use]
pub fn zip_all<T>(outer: Observable<Observable<T>>) -> Observable<Vec<T>>
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
            zip_core(inners, subscriber).await;
        }
    })
}
