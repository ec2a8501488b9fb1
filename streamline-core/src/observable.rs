// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A subscribable factory for a push sequence of notifications (§4.1, §6).

use crate::{Notification, Subscriber};
use futures::future::BoxFuture;
use std::sync::Arc;

/// A cold, subscribable source of `Notification<T>`.
///
/// `Observable<T>` owns no live state of its own: every call to
/// [`subscribe_on`](Self::subscribe_on) runs the underlying producer closure
/// fresh, on a fresh [`Subscriber`]. Subscribing twice starts two
/// independent production runs.
pub struct Observable<T> {
    produce: Arc<dyn Fn(Subscriber<T>) -> BoxFuture<'static, ()> + Send + Sync>,
}

impl<T> Observable<T> {
    /// Builds an `Observable` from a producer closure.
    ///
    /// `f` is called once per subscription with a fresh [`Subscriber<T>`];
    /// the future it returns *is* the production work, and should send zero
    /// or more `Next` notifications followed by exactly one terminal
    /// notification, honoring `subscriber.closed()` at every suspension
    /// point.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Subscriber<T>) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            produce: Arc::new(move |subscriber| Box::pin(f(subscriber))),
        }
    }

    /// Subscribes with a fresh [`Subscriber`] of the given channel capacity,
    /// spawning the producer as a background task, and returns the
    /// subscriber handle for the caller to consume.
    #[must_use]
    pub fn subscribe_on_with_capacity(&self, capacity: usize) -> Subscriber<T>
    where
        T: Send + 'static,
    {
        let subscriber = Subscriber::with_capacity(capacity);
        self.subscribe_with(subscriber.clone());
        subscriber
    }

    /// Subscribes with a fresh [`Subscriber`] of default capacity.
    #[must_use]
    pub fn subscribe_on(&self) -> Subscriber<T>
    where
        T: Send + 'static,
    {
        self.subscribe_on_with_capacity(crate::subscriber::DEFAULT_CAPACITY)
    }

    /// Subscribes by running the producer against an already-constructed
    /// [`Subscriber`], spawning it as a background task.
    ///
    /// This is how operators feed a transformed stream straight into the
    /// subscriber the *downstream* consumer already holds, instead of
    /// allocating an extra channel per operator layer.
    pub fn subscribe_with(&self, subscriber: Subscriber<T>)
    where
        T: Send + 'static,
    {
        let produce = Arc::clone(&self.produce);
        tokio::spawn(async move {
            produce(subscriber).await;
        });
    }

    /// Drives a subscription to completion, invoking the matching callback
    /// for every notification observed.
    ///
    /// Blocks (in the async sense: the returned future does not resolve)
    /// until a terminal notification is observed.
    pub async fn subscribe_sync(
        &self,
        mut on_next: impl FnMut(T),
        mut on_error: impl FnMut(crate::StreamError),
        mut on_complete: impl FnMut(),
    ) where
        T: Send + 'static,
    {
        let subscriber = self.subscribe_on();
        while let Some(notification) = subscriber.for_each().await {
            match notification {
                Notification::Next(value) => on_next(value),
                Notification::Error(err) => {
                    on_error(err);
                    break;
                }
                Notification::Complete => {
                    on_complete();
                    break;
                }
            }
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            produce: Arc::clone(&self.produce),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn of_values(values: Vec<i32>) -> Observable<i32> {
        Observable::new(move |subscriber| {
            let values = values.clone();
            async move {
                for v in values {
                    if !subscriber.send(Notification::Next(v)).await {
                        return;
                    }
                }
                subscriber.send(Notification::Complete).await;
            }
        })
    }

    #[tokio::test]
    async fn subscribe_sync_dispatches_all_callbacks() {
        let observable = of_values(vec![1, 2, 3]);
        let seen = Mutex::new(Vec::new());
        let mut completed = false;

        observable
            .subscribe_sync(
                |v| seen.lock().unwrap().push(v),
                |_| panic!("unexpected error"),
                || completed = true,
            )
            .await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
        assert!(completed);
    }

    #[tokio::test]
    async fn cold_subscriptions_are_independent() {
        let observable = of_values(vec![1, 2]);

        let sub_a = observable.subscribe_on();
        let sub_b = observable.subscribe_on();

        assert!(matches!(sub_a.for_each().await, Some(Notification::Next(1))));
        assert!(matches!(sub_b.for_each().await, Some(Notification::Next(1))));
        assert!(matches!(sub_a.for_each().await, Some(Notification::Next(2))));
        assert!(matches!(sub_b.for_each().await, Some(Notification::Next(2))));
    }

    #[tokio::test]
    async fn subscribe_with_feeds_existing_subscriber() {
        let observable = of_values(vec![42]);
        let subscriber = Subscriber::new();
        observable.subscribe_with(subscriber.clone());

        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(42))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
    }
}
