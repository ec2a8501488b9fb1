// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::Observable;

/// An observable that calls `factory` fresh on every subscription and
/// delegates to the resulting observable.
///
/// Every `Observable` is already cold (re-run per subscription); `defer`
/// additionally defers *building* the observable itself until subscribe
/// time, which matters when constructing it has side effects or depends on
/// state read at subscription time.
#[must_use]
pub fn defer<T, F>(factory: F) -> Observable<T>
where
    T: Send + 'static,
    F: Fn() -> Observable<T> + Send + Sync + 'static,
{
    Observable::new(move |subscriber| {
        let inner = factory();
        async move {
            inner.subscribe_with(subscriber);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::of;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use streamline_core::Notification;

    #[tokio::test]
    async fn factory_runs_once_per_subscription() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let observable = defer(move || {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            of(vec![1])
        });

        let sub_a = observable.subscribe_on();
        assert!(matches!(sub_a.for_each().await, Some(Notification::Next(1))));
        let sub_b = observable.subscribe_on();
        assert!(matches!(sub_b.for_each().await, Some(Notification::Next(1))));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
