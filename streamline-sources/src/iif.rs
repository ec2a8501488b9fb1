// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::Observable;

/// An observable that evaluates `condition` at subscribe time and delegates
/// to `if_true` or `if_false` accordingly.
#[must_use]
pub fn iif<T, C>(condition: C, if_true: Observable<T>, if_false: Observable<T>) -> Observable<T>
where
    T: Send + 'static,
    C: Fn() -> bool + Send + Sync + 'static,
{
    Observable::new(move |subscriber| {
        let chosen = if condition() {
            if_true.clone()
        } else {
            if_false.clone()
        };
        async move {
            chosen.subscribe_with(subscriber);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::of;
    use streamline_core::Notification;

    #[tokio::test]
    async fn picks_branch_by_condition() {
        let observable = iif(|| true, of(vec![1]), of(vec![2]));
        let subscriber = observable.subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(1))));
    }

    #[tokio::test]
    async fn picks_false_branch() {
        let observable = iif(|| false, of(vec![1]), of(vec![2]));
        let subscriber = observable.subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(2))));
    }

    #[tokio::test]
    async fn condition_is_re_evaluated_per_subscription() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let flag = Arc::new(AtomicBool::new(true));
        let flag_clone = Arc::clone(&flag);
        let observable = iif(move || flag_clone.load(Ordering::SeqCst), of(vec![1]), of(vec![2]));

        let first = observable.subscribe_on();
        assert!(matches!(first.for_each().await, Some(Notification::Next(1))));

        flag.store(false, Ordering::SeqCst);
        let second = observable.subscribe_on();
        assert!(matches!(second.for_each().await, Some(Notification::Next(2))));
    }
}
