// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::{Notification, Observable};

/// An observable that emits `Complete` immediately, with no `Next` values.
#[must_use]
pub fn empty<T>() -> Observable<T>
where
    T: Send + 'static,
{
    Observable::new(|subscriber| async move {
        subscriber.send(Notification::Complete).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_only_complete() {
        let subscriber = empty::<i32>().subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
        assert!(subscriber.for_each().await.is_none());
    }
}
