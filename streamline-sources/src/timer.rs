// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use streamline_core::{Notification, Observable};

/// An observable that waits `delay`, then emits `Next(())`, `Complete`.
#[must_use]
pub fn timer(delay: Duration) -> Observable<()> {
    Observable::new(move |subscriber| async move {
        tokio::select! {
            biased;
            () = subscriber.closed() => return,
            () = tokio::time::sleep(delay) => {}
        }
        if subscriber.send(Notification::Next(())).await {
            subscriber.send(Notification::Complete).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let subscriber = timer(Duration::from_millis(5)).subscribe_on();
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(()))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
    }
}
