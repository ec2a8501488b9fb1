// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use streamline_core::{Notification, Observable};

/// An observable that emits `Next(0), Next(1), ...` every `period`, and never
/// completes on its own.
///
/// Stops only when the subscription is cancelled — there is no terminal
/// notification to observe on the happy path, so callers are expected to pair
/// `interval` with `take` or an external cancellation.
#[must_use]
pub fn interval(period: Duration) -> Observable<u64> {
    Observable::new(move |subscriber| async move {
        let mut tick = tokio::time::interval(period);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut count: u64 = 0;
        loop {
            tokio::select! {
                biased;
                () = subscriber.closed() => return,
                _ = tick.tick() => {}
            }
            if !subscriber.send(Notification::Next(count)).await {
                return;
            }
            count += 1;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn emits_increasing_counts_until_cancelled() {
        let subscriber = interval(Duration::from_millis(10)).subscribe_on();

        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(0))));
        assert!(matches!(subscriber.for_each().await, Some(Notification::Next(1))));

        subscriber.stop();
        assert!(subscriber.for_each().await.is_none());
    }
}
