// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::{Notification, Observable};

/// An observable that emits `count` consecutive integers starting at `start`,
/// then `Complete`.
///
/// `count == 0` emits `Complete` only.
#[must_use]
pub fn range(start: i64, count: u64) -> Observable<i64> {
    Observable::new(move |subscriber| async move {
        for v in start..start.saturating_add(count as i64) {
            if !subscriber.send(Notification::Next(v)).await {
                return;
            }
        }
        subscriber.send(Notification::Complete).await;
    })
}
