// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A counting barrier ("wait group") used to join spawned sub-tasks before
//! an operator emits its terminal notification (§4.4 step 3).

use event_listener::Event;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A counting join barrier.
///
/// Operators that spawn one task per inner source `add(1)` before spawning
/// and `done()` when that task exits; the coordinating task `wait()`s for
/// the count to reach zero before sending its terminal notification, so no
/// producer outlives the consumer's observation of Complete/Error.
#[derive(Clone, Debug)]
pub struct JoinBarrier {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    count: AtomicUsize,
    event: Event,
}

impl JoinBarrier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                count: AtomicUsize::new(0),
                event: Event::new(),
            }),
        }
    }

    /// Registers `n` additional outstanding tasks.
    pub fn add(&self, n: usize) {
        self.inner.count.fetch_add(n, Ordering::SeqCst);
    }

    /// Marks one outstanding task as finished, waking `wait()` if the
    /// count has reached zero.
    pub fn done(&self) {
        let previous = self.inner.count.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "JoinBarrier::done called more often than add");
        if previous == 1 {
            self.inner.event.notify(usize::MAX);
        }
    }

    /// Waits until the outstanding count reaches zero.
    ///
    /// Resolves immediately if already zero.
    pub async fn wait(&self) {
        loop {
            if self.inner.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            let listener = self.inner.event.listen();
            if self.inner.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            listener.await;
        }
    }
}

impl Default for JoinBarrier {
    fn default() -> Self {
        Self::new()
    }
}
