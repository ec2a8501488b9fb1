// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-subscription handle shared by producer and consumer (§4.1).

use crate::{CancellationToken, Notification};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default bound on the notification channel (§4.1 "Channel sizing").
pub const DEFAULT_CAPACITY: usize = 16;

/// The handle a producer uses to send notifications, and a consumer uses to
/// receive them and to cancel.
///
/// `Subscriber<T>` is the single shared object described in §4.1: producer
/// and consumer code both hold a clone of the same `Subscriber`, backed by
/// one bounded MPMC channel. Cloning is cheap (an `Arc` bump).
pub struct Subscriber<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    sender: async_channel::Sender<Notification<T>>,
    receiver: async_channel::Receiver<Notification<T>>,
    closed: CancellationToken,
    ended: AtomicBool,
    stopped: AtomicBool,
    finalizers: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
}

impl<T> Subscriber<T> {
    /// Creates a fresh subscriber with the given channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = async_channel::bounded(capacity.max(1));
        Self {
            inner: Arc::new(Inner {
                sender,
                receiver,
                closed: CancellationToken::new(),
                ended: AtomicBool::new(false),
                stopped: AtomicBool::new(false),
                finalizers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a fresh subscriber with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Sends a notification to the consumer.
    ///
    /// Silently dropped (returns `false`) if a terminal notification has
    /// already been sent, or if the subscription has been stopped. Suspends
    /// on a full channel, racing against the `closed` signal so a cancelled
    /// consumer never leaves the producer blocked (§5 "every suspend point
    /// must be selectable together with the cancellation signal").
    ///
    /// `closed` itself only fires once the consumer observes a terminal
    /// notification via [`for_each`](Self::for_each) (or calls
    /// [`stop`](Self::stop) directly) — a successful `send` of a terminal
    /// notification does not by itself close the subscription, so the
    /// notification already sitting in the channel is still delivered.
    pub async fn send(&self, item: Notification<T>) -> bool {
        if self.inner.ended.load(Ordering::Acquire) || self.is_closed() {
            return false;
        }

        let is_end = item.is_end();
        // Reserve the terminal slot up front so two producers racing to
        // deliver a terminal notification onto one shared subscriber (the
        // multi-stream operators all fan in this way) can't both succeed.
        if is_end && self.inner.ended.swap(true, Ordering::AcqRel) {
            return false;
        }

        tokio::select! {
            biased;
            () = self.inner.closed.cancelled() => false,
            result = self.inner.sender.send(item) => result.is_ok(),
        }
    }

    /// Receives the next notification, or `None` once the subscription has
    /// been stopped or the channel has no more producers.
    ///
    /// Per §4.1's "closing drains no further items": once `stop()` has run
    /// (whether from an earlier terminal notification or an explicit
    /// cancellation), `for_each` returns `None` even if notifications remain
    /// buffered. Receiving a terminal notification here triggers `stop()`
    /// after the item is pulled off the channel, so the terminal
    /// notification itself is still returned to the caller.
    pub async fn for_each(&self) -> Option<Notification<T>> {
        if self.is_closed() {
            return None;
        }

        let item = tokio::select! {
            biased;
            () = self.inner.closed.cancelled() => return None,
            item = self.inner.receiver.recv() => item.ok()?,
        };

        if item.is_end() {
            self.stop();
        }

        Some(item)
    }

    /// A future that resolves once this subscription is closed (either the
    /// consumer cancelled it, or a terminal notification was observed).
    pub fn closed(&self) -> crate::cancellation::Cancelled<'_> {
        self.inner.closed.cancelled()
    }

    /// `true` if this subscription has been stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.is_cancelled()
    }

    /// Registers a finalizer to run once, on the first of end-notification
    /// delivery or `stop()`. Finalizers run in reverse registration order.
    ///
    /// If the subscription has already stopped, the finalizer runs
    /// immediately.
    pub fn on_finalize(&self, f: impl FnOnce() + Send + 'static) {
        if self.inner.stopped.load(Ordering::Acquire) {
            f();
            return;
        }
        let mut finalizers = self.inner.finalizers.lock();
        // Re-check under the lock: stop() may have run between the load
        // above and acquiring the lock.
        if self.inner.stopped.load(Ordering::Acquire) {
            drop(finalizers);
            f();
            return;
        }
        finalizers.push(Box::new(f));
    }

    /// Idempotently stops the subscription: signals `closed`, then runs all
    /// registered finalizers in reverse registration order.
    pub fn stop(&self) {
        if self.inner.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.closed.cancel();

        let finalizers = std::mem::take(&mut *self.inner.finalizers.lock());
        for finalizer in finalizers.into_iter().rev() {
            finalizer();
        }
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Subscriber<T> {
    fn default() -> Self {
        Self::new()
    }
}
