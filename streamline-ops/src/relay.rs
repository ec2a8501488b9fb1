// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A small shared driver every multi-stream operator in this crate builds
//! its coordination loop on: subscribe to one source, race its
//! notifications against a shared cancellation signal, and hand each
//! notification to a per-operator callback.

use std::future::Future;
use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable};

/// Whether [`relay`]'s caller wants to keep pulling from the source.
pub enum RelayControl {
    Continue,
    Stop,
}

/// Subscribes to `source` and feeds every notification to `on_item` until
/// either the source ends or `cancel` fires.
///
/// On return — by any path — the source's own subscription has been
/// stopped, so its upstream work is released promptly (§4.4 step 2).
pub async fn relay<T, F, Fut>(source: Observable<T>, cancel: CancellationToken, mut on_item: F)
where
    T: Send + 'static,
    F: FnMut(Notification<T>) -> Fut,
    Fut: Future<Output = RelayControl>,
{
    let upstream = source.subscribe_on();
    streamline_core::debug!("relay: subscribed to inner source");
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                streamline_core::debug!("relay: cancelled, stopping inner source");
                upstream.stop();
                return;
            }
            item = upstream.for_each() => {
                match item {
                    Some(notification) => match on_item(notification).await {
                        RelayControl::Continue => {}
                        RelayControl::Stop => {
                            upstream.stop();
                            return;
                        }
                    },
                    None => return,
                }
            }
        }
    }
}

/// Marks one [`JoinBarrier`] slot done when dropped, regardless of which
/// path out of the spawning task was taken.
pub struct DoneOnDrop(pub JoinBarrier);

impl Drop for DoneOnDrop {
    fn drop(&mut self) {
        self.0.done();
    }
}
