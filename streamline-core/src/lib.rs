// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core subscription runtime for Streamline: a reactive-streams operator
//! library.
//!
//! This crate defines the three pieces every operator in `streamline-ops`
//! and `streamline-sources` builds on:
//!
//! - [`Notification<T>`] — the tagged value pushed through a subscription.
//! - [`Subscriber<T>`] — the per-subscription channel, cancellation signal,
//!   and finalizer list shared by producer and consumer.
//! - [`Observable<T>`] — a cold, subscribable factory.
//!
//! Alongside those, [`CancellationToken`], [`TaskHandle`], and
//! [`JoinBarrier`] are the concurrency primitives every multi-stream
//! operator composes to implement the cancellation/teardown protocol.

pub mod cancellation;
mod error;
mod join_barrier;
pub mod logging;
mod notification;
mod observable;
mod pipe;
pub mod subscriber;
mod task;

pub use cancellation::CancellationToken;
pub use error::{Result, StreamError};
pub use join_barrier::JoinBarrier;
pub use notification::Notification;
pub use observable::Observable;
pub use subscriber::Subscriber;
pub use task::{active_task_count, TaskHandle};

/// Convenience re-exports for downstream operator crates and users.
pub mod prelude {
    pub use crate::{
        CancellationToken, JoinBarrier, Notification, Observable, Result, StreamError, Subscriber,
        TaskHandle,
    };
}
