// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Streamline
//!
//! A reactive stream processing library built on push-based `Observable`s,
//! bounded backpressure, and cooperative cancellation.
//!
//! ## Overview
//!
//! An [`Observable<T>`] is a cold, cloneable factory: subscribing spawns a
//! fresh producer that pushes [`Notification<T>`] values to a
//! [`Subscriber<T>`] until it emits `Error` or `Complete`. Unsubscribing
//! (dropping the last handle, or letting the stream's own cancellation fire)
//! stops the producer and runs its finalizers.
//!
//! ## Quick start
//!
//! ```rust
//! use streamline::prelude::*;
//! use streamline::sources::of;
//! use streamline::ops::map;
//!
//! # async fn run() {
//! let doubled = of(vec![1, 2, 3]).pipe(map(|v: i32| v * 2));
//! let subscriber = doubled.subscribe_on();
//! while let Some(notification) = subscriber.for_each().await {
//!     if let Some(value) = notification.value() {
//!         println!("{value}");
//!     }
//! }
//! # }
//! ```
//!
//! ## Layout
//!
//! - [`streamline_core`] — the subscription runtime: `Observable`,
//!   `Subscriber`, `Notification`, cancellation, and task bookkeeping.
//! - [`streamline_sources`] — source factories (`of`, `range`, `interval`,
//!   ...) and single-stream transforms (`map`, `take`, `tap`).
//! - [`streamline_ops`] — multi-stream coordination operators
//!   (`combine_latest_with`, `merge_with`, `zip_with`, ...) and time-aware
//!   unary operators (`delay`, `timeout`, `repeat`, `to_slice`).

pub use streamline_core as core;
pub use streamline_ops as ops;
pub use streamline_sources as sources;

pub use streamline_core::{CancellationToken, JoinBarrier, Notification, Observable, Result, StreamError, Subscriber, TaskHandle};

/// Convenience re-exports covering the common entry points: the core
/// runtime types plus the source factories and operators used in most
/// pipelines.
pub mod prelude {
    pub use streamline_core::prelude::*;
    pub use streamline_ops::{
        combine_latest_all, combine_latest_with, concat_all, concat_with, delay, delay_when,
        fork_join, merge_with, race_with, repeat, switch_all, timeout, to_slice, with_latest_from,
        zip_all, zip_with, RepeatConfig, TimeoutConfig,
    };
    pub use streamline_sources::{
        defer, empty, from_iter, iif, interval, map, of, range, scheduled, take, tap, throw,
        timer, TapObserver,
    };
}
