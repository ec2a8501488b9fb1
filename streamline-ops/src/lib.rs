// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multi-stream coordination operators and time-aware unary operators for
//! Streamline observables.
//!
//! Everything in `streamline-sources` builds `Observable<T>` values
//! directly; the operators here additionally need shared coordination
//! state (join barriers, cancellation tokens, error slots) across more than
//! one subscription, which is why they live in their own crate.

mod combine_latest;
mod concat;
mod config;
mod delay;
mod fork_join;
mod merge_with;
mod race_with;
mod relay;
mod repeat;
mod switch_all;
mod timeout;
mod to_slice;
mod with_latest_from;
mod zip;

pub use combine_latest::{combine_latest_all, combine_latest_with};
pub use concat::{concat_all, concat_with};
pub use config::{RepeatConfig, TimeoutConfig};
pub use delay::{delay, delay_when};
pub use fork_join::fork_join;
pub use merge_with::merge_with;
pub use race_with::race_with;
pub use repeat::repeat;
pub use switch_all::switch_all;
pub use timeout::timeout;
pub use to_slice::to_slice;
pub use with_latest_from::with_latest_from;
pub use zip::{zip_all, zip_with};
