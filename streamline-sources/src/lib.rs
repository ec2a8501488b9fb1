// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Source factories and simple unary transforms for Streamline observables.
//!
//! Everything here builds `Observable<T>` values directly on
//! `streamline_core`'s primitives; none of it needs the multi-stream
//! coordination state that lives in `streamline-ops`.

mod defer;
mod empty;
mod iif;
mod interval;
mod map;
mod of;
mod range;
mod scheduled;
mod take;
mod tap;
mod throw;
mod timer;

pub use defer::defer;
pub use empty::empty;
pub use iif::iif;
pub use interval::interval;
pub use map::map;
pub use of::{from_iter, of};
pub use range::range;
pub use scheduled::scheduled;
pub use take::take;
pub use tap::{tap, TapObserver};
pub use throw::throw;
pub use timer::timer;
