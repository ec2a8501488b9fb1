// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::{Notification, Observable};

/// An observable that emits each value from `values`, in order, then
/// `Complete`.
///
/// This is the `FromSlice` factory: all emissions happen before the
/// producer task yields control back to the scheduler, so the arrival order
/// relative to other synchronous sources subscribed in the same task is
/// deterministic.
#[must_use]
pub fn from_iter<T, I>(values: I) -> Observable<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = T> + Send + 'static,
    I::IntoIter: Send,
{
    Observable::new(move |subscriber| {
        let values = values.into_iter();
        async move {
            for v in values {
                if !subscriber.send(Notification::Next(v)).await {
                    return;
                }
            }
            subscriber.send(Notification::Complete).await;
        }
    })
}

/// An observable that emits each argument as `Next`, in order, then
/// `Complete`. A thin convenience wrapper over [`from_iter`].
#[must_use]
pub fn of<T>(values: Vec<T>) -> Observable<T>
where
    T: Send + 'static,
{
    from_iter(values)
}
