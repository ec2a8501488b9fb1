// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use streamline_core::{Notification, Observable, StreamError};

/// An observable that immediately emits `Error(err)`, with no `Next`.
#[must_use]
pub fn throw<T>(err: StreamError) -> Observable<T>
where
    T: Send + 'static,
{
    Observable::new(move |subscriber| {
        let err = err.clone();
        async move {
            subscriber.send(Notification::Error(err)).await;
        }
    })
}
