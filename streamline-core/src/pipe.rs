// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fluent pipeline composition (§6 "public surface").

use crate::Observable;

impl<T> Observable<T> {
    /// Applies one operator transformer to this observable.
    ///
    /// `pipe` composes left-to-right: `a.pipe(op1).pipe(op2)` applies `op1`
    /// then `op2`. This replaces the original's numbered `Pipe1..Pipe9`
    /// helpers (a workaround for a generics limitation this codebase does
    /// not share) with ordinary method chaining.
    #[must_use]
    pub fn pipe<O>(self, op: impl FnOnce(Observable<T>) -> Observable<O>) -> Observable<O> {
        op(self)
    }
}

/// Composes a source observable with any number of operator transformers,
/// applied left to right.
///
/// ```ignore
/// let result = pipe!(source, take(3), map(|v| v * 2));
/// ```
#[macro_export]
macro_rules! pipe {
    ($source:expr $(, $op:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut __piped = $source;
        $(
            __piped = __piped.pipe($op);
        )*
        __piped
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Notification, Observable};

    fn of_one(v: i32) -> Observable<i32> {
        Observable::new(move |subscriber| async move {
            subscriber.send(Notification::Next(v)).await;
            subscriber.send(Notification::Complete).await;
        })
    }

    fn double() -> impl FnOnce(Observable<i32>) -> Observable<i32> {
        |source: Observable<i32>| {
            Observable::new(move |subscriber| {
                let source = source.clone();
                async move {
                    let upstream = source.subscribe_on();
                    while let Some(item) = upstream.for_each().await {
                        let forward = item.map(|v| v * 2);
                        if !subscriber.send(forward).await {
                            return;
                        }
                    }
                }
            })
        }
    }

    #[tokio::test]
    async fn pipe_applies_single_operator() {
        let result = of_one(5).pipe(double());
        let sub = result.subscribe_on();
        assert!(matches!(sub.for_each().await, Some(Notification::Next(10))));
    }

    #[tokio::test]
    async fn pipe_macro_chains_operators() {
        let result = pipe!(of_one(2), double(), double());
        let sub = result.subscribe_on();
        assert!(matches!(sub.for_each().await, Some(Notification::Next(8))));
    }
}
