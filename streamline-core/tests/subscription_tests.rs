// Copyright 2025 Streamline Authors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Integration tests for the subscription runtime's universal invariants.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use streamline_core::{Notification, Observable, Subscriber};

fn counting_source(n: i32) -> Observable<i32> {
    Observable::new(move |subscriber| async move {
        for v in 0..n {
            if !subscriber.send(Notification::Next(v)).await {
                return;
            }
        }
        subscriber.send(Notification::Complete).await;
    })
}

#[tokio::test]
async fn exactly_one_terminal_notification_is_delivered() {
    let observable = counting_source(3);
    let subscriber = observable.subscribe_on();

    let mut terminals = 0;
    while let Some(item) = subscriber.for_each().await {
        if item.is_end() {
            terminals += 1;
        }
    }
    assert_eq!(terminals, 1);
}

#[tokio::test]
async fn channel_is_closed_after_terminal_with_no_further_items() {
    let observable = counting_source(1);
    let subscriber = observable.subscribe_on();

    assert!(matches!(subscriber.for_each().await, Some(Notification::Next(0))));
    assert!(matches!(subscriber.for_each().await, Some(Notification::Complete)));
    assert!(subscriber.for_each().await.is_none());
    assert!(subscriber.for_each().await.is_none());
}

#[tokio::test]
async fn consumer_cancellation_unblocks_a_blocked_producer() {
    let subscriber = Subscriber::<i32>::with_capacity(1);
    let producer = subscriber.clone();

    // Fill the one-slot channel, then try to send a second item which
    // would otherwise block forever.
    assert!(producer.send(Notification::Next(1)).await);

    let send_task = tokio::spawn(async move { producer.send(Notification::Next(2)).await });

    tokio::task::yield_now().await;
    subscriber.stop();

    let delivered = send_task.await.unwrap();
    assert!(!delivered);
}

#[tokio::test]
async fn finalizers_act_as_a_join_barrier_for_child_tasks() {
    let subscriber = Subscriber::<i32>::new();
    let child_done = Arc::new(AtomicUsize::new(0));
    let child_done_clone = Arc::clone(&child_done);

    subscriber.on_finalize(move || {
        child_done_clone.fetch_add(1, Ordering::SeqCst);
    });

    subscriber.send(Notification::Complete).await;
    subscriber.for_each().await; // observe the terminal, triggering stop()

    assert_eq!(child_done.load(Ordering::SeqCst), 1);
}
