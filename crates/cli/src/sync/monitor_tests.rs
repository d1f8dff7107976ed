// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the connectivity monitor.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::monitor::{ConnectivityEvent, ConnectivityMonitor, Probe, SharedConnectivity, TcpProbe};
use super::notify::FLUSH_CONFIRMATION;
use super::test_helpers::{make_payload, make_queue};
use super::transport_tests::MockTransport;
use tokio::net::TcpListener;

const TICK: Duration = Duration::from_millis(10);

/// Probe whose answer is set by the test.
#[derive(Clone, Default)]
pub struct MockProbe {
    online: Arc<AtomicBool>,
    checks: Arc<AtomicUsize>,
}

impl MockProbe {
    pub fn new(online: bool) -> Self {
        let probe = Self::default();
        probe.set_online(online);
        probe
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl Probe for MockProbe {
    fn check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let online = self.online.load(Ordering::SeqCst);
        Box::pin(async move { online })
    }
}

/// Poll `cond` until it holds or a second passes.
async fn eventually(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if cond() {
            return true;
        }
        tokio::time::sleep(TICK).await;
    }
    cond()
}

#[test]
fn shared_connectivity_starts_offline() {
    let state = SharedConnectivity::new();
    assert!(!state.is_online());

    assert!(!state.set(true));
    assert!(state.is_online());
    assert!(state.set(false));
    assert!(!state.is_online());
}

#[tokio::test]
async fn check_now_emits_only_on_transitions() {
    let probe = MockProbe::new(false);
    let (monitor, mut events) = ConnectivityMonitor::new(probe.clone(), TICK);

    assert!(!monitor.check_now().await);
    assert!(events.try_recv().is_err());

    probe.set_online(true);
    assert!(monitor.check_now().await);
    assert_eq!(events.try_recv().unwrap(), ConnectivityEvent::Online);

    assert!(monitor.check_now().await);
    assert!(events.try_recv().is_err());

    probe.set_online(false);
    assert!(!monitor.check_now().await);
    assert_eq!(events.try_recv().unwrap(), ConnectivityEvent::Offline);
    assert!(!monitor.shared().is_online());
}

#[tokio::test]
async fn check_startup_records_state_without_event() {
    let (monitor, mut events) = ConnectivityMonitor::new(MockProbe::new(true), TICK);

    assert!(monitor.check_startup().await);
    assert!(monitor.shared().is_online());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn notify_online_always_emits() {
    let (monitor, mut events) = ConnectivityMonitor::new(MockProbe::new(true), TICK);
    monitor.check_startup().await;

    monitor.notify_online();

    assert_eq!(events.try_recv().unwrap(), ConnectivityEvent::Online);
}

#[tokio::test]
async fn poll_task_reports_flapping_and_stops_on_cancel() {
    let probe = MockProbe::new(false);
    let (monitor, mut events) = ConnectivityMonitor::new(probe.clone(), TICK);
    let poller = monitor.spawn_poll_task();

    probe.set_online(true);
    assert_eq!(events.recv().await, Some(ConnectivityEvent::Online));
    probe.set_online(false);
    assert_eq!(events.recv().await, Some(ConnectivityEvent::Offline));
    probe.set_online(true);
    assert_eq!(events.recv().await, Some(ConnectivityEvent::Online));

    monitor.cancel();
    poller.await.unwrap();
    let checks = probe.checks();
    tokio::time::sleep(TICK * 3).await;
    assert_eq!(probe.checks(), checks);
}

#[tokio::test]
async fn run_flushes_at_startup_when_online() {
    let transport = MockTransport::new();
    let (queue, store, notifier) = make_queue(transport.clone());
    queue.enqueue_on_failure(make_payload("Plain")).await.unwrap();

    let (monitor, events) = ConnectivityMonitor::new(MockProbe::new(true), TICK);
    let monitor = Arc::new(monitor);
    let runner = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        async move { monitor.run(queue, events).await }
    });

    assert!(eventually(|| store.is_empty().unwrap()).await);
    assert_eq!(transport.request_count(), 1);
    assert_eq!(notifier.messages(), vec![FLUSH_CONFIRMATION.to_string()]);

    monitor.cancel();
    runner.await.unwrap();
}

#[tokio::test]
async fn run_waits_offline_then_flushes_on_reconnect() {
    let transport = MockTransport::new();
    let (queue, store, _) = make_queue(transport.clone());
    queue.enqueue_on_failure(make_payload("Plain")).await.unwrap();

    let probe = MockProbe::new(false);
    let (monitor, events) = ConnectivityMonitor::new(probe.clone(), TICK);
    let monitor = Arc::new(monitor);
    let runner = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        async move { monitor.run(queue, events).await }
    });

    tokio::time::sleep(TICK * 5).await;
    assert_eq!(transport.request_count(), 0);
    assert_eq!(store.len().unwrap(), 1);

    probe.set_online(true);
    assert!(eventually(|| store.is_empty().unwrap()).await);
    assert_eq!(transport.request_count(), 1);

    monitor.cancel();
    runner.await.unwrap();
}

#[tokio::test]
async fn run_flushes_on_manual_trigger() {
    let transport = MockTransport::new();
    let (queue, store, _) = make_queue(transport.clone());

    let (monitor, events) = ConnectivityMonitor::new(MockProbe::new(true), Duration::from_secs(60));
    let monitor = Arc::new(monitor);
    let runner = tokio::spawn({
        let monitor = Arc::clone(&monitor);
        let queue = Arc::clone(&queue);
        async move { monitor.run(queue, events).await }
    });

    // Startup flush of an empty queue makes no request.
    tokio::time::sleep(TICK * 3).await;
    assert_eq!(transport.request_count(), 0);

    queue.enqueue_on_failure(make_payload("Plain")).await.unwrap();
    monitor.notify_online();

    assert!(eventually(|| store.is_empty().unwrap()).await);
    assert_eq!(transport.request_count(), 1);

    monitor.cancel();
    runner.await.unwrap();
}

#[tokio::test]
async fn tcp_probe_detects_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let probe = TcpProbe::new(addr.clone(), Duration::from_secs(1));

    assert_eq!(probe.addr(), addr);
    assert!(probe.check().await);

    drop(listener);
    assert!(!probe.check().await);
}

/// Probe that flips its answer on every check.
#[derive(Clone, Default)]
struct FlappingProbe {
    online: Arc<AtomicBool>,
    checks: Arc<AtomicUsize>,
}

impl Probe for FlappingProbe {
    fn check(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let online = !self.online.fetch_xor(true, Ordering::SeqCst);
        Box::pin(async move { online })
    }
}

#[tokio::test]
async fn poll_task_stops_on_cancel_while_channel_is_full() {
    let probe = FlappingProbe::default();
    let (monitor, events) = ConnectivityMonitor::new(probe.clone(), Duration::from_millis(1));
    let poller = monitor.spawn_poll_task();

    // Nobody drains `events`, so the task ends up blocked on a full channel.
    assert!(eventually(|| probe.checks.load(Ordering::SeqCst) > 16).await);
    tokio::time::sleep(TICK * 3).await;

    monitor.cancel();
    tokio::time::timeout(Duration::from_secs(1), poller)
        .await
        .expect("poll task did not stop")
        .unwrap();
    drop(events);
}

#[tokio::test]
async fn trigger_reports_online_from_another_task() {
    let (monitor, mut events) = ConnectivityMonitor::new(MockProbe::new(false), TICK);
    assert!(!monitor.check_startup().await);

    let trigger = monitor.trigger();
    tokio::spawn(async move { trigger.notify_online() })
        .await
        .unwrap();

    assert!(monitor.shared().is_online());
    assert_eq!(events.recv().await, Some(ConnectivityEvent::Online));
}
