//! Sync trigger and connectivity probe against in-process servers.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use api::{AppState, create_router, jwt::JwtConfig};
use client::ClientConfig;
use common::{KeyValueStore, MemoryStore, now_millis, storage::LAST_SYNC_KEY};
use notifier::{ConnectivityMonitor, NotificationWorker, RetryPolicy, StoreHost, SyncTrigger};

#[derive(Clone, Default)]
struct Recorder {
    bodies: Arc<Mutex<Vec<Value>>>,
    /// Number of requests to fail before answering
    failures: Arc<AtomicUsize>,
    healthy: Arc<AtomicBool>,
    sync_calls: Arc<AtomicUsize>,
}

async fn sync(State(recorder): State<Recorder>, Json(body): Json<Value>) -> impl IntoResponse {
    recorder.sync_calls.fetch_add(1, Ordering::SeqCst);
    recorder.bodies.lock().expect("lock").push(body);

    let failing = recorder
        .failures
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if failing {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "boom"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"reminders": [], "syncedAt": now_millis()})),
    )
}

async fn health(State(recorder): State<Recorder>) -> impl IntoResponse {
    if recorder.healthy.load(Ordering::SeqCst) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn spawn(router: Router) -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    ClientConfig::new(&format!("http://{}", addr)).expect("config")
}

async fn recording_server(recorder: Recorder) -> ClientConfig {
    let router = Router::new()
        .route("/api/reminders/sync", post(sync))
        .route("/health", get(health))
        .with_state(recorder);
    spawn(router).await
}

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        base_delay: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn first_sync_sends_zero_and_stores_watermark() {
    let recorder = Recorder::default();
    let config = recording_server(recorder.clone()).await;
    let store = MemoryStore::new();
    let trigger = SyncTrigger::new(&config, store.clone(), RetryPolicy::default());

    let before = now_millis();
    let response = trigger.sync_reminders().await;

    assert!(response.is_some());
    assert_eq!(recorder.bodies.lock().unwrap()[0], json!({"lastSync": 0}));
    assert!(trigger.watermark().await.unwrap() >= before);
}

#[tokio::test]
async fn watermark_is_monotonic_across_syncs() {
    let recorder = Recorder::default();
    let config = recording_server(recorder.clone()).await;
    let trigger = SyncTrigger::new(&config, MemoryStore::new(), RetryPolicy::default());

    trigger.sync_reminders().await.unwrap();
    let first = trigger.watermark().await.unwrap();
    trigger.sync_reminders().await.unwrap();
    let second = trigger.watermark().await.unwrap();

    assert!(second >= first);
    let bodies = recorder.bodies.lock().unwrap();
    assert_eq!(bodies[1], json!({"lastSync": first}));
}

#[tokio::test]
async fn stored_future_watermark_is_kept() {
    let recorder = Recorder::default();
    let config = recording_server(recorder).await;
    let store = MemoryStore::new();
    let future = now_millis() + 3_600_000;
    store.set(LAST_SYNC_KEY, &future.to_string()).await.unwrap();

    let trigger = SyncTrigger::new(&config, store, RetryPolicy::default());
    trigger.sync_reminders().await.unwrap();

    assert_eq!(trigger.watermark().await.unwrap(), future);
}

#[tokio::test]
async fn server_error_returns_none_and_keeps_watermark() {
    let recorder = Recorder::default();
    recorder.failures.store(1, Ordering::SeqCst);
    let config = recording_server(recorder.clone()).await;
    let store = MemoryStore::new();
    store.set(LAST_SYNC_KEY, "42").await.unwrap();

    let trigger = SyncTrigger::new(&config, store, RetryPolicy::default());

    assert!(trigger.sync_reminders().await.is_none());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 1);
    assert_eq!(trigger.watermark().await.unwrap(), 42);
}

#[tokio::test]
async fn retries_with_backoff_until_success() {
    let recorder = Recorder::default();
    recorder.failures.store(2, Ordering::SeqCst);
    let config = recording_server(recorder.clone()).await;

    let trigger = SyncTrigger::new(&config, MemoryStore::new(), fast_retry(3));

    assert!(trigger.sync_reminders().await.is_some());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn gives_up_after_max_attempts() {
    let recorder = Recorder::default();
    recorder.failures.store(5, Ordering::SeqCst);
    let config = recording_server(recorder.clone()).await;

    let trigger = SyncTrigger::new(&config, MemoryStore::new(), fast_retry(2));

    assert!(trigger.sync_reminders().await.is_none());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 2);
    assert_eq!(trigger.watermark().await.unwrap(), 0);
}

#[tokio::test]
async fn unreachable_backend_returns_none() {
    let config = ClientConfig::new("http://127.0.0.1:9").unwrap();
    let trigger = SyncTrigger::new(&config, MemoryStore::new(), RetryPolicy::default());
    assert!(trigger.sync_reminders().await.is_none());
}

#[tokio::test]
async fn syncs_against_mock_backend() {
    let config = spawn(create_router(AppState::new(JwtConfig {
        secret: "sync-secret".to_string(),
        token_expiry: 3600,
    })))
    .await;
    let trigger = SyncTrigger::new(&config, MemoryStore::new(), RetryPolicy::default());

    let first = trigger.sync_reminders().await.unwrap();
    assert!(!first.reminders.is_empty());

    // Seed data is older than the stored watermark
    let second = trigger.sync_reminders().await.unwrap();
    assert!(second.reminders.is_empty());
}

#[tokio::test]
async fn restored_connectivity_triggers_one_sync() {
    let recorder = Recorder::default();
    let config = recording_server(recorder.clone()).await;
    let store = MemoryStore::new();
    let sync = SyncTrigger::new(&config, store.clone(), RetryPolicy::default());
    let (worker, _task) = NotificationWorker::new(Arc::new(StoreHost::new(store)), sync).spawn();
    let monitor = ConnectivityMonitor::new(&config, worker);

    assert!(!monitor.check().await.unwrap());
    assert!(!monitor.is_online());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 0);

    recorder.healthy.store(true, Ordering::SeqCst);
    assert!(monitor.check().await.unwrap());
    assert!(monitor.is_online());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 1);

    // Still online: no new sync
    assert!(!monitor.check().await.unwrap());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 1);

    recorder.healthy.store(false, Ordering::SeqCst);
    assert!(!monitor.check().await.unwrap());
    recorder.healthy.store(true, Ordering::SeqCst);
    assert!(monitor.check().await.unwrap());
    assert_eq!(recorder.sync_calls.load(Ordering::SeqCst), 2);
}
