//! Integration tests for [`WebhookNotifier`] against a throwaway HTTP sink.
//!
//! The sink is a tiny axum app bound to an ephemeral port on loopback that
//! records every JSON body it receives.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use redteam_core::results::BlackBoxResults;
use redteam_core::status::StatusNotification;
use redteam_events::{Notifier, WebhookError, WebhookNotifier};

type Received = Arc<Mutex<Vec<serde_json::Value>>>;

async fn accept(State(received): State<Received>, Json(body): Json<serde_json::Value>) -> StatusCode {
    received.lock().unwrap().push(body);
    StatusCode::OK
}

async fn reject() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

/// Start the sink and return its address plus the shared body log.
async fn spawn_sink() -> (SocketAddr, Received) {
    let received: Received = Arc::default();
    let app = Router::new()
        .route("/hook", post(accept))
        .route("/down", post(reject))
        .with_state(Arc::clone(&received));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, received)
}

// ---------------------------------------------------------------------------
// Test: notifications arrive with the sink's expected body shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delivers_json_body_to_sink() {
    let (addr, received) = spawn_sink().await;
    let notifier =
        WebhookNotifier::new(format!("http://{addr}/hook"), Duration::from_secs(5)).unwrap();

    notifier.notify(&StatusNotification::running("t9", 40)).await;
    notifier
        .notify(&StatusNotification::completed(
            "t9",
            BlackBoxResults::new(0.61, 3.2, 900, "Phishing").into(),
        ))
        .await;

    let bodies = received.lock().unwrap().clone();
    assert_eq!(bodies.len(), 2);

    assert_eq!(bodies[0]["testId"], "t9");
    assert_eq!(bodies[0]["status"], "running");
    assert_eq!(bodies[0]["results"]["progress"], 40);
    assert!(bodies[0]["error"].is_null());

    assert_eq!(bodies[1]["status"], "completed");
    assert_eq!(bodies[1]["results"]["tokenUsage"], 900);
    assert_eq!(bodies[1]["results"]["categoryWiseASR"]["Phishing"], 0.61);
}

// ---------------------------------------------------------------------------
// Test: non-2xx responses surface from deliver() but not from notify()
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_reported_then_swallowed() {
    let (addr, _received) = spawn_sink().await;
    let notifier =
        WebhookNotifier::new(format!("http://{addr}/down"), Duration::from_secs(5)).unwrap();
    let notification = StatusNotification::failed("t3", "boom");

    let err = notifier.deliver(&notification).await.unwrap_err();
    assert!(matches!(err, WebhookError::HttpStatus(503)));

    notifier.notify(&notification).await;
}

// ---------------------------------------------------------------------------
// Test: an unreachable sink never escapes notify()
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_sink_is_swallowed() {
    // Bind then drop a listener so the port is very likely closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier =
        WebhookNotifier::new(format!("http://{addr}/hook"), Duration::from_secs(2)).unwrap();
    let notification = StatusNotification::running("t4", 0);

    assert!(matches!(
        notifier.deliver(&notification).await,
        Err(WebhookError::Request(_))
    ));
    notifier.notify(&notification).await;
}
