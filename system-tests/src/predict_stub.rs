// system-tests/src/predict_stub.rs
// ============================================================================
// Module: Prediction Stub
// Description: Minimal wine-quality prediction endpoint for system-tests.
// Purpose: Exercise probe pass and fail paths over real HTTP.
// Dependencies: axum, serde_json, tokio, url, wine-probe
// ============================================================================

//! ## Overview
//! The stub serves `POST /predict`. In validating mode it decodes the body as
//! an all-numeric wine feature vector, answering `422` with a `detail` message
//! when decoding fails and `200` with a deterministic `wine_quality` score
//! otherwise. Fixed mode answers every request with one scripted status and
//! body, which covers misbehaving services. Every request body is recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use url::Url;
use wine_probe::ValidWineFeatures;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Response behavior of the stub.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    /// Decode the body and score it, or reject it with `422`.
    Validating,
    /// Answer every request with the same status and body.
    Fixed {
        /// HTTP status code.
        status: u16,
        /// JSON response body.
        body: Value,
    },
}

/// Shared log of decoded request bodies; undecodable bodies are kept as strings.
pub type RequestLog = Arc<Mutex<Vec<Value>>>;

/// Router state.
#[derive(Clone)]
struct StubState {
    /// Active behavior.
    behavior: StubBehavior,
    /// Captured request bodies.
    requests: RequestLog,
}

/// Handle for a stub running on a background thread.
pub struct PredictStubHandle {
    /// Prediction endpoint URL.
    endpoint: Url,
    /// Shutdown trigger for the server.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
    /// Captured request bodies.
    requests: RequestLog,
}

impl PredictStubHandle {
    /// Returns the prediction endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns captured request bodies in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl Drop for PredictStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Builds the stub router and returns it with its request log.
#[must_use]
pub fn predict_router(behavior: StubBehavior) -> (Router, RequestLog) {
    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        behavior,
        requests: Arc::clone(&requests),
    };
    let router = Router::new().route("/predict", post(handle_predict)).with_state(state);
    (router, requests)
}

/// Spawns the stub on an ephemeral loopback port.
///
/// # Errors
///
/// Returns an error when the listener cannot be bound.
pub fn spawn_predict_stub(behavior: StubBehavior) -> Result<PredictStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("predict stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("predict stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("predict stub local addr failed: {err}"))?;
    let endpoint = endpoint_url(addr)?;

    let (router, requests) = predict_router(behavior);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(PredictStubHandle {
        endpoint,
        shutdown: Some(shutdown_tx),
        join: Some(join),
        requests,
    })
}

/// Formats the prediction endpoint URL for a bound address.
///
/// # Errors
///
/// Returns an error when the address does not form a valid URL.
pub fn endpoint_url(addr: SocketAddr) -> Result<Url, String> {
    Url::parse(&format!("http://{addr}/predict"))
        .map_err(|err| format!("predict stub url invalid: {err}"))
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Records the request body and answers per the configured behavior.
async fn handle_predict(State(state): State<StubState>, bytes: Bytes) -> impl IntoResponse {
    let decoded: Result<Value, _> = serde_json::from_slice(bytes.as_ref());
    record_request(&state, decoded.as_ref().ok().cloned().unwrap_or_else(|| {
        Value::String(String::from_utf8_lossy(bytes.as_ref()).into_owned())
    }));
    match &state.behavior {
        StubBehavior::Fixed {
            status,
            body,
        } => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            axum::Json(body.clone()),
        ),
        StubBehavior::Validating => validate_and_score(decoded),
    }
}

/// Scores a decoded feature vector or rejects it with `422`.
fn validate_and_score(decoded: Result<Value, serde_json::Error>) -> (StatusCode, axum::Json<Value>) {
    let features = decoded.and_then(serde_json::from_value::<ValidWineFeatures>);
    match features {
        Ok(features) => (StatusCode::OK, axum::Json(json!({ "wine_quality": score(&features) }))),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "detail": err.to_string() })),
        ),
    }
}

/// Appends a request body to the shared log.
fn record_request(state: &StubState, body: Value) {
    if let Ok(mut entries) = state.requests.lock() {
        entries.push(body);
    }
}

/// Deterministic linear stand-in for a trained model, rounded to two decimals.
fn score(features: &ValidWineFeatures) -> f64 {
    let raw = 0.3f64.mul_add(
        features.alcohol,
        0.9f64.mul_add(features.sulphates, 2.0 - 1.1 * features.volatile_acidity),
    );
    (raw.clamp(0.0, 10.0) * 100.0).round() / 100.0
}

// ============================================================================
// SECTION: Tests
// ============================================================================
