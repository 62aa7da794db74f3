// system-tests/src/bin/wine_predict_stub.rs
// ============================================================================
// Module: Wine Predict Stub Server
// Description: Standalone validating prediction endpoint for manual probing.
// Purpose: Give the probe a local target without a trained model.
// Dependencies: system-tests, tokio
// ============================================================================

//! Standalone validating prediction stub. Binds `WINE_PROBE_SYSTEM_TEST_STUB_BIND`
//! (default `127.0.0.1:8002`) and serves until interrupted.

use std::io::Write;
use std::process::ExitCode;

use system_tests::config::SystemTestConfig;
use system_tests::predict_stub::StubBehavior;
use system_tests::predict_stub::endpoint_url;
use system_tests::predict_stub::predict_router;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            let _ = writeln!(std::io::stderr(), "wine-predict-stub: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Binds the configured address and serves until ctrl-c.
async fn serve() -> Result<(), String> {
    let config = SystemTestConfig::load().map_err(|err| format!("config load failed: {err}"))?;
    let bind = config.stub_bind_or_default()?;
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| format!("bind {bind} failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("local addr failed: {err}"))?;
    let endpoint = endpoint_url(addr)?;
    let _ = writeln!(std::io::stderr(), "wine-predict-stub: serving {endpoint}");

    let (router, _requests) = predict_router(StubBehavior::Validating);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|err| format!("server failed: {err}"))
}
