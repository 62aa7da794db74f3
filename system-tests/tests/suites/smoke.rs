// system-tests/tests/suites/smoke.rs
// ============================================================================
// Module: Smoke Tests
// Description: Happy-path probe runs against the validating stub.
// Purpose: Confirm both checks pass end to end over real HTTP.
// Dependencies: system-tests helpers, wine-probe, reqwest
// ============================================================================

//! Smoke coverage for the wine-probe against a validating prediction stub.

use helpers::artifacts::TestReporter;
use helpers::cli::probe_binary;
use helpers::cli::run_probe;
use serde_json::json;
use system_tests::predict_stub::StubBehavior;
use system_tests::predict_stub::spawn_predict_stub;
use wine_probe::Prediction;
use wine_probe::PredictionClient;
use wine_probe::VALID_PAYLOAD;
use wine_probe::checks::check_invalid_request;
use wine_probe::checks::check_valid_request;
use wine_probe::events::NoopEventSink;
use wine_probe::run_checks;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn library_checks_pass_against_validating_stub() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("library_checks_pass_against_validating_stub")?;
    let stub = spawn_predict_stub(StubBehavior::Validating)?;
    let client = PredictionClient::new(stub.endpoint().clone(), None)?;

    let valid = check_valid_request(&client).await?;
    assert_eq!(valid.status, 200);
    assert!(matches!(valid.prediction, Prediction::Scalar(_)));

    let invalid = check_invalid_request(&client).await?;
    assert_eq!(invalid.status, 422);

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], serde_json::to_value(VALID_PAYLOAD)?);
    assert_eq!(requests[1]["volatile_acidity"], json!("invalid_string"));

    reporter.artifacts().write_json("requests.json", &requests)?;
    reporter.finish(
        "pass",
        vec![format!("prediction {}", valid.prediction)],
        vec!["summary.json".to_string(), "summary.md".to_string(), "requests.json".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn runner_transcript_matches_console_contract() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("runner_transcript_matches_console_contract")?;
    let stub = spawn_predict_stub(StubBehavior::Validating)?;
    let client = PredictionClient::new(stub.endpoint().clone(), None)?;

    let mut transcript = Vec::new();
    let summary = run_checks(&client, &NoopEventSink, &mut transcript).await?;
    let transcript = String::from_utf8(transcript)?;
    let expected = format!(
        "--- Stage 4: Testing Valid Request ---\nSuccess! Prediction received: {}\n--- Stage 5: \
         Testing Invalid Request ---\nSuccess! API correctly handled invalid input. Error: 422\n",
        summary.prediction
    );
    assert_eq!(transcript, expected);

    reporter.artifacts().write_text("transcript.txt", &transcript)?;
    reporter.finish(
        "pass",
        Vec::new(),
        vec!["summary.json".to_string(), "summary.md".to_string(), "transcript.txt".to_string()],
    )?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn validating_stub_rejects_incomplete_and_misrouted_requests()
-> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("validating_stub_rejects_incomplete_and_misrouted_requests")?;
    let stub = spawn_predict_stub(StubBehavior::Validating)?;
    let http = reqwest::Client::new();

    let incomplete = http.post(stub.endpoint().clone()).json(&json!({"alcohol": 9.4})).send().await?;
    assert_eq!(incomplete.status().as_u16(), 422);
    let detail: serde_json::Value = incomplete.json().await?;
    assert!(detail["detail"].is_string());

    let mut misrouted = stub.endpoint().clone();
    misrouted.set_path("/score");
    let missing = http.post(misrouted).json(&VALID_PAYLOAD).send().await?;
    assert_eq!(missing.status().as_u16(), 404);

    reporter.finish("pass", Vec::new(), vec!["summary.json".to_string(), "summary.md".to_string()])?;
    Ok(())
}

#[test]
fn probe_binary_exits_zero_when_both_checks_pass() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("probe_binary_exits_zero_when_both_checks_pass")?;
    let Some(binary) = probe_binary() else {
        reporter.finish(
            "skip",
            vec!["wine-probe binary unavailable".to_string()],
            vec!["summary.json".to_string(), "summary.md".to_string()],
        )?;
        return Ok(());
    };
    let stub = spawn_predict_stub(StubBehavior::Validating)?;
    let run = run_probe(&binary, stub.endpoint())?;
    reporter.artifacts().write_text("stdout.txt", &run.stdout)?;
    reporter.artifacts().write_text("stderr.txt", &run.stderr)?;

    assert_eq!(run.code, Some(0), "stdout: {}\nstderr: {}", run.stdout, run.stderr);
    assert!(run.stdout.contains("Success! Prediction received: "));
    assert!(run.stdout.contains("Success! API correctly handled invalid input. Error: 422"));

    let events = run.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[2]["event"], json!("probe_summary"));
    assert_eq!(events[2]["outcome"], json!("pass"));
    assert_eq!(events[2]["checks_passed"], json!(2));

    reporter.finish(
        "pass",
        Vec::new(),
        vec![
            "summary.json".to_string(),
            "summary.md".to_string(),
            "stdout.txt".to_string(),
            "stderr.txt".to_string(),
        ],
    )?;
    Ok(())
}
