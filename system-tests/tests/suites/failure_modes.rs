// system-tests/tests/suites/failure_modes.rs
// ============================================================================
// Module: Failure Mode Tests
// Description: Probe runs against misbehaving or absent prediction services.
// Purpose: Confirm every failure maps to exit code 1 with a diagnostic.
// Dependencies: system-tests helpers, serde_json
// ============================================================================

//! Failure-mode coverage for the wine-probe binary.

use helpers::artifacts::TestReporter;
use helpers::cli::ProbeRun;
use helpers::cli::probe_binary;
use helpers::cli::run_probe;
use serde_json::Value;
use serde_json::json;
use system_tests::predict_stub::StubBehavior;
use system_tests::predict_stub::spawn_predict_stub;

use crate::helpers;

/// Runs the probe against a fixed-response stub, or returns `None` when the binary is unavailable.
fn run_against(
    reporter: &mut TestReporter,
    behavior: StubBehavior,
) -> Result<Option<ProbeRun>, Box<dyn std::error::Error>> {
    let Some(binary) = probe_binary() else {
        reporter.finish(
            "skip",
            vec!["wine-probe binary unavailable".to_string()],
            vec!["summary.json".to_string(), "summary.md".to_string()],
        )?;
        return Ok(None);
    };
    let stub = spawn_predict_stub(behavior)?;
    let run = run_probe(&binary, stub.endpoint())?;
    record(reporter, &run)?;
    Ok(Some(run))
}

fn record(reporter: &mut TestReporter, run: &ProbeRun) -> Result<(), Box<dyn std::error::Error>> {
    reporter.artifacts().write_text("stdout.txt", &run.stdout)?;
    reporter.artifacts().write_text("stderr.txt", &run.stderr)?;
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

fn summary_event(run: &ProbeRun) -> Option<Value> {
    run.events().into_iter().find(|event| event["event"] == json!("probe_summary"))
}

#[test]
fn missing_prediction_field_fails_first_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("missing_prediction_field_fails_first_check")?;
    let behavior = StubBehavior::Fixed {
        status: 200,
        body: json!({"quality": 5.7}),
    };
    let Some(run) = run_against(&mut reporter, behavior)? else {
        return Ok(());
    };

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("Failed: 'wine_quality' field missing"));
    assert!(!run.stdout.contains("Stage 5"));
    let summary = summary_event(&run).ok_or("missing summary event")?;
    assert_eq!(summary["failed_check"], json!("valid_request"));
    assert_eq!(summary["checks_passed"], json!(0));
    Ok(())
}

#[test]
fn accepted_invalid_input_fails_second_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("accepted_invalid_input_fails_second_check")?;
    let behavior = StubBehavior::Fixed {
        status: 200,
        body: json!({"wine_quality": 6.0}),
    };
    let Some(run) = run_against(&mut reporter, behavior)? else {
        return Ok(());
    };

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("Success! Prediction received: 6.0\n"));
    assert!(run.stdout.contains("Failed: API should have returned an error for invalid input"));
    let summary = summary_event(&run).ok_or("missing summary event")?;
    assert_eq!(summary["failed_check"], json!("invalid_request"));
    assert_eq!(summary["checks_passed"], json!(1));
    Ok(())
}

#[test]
fn server_error_fails_first_check_with_status() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("server_error_fails_first_check_with_status")?;
    let behavior = StubBehavior::Fixed {
        status: 500,
        body: json!({"detail": "model unavailable"}),
    };
    let Some(run) = run_against(&mut reporter, behavior)? else {
        return Ok(());
    };

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("Failed: Expected status 200, got 500 - "));
    assert!(run.stdout.contains("model unavailable"));
    Ok(())
}

#[test]
fn non_numeric_prediction_fails_first_check() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("non_numeric_prediction_fails_first_check")?;
    let behavior = StubBehavior::Fixed {
        status: 200,
        body: json!({"wine_quality": "good"}),
    };
    let Some(run) = run_against(&mut reporter, behavior)? else {
        return Ok(());
    };

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("Failed: Prediction is not numeric"));
    Ok(())
}

#[test]
fn unreachable_service_reports_exception() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("unreachable_service_reports_exception")?;
    let Some(binary) = probe_binary() else {
        reporter.finish(
            "skip",
            vec!["wine-probe binary unavailable".to_string()],
            vec!["summary.json".to_string(), "summary.md".to_string()],
        )?;
        return Ok(());
    };
    let stub = spawn_predict_stub(StubBehavior::Validating)?;
    let endpoint = stub.endpoint().clone();
    drop(stub);

    let run = run_probe(&binary, &endpoint)?;
    record(&mut reporter, &run)?;
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("--- Stage 4: Testing Valid Request ---"));
    assert!(run.stdout.contains("Exception occurred: "));
    assert!(!run.stdout.contains("Stage 5"));
    let summary = summary_event(&run).ok_or("missing summary event")?;
    assert_eq!(summary["outcome"], json!("fail"));
    Ok(())
}
