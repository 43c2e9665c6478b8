//! The end-to-end driver and the read-side queries over its output.

mod common;

use common::{harness, pump_plan, qa_review};
use ff_core::enums::SessionStatus;
use ff_gen::{ErrorKind, GeneratorError};
use ff_pipeline::{FailureStatus, RunRequest};
use pretty_assertions::assert_eq;
use serde_json::json;

fn pump_run() -> RunRequest {
    RunRequest {
        scenario: "scenario3".into(),
        user_description: "Pump leaking next to the electrical panel".into(),
        image_path: "uploads/scenario3_pump.jpg".into(),
        acknowledge_safety: false,
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_run_completes_with_work_order() {
    let h = harness().await;
    h.script.push_ok(pump_plan().to_string());
    h.script.push_ok(qa_review(true).to_string());

    let report = h.ctx.run(&pump_run()).await.unwrap();
    assert!(report.observation.used_mock);
    assert_eq!(report.kb.results.len(), 3);
    assert!(!report.plan.used_fallback);
    assert!(report.safety.pass);
    assert!(report.qa.qa.pass);
    let order = report.work_order.as_ref().unwrap();
    assert_eq!(order.parts, vec!["Gasket/seal kit"]);

    let record = h.ctx.session_record(&report.session_id).await.unwrap();
    assert_eq!(record.session.status, SessionStatus::Complete);
    assert_eq!(record.kb_snapshots.len(), 3);
    assert_eq!(record.work_orders.len(), 1);
    let tags: Vec<&str> = record.events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(
        tags,
        vec![
            "SESSION_CREATED",
            "ANALYZE_START",
            "ANALYZE_DONE",
            "KB_SEARCH_DONE",
            "PLAN_START",
            "PLAN_READY",
            "SAFETY_START",
            "SAFETY_DONE",
            "QA_START",
            "QA_DONE",
            "WO_START",
            "WO_CREATED",
        ]
    );
    assert!(record.latest_qa().is_some_and(|qa| qa.pass));

    let rendered = serde_json::to_value(&report).unwrap();
    assert!(rendered["workOrder"]["workOrderNumber"].is_string());
}

#[tokio::test]
async fn qa_rejection_skips_work_order() {
    let h = harness().await;
    h.script.push_ok(pump_plan().to_string());
    h.script.push_ok(qa_review(false).to_string());

    let report = h.ctx.run(&pump_run()).await.unwrap();
    assert!(!report.qa.qa.pass);
    assert!(report.work_order.is_none());
    assert!(serde_json::to_value(&report).unwrap().get("workOrder").is_none());

    let session = h.ctx.service.get_session(&report.session_id).await.unwrap();
    assert_eq!(session.status, SessionStatus::Analyzing);
}

#[tokio::test]
async fn stage_failure_marks_session_error() {
    let h = harness().await;
    h.script.push_err(GeneratorError::new(ErrorKind::Unknown, Some(400), "API key not valid"));

    let failure = h.ctx.run(&pump_run()).await.unwrap_err();
    assert_eq!(failure.stage, "plan");
    assert_eq!(failure.status(), FailureStatus::GeneratorUnavailable);
    assert!(failure.to_string().starts_with("plan failed: "));

    let session_id = failure.session_id.unwrap();
    let session = h.ctx.service.get_session(&session_id).await.unwrap();
    assert_eq!(session.status, SessionStatus::Error);
}

#[tokio::test]
async fn invalid_run_request_creates_nothing() {
    let h = harness().await;
    let failure = h
        .ctx
        .run(&RunRequest {
            scenario: String::new(),
            ..pump_run()
        })
        .await
        .unwrap_err();
    assert_eq!(failure.stage, "create_session");
    assert_eq!(failure.session_id, None);
    assert_eq!(failure.status(), FailureStatus::InvalidInput);
    assert!(h.ctx.list_sessions(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn quota_run_uses_static_plan() {
    let h = harness().await;
    h.script.push_err(GeneratorError::new(ErrorKind::QuotaExceeded, Some(429), "quota exceeded"));

    // The static pump plan cites KB ids outside the fixture corpus, so the
    // citation gate stops the run before the model is asked again.
    let report = h.ctx.run(&pump_run()).await.unwrap();
    assert!(report.plan.used_fallback);
    assert!(!report.qa.qa.pass);
    assert!(report.work_order.is_none());
    assert_eq!(h.script.remaining(), 0);
    assert_eq!(h.script.calls().len(), 1);
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_wraps_the_session_record() {
    let h = harness().await;
    h.script.push_ok(pump_plan().to_string());
    h.script.push_ok(qa_review(true).to_string());
    let report = h.ctx.run(&pump_run()).await.unwrap();

    let export = h.ctx.export_session(&report.session_id).await.unwrap();
    assert_eq!(export.version, "1.0");
    assert_eq!(export.file_name(), format!("fieldfix_{}.json", report.session_id));
    let value = serde_json::to_value(&export).unwrap();
    assert_eq!(value["sessionId"], json!(report.session_id));
    assert_eq!(value["data"]["plans"].as_array().map(Vec::len), Some(1));
    assert!(value["exportedAt"].is_string());
}

#[tokio::test]
async fn similar_sessions_share_scenario() {
    let h = harness().await;
    for _ in 0..2 {
        h.script.push_ok(pump_plan().to_string());
        h.script.push_ok(qa_review(true).to_string());
    }
    let first = h.ctx.run(&pump_run()).await.unwrap();
    let second = h.ctx.run(&pump_run()).await.unwrap();
    h.script.push_err(GeneratorError::new(ErrorKind::Unknown, None, "unused"));
    h.ctx
        .run(&RunRequest {
            scenario: "scenario1".into(),
            image_path: "uploads/scenario1_hvac.jpg".into(),
            ..pump_run()
        })
        .await
        .unwrap_err();

    let similar = h.ctx.similar_sessions(&second.session_id, 5).await.unwrap();
    let ids: Vec<&str> = similar.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![first.session_id.as_str()]);
    assert_eq!(h.ctx.list_sessions(10).await.unwrap().len(), 3);
}

#[tokio::test]
async fn metrics_for_a_finished_run() {
    let h = harness().await;
    h.script.push_ok(pump_plan().to_string());
    h.script.push_ok(qa_review(true).to_string());
    let report = h.ctx.run(&pump_run()).await.unwrap();

    let metrics = h.ctx.session_metrics(&report.session_id).await.unwrap();
    assert_eq!(metrics.total_events, 12);
    assert!(metrics.analyze_latency_secs.is_some());
    assert!(metrics.plan_latency_secs.is_some());
    assert!(metrics.end_to_end_secs.is_some_and(|secs| secs < 60));
    assert!(metrics.time_saved_minutes.is_some_and(|saved| saved > 34.0));
    assert!(metrics.efficiency_gain_pct.is_some_and(|pct| pct > 97.0));
}

#[tokio::test]
async fn records_for_unknown_session() {
    let h = harness().await;
    let err = h.ctx.session_metrics("ses-00000000").await.unwrap_err();
    assert_eq!(err.status(), FailureStatus::NotFound);
    assert!(h.ctx.export_session("ses-00000000").await.is_err());
}
