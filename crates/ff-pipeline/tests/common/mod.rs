//! Shared fixtures: an in-memory store, a scripted generator, and a small
//! pump-focused KB.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ff_config::PathsConfig;
use ff_db::FieldService;
use ff_gen::{ModelRouter, RetryPolicy, ScriptedGenerator};
use ff_kb::{KbCorpus, KbStore, Manual, Runbook};
use ff_pipeline::PipelineContext;
use serde_json::{Value, json};
use tempfile::TempDir;

pub struct Harness {
    pub ctx: PipelineContext,
    pub script: Arc<ScriptedGenerator>,
    pub media: TempDir,
}

pub fn workspace_dir(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(relative)
}

fn corpus() -> KbCorpus {
    KbCorpus {
        manuals: vec![Manual {
            id: "MAN-PUMP-001".into(),
            title: Some("Centrifugal Pump Seal Service".into()),
            equipment: Some("Industrial Water Pump".into()),
            content: Some("Replace the mechanical seal when leakage exceeds limits.".into()),
            keywords: vec!["pump".into(), "seal".into()],
        }],
        runbooks: vec![
            Runbook {
                id: "RB-ELEC-001".into(),
                title: Some("Lockout/Tagout".into()),
                procedure: Some("Open the disconnect and apply a lock and tag.".into()),
                equipment: vec!["pump".into()],
                keywords: vec!["electrical".into(), "lockout".into()],
            },
            Runbook {
                id: "RB-PUMP-001".into(),
                title: Some("Pump Leak Response".into()),
                procedure: Some("Contain water, isolate the pump, inspect the seal.".into()),
                equipment: vec!["pump".into()],
                keywords: vec!["pump".into(), "leak".into()],
            },
        ],
        incidents: vec![],
    }
}

pub async fn harness() -> Harness {
    let service = FieldService::new_local(":memory:", true).await.unwrap();
    harness_with(service, workspace_dir("demo_fallback"))
}

pub fn harness_with(service: FieldService, fallback_dir: PathBuf) -> Harness {
    let media = tempfile::tempdir().unwrap();
    let script = Arc::new(ScriptedGenerator::new());
    let router = ModelRouter::new(script.clone(), "gemini-test", None, RetryPolicy::immediate(1));
    let paths = PathsConfig {
        media_root: media.path().to_path_buf(),
        fallback_dir,
        ..PathsConfig::default()
    };
    let ctx = PipelineContext::new(service, router, &paths).with_kb(KbStore::from_corpus(corpus()));
    Harness { ctx, script, media }
}

/// A pump plan whose citations all resolve in the fixture KB.
pub fn pump_plan() -> Value {
    json!({
        "steps": [
            { "stepNumber": 1, "action": "Isolate power at the panel and lock out the motor", "duration": 15, "citations": ["RB-ELEC-001"] },
            { "stepNumber": 2, "action": "Replace the mechanical seal and gasket", "duration": 45, "citations": ["MAN-PUMP-001", "RB-PUMP-001"] },
            { "stepNumber": 3, "action": "Run the pump and check for leaks", "duration": 20, "citations": ["RB-PUMP-001"] }
        ]
    })
}

pub fn qa_review(pass: bool) -> Value {
    json!({
        "pass": pass,
        "issues": ["Step 3 lacks an acceptance criterion"],
        "recommendations": ["Record discharge pressure after restart"],
        "score": 82
    })
}
