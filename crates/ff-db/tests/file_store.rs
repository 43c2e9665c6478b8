//! File-backed store behaviour: persistence across reopen and the
//! unmigrated-database path.

use ff_core::enums::{EventType, SessionStatus};
use ff_db::FieldService;
use ff_db::error::DatabaseError;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fieldfix.db");
    let path = path.to_str().unwrap();

    let sid = {
        let svc = FieldService::new_local(path, true).await.unwrap();
        let session = svc.create_session("scenario2", "Generator cranks but won't start").await.unwrap();
        svc.append_event(&session.id, EventType::SessionCreated, None).await.unwrap();
        svc.set_session_status(&session.id, SessionStatus::Analyzing).await.unwrap();
        session.id
    };

    let svc = FieldService::new_local(path, true).await.unwrap();
    let session = svc.get_session(&sid).await.unwrap();
    assert_eq!(session.status, SessionStatus::Analyzing);
    assert_eq!(svc.list_events(&sid).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unmigrated_store_reports_schema_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");

    let svc = FieldService::new_local(path.to_str().unwrap(), false).await.unwrap();
    let err = svc.create_session("scenario1", "HVAC blowing warm air").await.unwrap_err();
    assert!(
        matches!(err, DatabaseError::SchemaMissing { ref table } if table == "sessions"),
        "unexpected error: {err}"
    );
}
