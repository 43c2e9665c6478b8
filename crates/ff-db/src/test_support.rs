//! Shared test utilities for ff-db unit tests.

use crate::FieldDb;
use crate::service::FieldService;

/// In-memory migrated service.
pub async fn test_service() -> FieldService {
    let db = FieldDb::open_local(":memory:").await.unwrap();
    FieldService::from_db(db)
}

/// Create a session and return its ID.
pub async fn create_test_session(svc: &FieldService, scenario: &str) -> String {
    svc.create_session(scenario, "Unit making a grinding noise")
        .await
        .unwrap()
        .id
}
