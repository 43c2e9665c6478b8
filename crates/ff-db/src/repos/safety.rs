//! Safety check repository.

use chrono::Utc;

use ff_core::contracts::SafetyPayload;
use ff_core::entities::SafetyCheck;
use ff_core::ids::PREFIX_SAFETY_CHECK;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_datetime, parse_json, to_json_text};
use crate::service::FieldService;

const SAFETY_COLUMNS: &str =
    "id, session_id, plan_id, pass, ppe_required, hazards, required_presteps, created_at";

fn row_to_safety_check(row: &libsql::Row) -> Result<SafetyCheck, DatabaseError> {
    Ok(SafetyCheck {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        plan_id: row.get::<String>(2)?,
        pass: get_bool(row, 3)?,
        ppe_required: parse_json(&row.get::<String>(4)?)?,
        hazards: parse_json(&row.get::<String>(5)?)?,
        required_presteps: parse_json(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl FieldService {
    /// Persist a safety evaluation of a plan.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_safety_check(
        &self,
        session_id: &str,
        plan_id: &str,
        payload: &SafetyPayload,
    ) -> Result<SafetyCheck, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_SAFETY_CHECK).await?;

        self.db()
            .conn()
            .await
            .execute(
                &format!(
                    "INSERT INTO safety_checks ({SAFETY_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    session_id,
                    plan_id,
                    i64::from(payload.pass),
                    to_json_text(&payload.ppe_required)?,
                    to_json_text(&payload.hazards)?,
                    to_json_text(&payload.required_presteps)?,
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(SafetyCheck {
            id,
            session_id: session_id.to_string(),
            plan_id: plan_id.to_string(),
            pass: payload.pass,
            ppe_required: payload.ppe_required.clone(),
            hazards: payload.hazards.clone(),
            required_presteps: payload.required_presteps.clone(),
            created_at: now,
        })
    }

    /// Most recent check recorded against `plan_id`.
    pub async fn latest_safety_check_for_plan(
        &self,
        plan_id: &str,
    ) -> Result<Option<SafetyCheck>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SAFETY_COLUMNS} FROM safety_checks WHERE plan_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                [plan_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_safety_check(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_safety_checks(&self, session_id: &str) -> Result<Vec<SafetyCheck>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SAFETY_COLUMNS} FROM safety_checks WHERE session_id = ?1
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [session_id],
            )
            .await?;

        let mut checks = Vec::new();
        while let Some(row) = rows.next().await? {
            checks.push(row_to_safety_check(&row)?);
        }
        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use crate::service::FieldService;
    use crate::test_support::{create_test_session, test_service};
    use ff_core::contracts::{ObservationPayload, PlanStep, SafetyPayload};
    use pretty_assertions::assert_eq;

    async fn seed_plan(svc: &FieldService, sid: &str) -> String {
        let obs = svc
            .create_observation(
                sid,
                &ObservationPayload {
                    equipment_type: "Industrial Water Pump".into(),
                    problem_summary: "Leak".into(),
                    risk_flags: vec![],
                    environmental_notes: None,
                },
                None,
                true,
            )
            .await
            .unwrap();
        let steps: Vec<PlanStep> = (1..=3)
            .map(|n| PlanStep {
                step_number: n,
                action: "Inspect wiring".into(),
                duration: 10.0,
                citations: vec!["RB-ELEC-001".into()],
            })
            .collect();
        svc.create_plan(sid, &obs.id, &steps, false).await.unwrap().id
    }

    #[tokio::test]
    async fn latest_check_for_plan() {
        let svc = test_service().await;
        let sid = create_test_session(&svc, "scenario3").await;
        let plan_id = seed_plan(&svc, &sid).await;
        assert!(svc.latest_safety_check_for_plan(&plan_id).await.unwrap().is_none());

        let failing = SafetyPayload {
            pass: false,
            ppe_required: vec!["insulated gloves".into()],
            hazards: vec!["electrical shock".into()],
            required_presteps: vec!["LOTO".into()],
        };
        svc.create_safety_check(&sid, &plan_id, &failing).await.unwrap();
        let passing = SafetyPayload {
            pass: true,
            ..failing.clone()
        };
        let second = svc.create_safety_check(&sid, &plan_id, &passing).await.unwrap();

        let latest = svc.latest_safety_check_for_plan(&plan_id).await.unwrap().unwrap();
        assert_eq!(latest, second);
        assert_eq!(svc.list_safety_checks(&sid).await.unwrap().len(), 2);
    }
}
