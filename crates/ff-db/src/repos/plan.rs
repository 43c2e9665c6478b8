//! Plan repository.

use chrono::Utc;

use ff_core::contracts::PlanStep;
use ff_core::entities::Plan;
use ff_core::ids::PREFIX_PLAN;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_datetime, parse_json, to_json_text};
use crate::service::FieldService;

const PLAN_COLUMNS: &str =
    "id, session_id, observation_id, steps, kb_ids_used, used_fallback, created_at";

fn row_to_plan(row: &libsql::Row) -> Result<Plan, DatabaseError> {
    Ok(Plan {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        observation_id: row.get::<String>(2)?,
        steps: parse_json(&row.get::<String>(3)?)?,
        kb_ids_used: parse_json(&row.get::<String>(4)?)?,
        used_fallback: get_bool(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// Unique citations across steps, in first-seen order.
#[must_use]
pub fn unique_citations(steps: &[PlanStep]) -> Vec<String> {
    let mut seen = Vec::new();
    for citation in steps.iter().flat_map(|s| &s.citations) {
        if !seen.contains(citation) {
            seen.push(citation.clone());
        }
    }
    seen
}

impl FieldService {
    /// Persist a validated plan.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_plan(
        &self,
        session_id: &str,
        observation_id: &str,
        steps: &[PlanStep],
        used_fallback: bool,
    ) -> Result<Plan, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PLAN).await?;
        let kb_ids_used = unique_citations(steps);

        self.db()
            .conn()
            .await
            .execute(
                &format!("INSERT INTO plans ({PLAN_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                libsql::params![
                    id.as_str(),
                    session_id,
                    observation_id,
                    to_json_text(steps)?,
                    to_json_text(&kb_ids_used)?,
                    i64::from(used_fallback),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Plan {
            id,
            session_id: session_id.to_string(),
            observation_id: observation_id.to_string(),
            steps: steps.to_vec(),
            kb_ids_used,
            used_fallback,
            created_at: now,
        })
    }

    pub async fn get_plan(&self, id: &str) -> Result<Plan, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(&format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_plan(&row)
    }

    pub async fn latest_plan(&self, session_id: &str) -> Result<Option<Plan>, DatabaseError> {
        Ok(self.list_plans(session_id).await?.pop())
    }

    /// Plans for a session, oldest first.
    pub async fn list_plans(&self, session_id: &str) -> Result<Vec<Plan>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {PLAN_COLUMNS} FROM plans WHERE session_id = ?1
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [session_id],
            )
            .await?;

        let mut plans = Vec::new();
        while let Some(row) = rows.next().await? {
            plans.push(row_to_plan(&row)?);
        }
        Ok(plans)
    }
}

#[cfg(test)]
mod tests {
    use super::unique_citations;
    use crate::test_support::{create_test_session, test_service};
    use ff_core::contracts::{ObservationPayload, PlanStep};
    use pretty_assertions::assert_eq;

    fn step(n: u32, citations: &[&str]) -> PlanStep {
        PlanStep {
            step_number: n,
            action: format!("Action {n}"),
            duration: 15.0,
            citations: citations.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn unique_citations_keep_first_seen_order() {
        let steps = [step(1, &["B", "A"]), step(2, &["A"]), step(3, &["C", "B"])];
        assert_eq!(unique_citations(&steps), vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn create_plan_roundtrip() {
        let svc = test_service().await;
        let sid = create_test_session(&svc, "scenario1").await;
        let obs = svc
            .create_observation(
                &sid,
                &ObservationPayload {
                    equipment_type: "HVAC".into(),
                    problem_summary: "Warm air".into(),
                    risk_flags: vec![],
                    environmental_notes: None,
                },
                None,
                true,
            )
            .await
            .unwrap();

        let steps = vec![step(1, &["MAN-HVAC-001"]), step(2, &["RB-HVAC-001"]), step(3, &["MAN-HVAC-001"])];
        let plan = svc.create_plan(&sid, &obs.id, &steps, false).await.unwrap();
        assert!(plan.id.starts_with("pln-"));
        assert_eq!(plan.kb_ids_used, vec!["MAN-HVAC-001", "RB-HVAC-001"]);

        let fetched = svc.get_plan(&plan.id).await.unwrap();
        assert_eq!(fetched, plan);
        assert_eq!(
            svc.latest_plan(&sid).await.unwrap().map(|p| p.id),
            Some(plan.id)
        );
    }
}
