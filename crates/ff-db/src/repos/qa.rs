//! QA result repository.

use chrono::Utc;

use ff_core::entities::{QaIssue, QaResult};
use ff_core::enums::QaSource;
use ff_core::ids::PREFIX_QA_RESULT;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_datetime, parse_enum, parse_json, to_json_text};
use crate::service::FieldService;

const QA_COLUMNS: &str =
    "id, session_id, plan_id, pass, issues, recommendations, score, source, created_at";

/// Fields of a QA verdict ready to persist.
#[derive(Debug, Clone)]
pub struct NewQaResult {
    pub pass: bool,
    pub issues: Vec<QaIssue>,
    pub recommendations: Vec<String>,
    pub score: Option<f64>,
    pub source: QaSource,
}

fn row_to_qa_result(row: &libsql::Row) -> Result<QaResult, DatabaseError> {
    Ok(QaResult {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        plan_id: row.get::<String>(2)?,
        pass: get_bool(row, 3)?,
        issues: parse_json(&row.get::<String>(4)?)?,
        recommendations: parse_json(&row.get::<String>(5)?)?,
        score: row.get::<Option<f64>>(6)?,
        source: parse_enum(&row.get::<String>(7)?)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl FieldService {
    /// Persist a QA verdict on a plan.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_qa_result(
        &self,
        session_id: &str,
        plan_id: &str,
        verdict: &NewQaResult,
    ) -> Result<QaResult, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_QA_RESULT).await?;

        self.db()
            .conn()
            .await
            .execute(
                &format!(
                    "INSERT INTO qa_results ({QA_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    session_id,
                    plan_id,
                    i64::from(verdict.pass),
                    to_json_text(&verdict.issues)?,
                    to_json_text(&verdict.recommendations)?,
                    verdict.score,
                    verdict.source.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(QaResult {
            id,
            session_id: session_id.to_string(),
            plan_id: plan_id.to_string(),
            pass: verdict.pass,
            issues: verdict.issues.clone(),
            recommendations: verdict.recommendations.clone(),
            score: verdict.score,
            source: verdict.source,
            created_at: now,
        })
    }

    /// Most recent QA result for a session.
    pub async fn latest_qa_result(&self, session_id: &str) -> Result<Option<QaResult>, DatabaseError> {
        Ok(self.list_qa_results(session_id).await?.pop())
    }

    pub async fn list_qa_results(&self, session_id: &str) -> Result<Vec<QaResult>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {QA_COLUMNS} FROM qa_results WHERE session_id = ?1
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [session_id],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_qa_result(&row)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::NewQaResult;
    use crate::test_support::{create_test_session, test_service};
    use ff_core::contracts::{ObservationPayload, PlanStep};
    use ff_core::entities::QaIssue;
    use ff_core::enums::{QaIssueKind, QaSource};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn qa_result_roundtrip_with_and_without_score() {
        let svc = test_service().await;
        let sid = create_test_session(&svc, "scenario2").await;
        let obs = svc
            .create_observation(
                &sid,
                &ObservationPayload {
                    equipment_type: "Backup Generator".into(),
                    problem_summary: "Fails to start".into(),
                    risk_flags: vec![],
                    environmental_notes: Some("Fuel smell".into()),
                },
                None,
                true,
            )
            .await
            .unwrap();
        let steps: Vec<PlanStep> = (1..=3)
            .map(|n| PlanStep {
                step_number: n,
                action: format!("Step {n}"),
                duration: 5.0,
                citations: vec!["MAN-GEN-001".into()],
            })
            .collect();
        let plan = svc.create_plan(&sid, &obs.id, &steps, true).await.unwrap();

        let gate = NewQaResult {
            pass: false,
            issues: vec![QaIssue::new(
                QaIssueKind::UnknownCitation,
                "Step 2 cites unknown KB id: MAN-XYZ-999",
                Some(2),
            )],
            recommendations: vec![],
            score: None,
            source: QaSource::HardRules,
        };
        let first = svc.create_qa_result(&sid, &plan.id, &gate).await.unwrap();
        assert!(first.id.starts_with("qar-"));

        let model = NewQaResult {
            pass: true,
            issues: vec![],
            recommendations: vec!["Verify fuel valve".into()],
            score: Some(92.0),
            source: QaSource::HardPlusModel,
        };
        svc.create_qa_result(&sid, &plan.id, &model).await.unwrap();

        let all = svc.list_qa_results(&sid).await.unwrap();
        assert_eq!(all[0], first);
        assert_eq!(all[0].score, None);

        let latest = svc.latest_qa_result(&sid).await.unwrap().unwrap();
        assert_eq!(latest.score, Some(92.0));
        assert_eq!(latest.source, QaSource::HardPlusModel);
    }
}
