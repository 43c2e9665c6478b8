//! Observation repository.

use chrono::Utc;

use ff_core::contracts::ObservationPayload;
use ff_core::entities::Observation;
use ff_core::ids::PREFIX_OBSERVATION;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_json, to_json_text};
use crate::service::FieldService;

const OBSERVATION_COLUMNS: &str = "id, session_id, equipment_type, problem_summary, risk_flags, \
     environmental_notes, image_path, used_mock, created_at";

fn row_to_observation(row: &libsql::Row) -> Result<Observation, DatabaseError> {
    Ok(Observation {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        equipment_type: row.get::<String>(2)?,
        problem_summary: row.get::<String>(3)?,
        risk_flags: parse_json(&row.get::<String>(4)?)?,
        environmental_notes: get_opt_string(row, 5)?,
        image_path: get_opt_string(row, 6)?,
        used_mock: get_bool(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl FieldService {
    /// Persist a validated observation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (e.g. unknown session).
    pub async fn create_observation(
        &self,
        session_id: &str,
        payload: &ObservationPayload,
        image_path: Option<&str>,
        used_mock: bool,
    ) -> Result<Observation, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_OBSERVATION).await?;

        self.db()
            .conn()
            .await
            .execute(
                &format!(
                    "INSERT INTO observations ({OBSERVATION_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    session_id,
                    payload.equipment_type.as_str(),
                    payload.problem_summary.as_str(),
                    to_json_text(&payload.risk_flags)?,
                    payload.environmental_notes.as_deref(),
                    image_path,
                    i64::from(used_mock),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Observation {
            id,
            session_id: session_id.to_string(),
            equipment_type: payload.equipment_type.clone(),
            problem_summary: payload.problem_summary.clone(),
            risk_flags: payload.risk_flags.clone(),
            environmental_notes: payload.environmental_notes.clone(),
            image_path: image_path.map(String::from),
            used_mock,
            created_at: now,
        })
    }

    pub async fn get_observation(&self, id: &str) -> Result<Observation, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!("SELECT {OBSERVATION_COLUMNS} FROM observations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_observation(&row)
    }

    /// Most recent observation for a session.
    pub async fn latest_observation(
        &self,
        session_id: &str,
    ) -> Result<Option<Observation>, DatabaseError> {
        Ok(self.list_observations(session_id).await?.pop())
    }

    /// Observations for a session, oldest first.
    pub async fn list_observations(
        &self,
        session_id: &str,
    ) -> Result<Vec<Observation>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {OBSERVATION_COLUMNS} FROM observations
                     WHERE session_id = ?1 ORDER BY created_at ASC, rowid ASC"
                ),
                [session_id],
            )
            .await?;

        let mut observations = Vec::new();
        while let Some(row) = rows.next().await? {
            observations.push(row_to_observation(&row)?);
        }
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{create_test_session, test_service};
    use ff_core::contracts::ObservationPayload;
    use pretty_assertions::assert_eq;

    fn pump() -> ObservationPayload {
        ObservationPayload {
            equipment_type: "Industrial Water Pump".into(),
            problem_summary: "Leak near the mechanical seal".into(),
            risk_flags: vec!["water_near_power".into(), "exposed_wires".into()],
            environmental_notes: None,
        }
    }

    #[tokio::test]
    async fn create_observation_roundtrip() {
        let svc = test_service().await;
        let sid = create_test_session(&svc, "scenario3").await;

        let obs = svc
            .create_observation(&sid, &pump(), Some("scenario3.jpg"), true)
            .await
            .unwrap();
        assert!(obs.id.starts_with("obs-"));

        let fetched = svc.get_observation(&obs.id).await.unwrap();
        assert_eq!(fetched, obs);
        assert_eq!(fetched.risk_flags, vec!["water_near_power", "exposed_wires"]);
        assert!(fetched.environmental_notes.is_none());
        assert!(fetched.used_mock);
    }

    #[tokio::test]
    async fn latest_observation_picks_newest() {
        let svc = test_service().await;
        let sid = create_test_session(&svc, "scenario3").await;
        assert!(svc.latest_observation(&sid).await.unwrap().is_none());

        svc.create_observation(&sid, &pump(), None, false).await.unwrap();
        let second = svc.create_observation(&sid, &pump(), None, true).await.unwrap();

        let latest = svc.latest_observation(&sid).await.unwrap().unwrap();
        assert_eq!(latest.id, second.id);
    }

    #[tokio::test]
    async fn observation_requires_existing_session() {
        let svc = test_service().await;
        let result = svc
            .create_observation("ses-00000000", &pump(), None, false)
            .await;
        assert!(result.is_err());
    }
}
