//! Work order repository.

use chrono::Utc;

use ff_core::entities::WorkOrder;
use ff_core::ids::PREFIX_WORK_ORDER;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_json, to_json_text};
use crate::service::FieldService;

const WORK_ORDER_COLUMNS: &str =
    "id, session_id, plan_id, work_order_number, summary, parts, estimated_time, created_at";

fn row_to_work_order(row: &libsql::Row) -> Result<WorkOrder, DatabaseError> {
    Ok(WorkOrder {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        plan_id: row.get::<String>(2)?,
        work_order_number: row.get::<String>(3)?,
        summary: row.get::<String>(4)?,
        parts: parse_json(&row.get::<String>(5)?)?,
        estimated_time: row.get::<f64>(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl FieldService {
    /// Persist a work order drafted from a plan.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn create_work_order(
        &self,
        session_id: &str,
        plan_id: &str,
        work_order_number: &str,
        summary: &str,
        parts: &[String],
        estimated_time: f64,
    ) -> Result<WorkOrder, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_WORK_ORDER).await?;

        self.db()
            .conn()
            .await
            .execute(
                &format!(
                    "INSERT INTO work_orders ({WORK_ORDER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    session_id,
                    plan_id,
                    work_order_number,
                    summary,
                    to_json_text(parts)?,
                    estimated_time,
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(WorkOrder {
            id,
            session_id: session_id.to_string(),
            plan_id: plan_id.to_string(),
            work_order_number: work_order_number.to_string(),
            summary: summary.to_string(),
            parts: parts.to_vec(),
            estimated_time,
            created_at: now,
        })
    }

    pub async fn list_work_orders(&self, session_id: &str) -> Result<Vec<WorkOrder>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE session_id = ?1
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [session_id],
            )
            .await?;

        let mut orders = Vec::new();
        while let Some(row) = rows.next().await? {
            orders.push(row_to_work_order(&row)?);
        }
        Ok(orders)
    }
}
