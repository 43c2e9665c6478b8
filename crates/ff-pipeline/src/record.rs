//! Read-side queries: listing, detail, export, incident memory, metrics.

use chrono::{DateTime, Utc};
use ff_core::entities::{Event, Session};
use ff_core::enums::EventType;
use ff_core::export::{SessionExport, SessionRecord};
use ff_core::responses::SessionMetrics;

use crate::context::PipelineContext;
use crate::error::StageError;

/// Minutes a manual diagnosis and planning pass takes.
pub const BASELINE_MINUTES: f64 = 35.0;

impl PipelineContext {
    /// Most recent sessions first.
    ///
    /// # Errors
    ///
    /// Storage errors only.
    pub async fn list_sessions(&self, limit: u32) -> Result<Vec<Session>, StageError> {
        Ok(self.service.list_sessions(limit).await?)
    }

    /// A session with every record it owns.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown session.
    pub async fn session_record(&self, session_id: &str) -> Result<SessionRecord, StageError> {
        let session = self.require_session(session_id).await?;
        let service = &self.service;
        Ok(SessionRecord {
            observations: service.list_observations(session_id).await?,
            kb_snapshots: service.list_kb_snapshots(session_id).await?,
            plans: service.list_plans(session_id).await?,
            safety_checks: service.list_safety_checks(session_id).await?,
            qa_results: service.list_qa_results(session_id).await?,
            work_orders: service.list_work_orders(session_id).await?,
            events: service.list_events(session_id).await?,
            session,
        })
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown session.
    pub async fn export_session(&self, session_id: &str) -> Result<SessionExport, StageError> {
        let record = self.session_record(session_id).await?;
        Ok(SessionExport::new(record, Utc::now()))
    }

    /// Other sessions with the same scenario tag, newest first.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown session.
    pub async fn similar_sessions(
        &self,
        session_id: &str,
        limit: u32,
    ) -> Result<Vec<Session>, StageError> {
        let session = self.require_session(session_id).await?;
        Ok(self
            .service
            .similar_sessions(session_id, &session.scenario, limit)
            .await?)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown session.
    pub async fn session_metrics(&self, session_id: &str) -> Result<SessionMetrics, StageError> {
        self.require_session(session_id).await?;
        let events = self.service.list_events(session_id).await?;
        Ok(compute_metrics(session_id, &events))
    }
}

fn first_at(events: &[Event], matches: impl Fn(&EventType) -> bool) -> Option<DateTime<Utc>> {
    events
        .iter()
        .find(|e| matches(&e.event_type))
        .map(|e| e.timestamp)
}

/// Whole seconds from `start` to `end`, rounded half up.
fn seconds_between(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Option<i64> {
    let millis = (end? - start?).num_milliseconds();
    Some((millis + 500).div_euclid(1000))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Timing summary over a timeline-ordered event list.
#[must_use]
pub fn compute_metrics(session_id: &str, events: &[Event]) -> SessionMetrics {
    let analyze = seconds_between(
        first_at(events, |t| *t == EventType::AnalyzeStart),
        first_at(events, |t| *t == EventType::AnalyzeDone),
    );
    let plan = seconds_between(
        first_at(events, |t| *t == EventType::PlanStart),
        first_at(events, |t| {
            matches!(t, EventType::PlanReady | EventType::PlanFallbackUsed)
        }),
    );
    let end_to_end = seconds_between(
        events.first().map(|e| e.timestamp),
        first_at(events, |t| *t == EventType::WoCreated),
    );

    let time_saved = end_to_end.map(|secs| {
        let secs = i32::try_from(secs).unwrap_or(i32::MAX);
        round1(BASELINE_MINUTES - f64::from(secs) / 60.0)
    });

    SessionMetrics {
        session_id: session_id.to_string(),
        analyze_latency_secs: analyze,
        plan_latency_secs: plan,
        end_to_end_secs: end_to_end,
        total_events: events.len(),
        baseline_minutes: BASELINE_MINUTES,
        time_saved_minutes: time_saved,
        efficiency_gain_pct: time_saved.map(|saved| round1(saved / BASELINE_MINUTES * 100.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    fn event(event_type: EventType, offset_ms: i64) -> Event {
        Event {
            id: format!("evt-{offset_ms}"),
            session_id: "ses-1".into(),
            event_type,
            timestamp: DateTime::UNIX_EPOCH + TimeDelta::milliseconds(offset_ms),
            metadata: None,
        }
    }

    #[test]
    fn full_run_metrics() {
        let events = vec![
            event(EventType::SessionCreated, 0),
            event(EventType::AnalyzeStart, 1_000),
            event(EventType::AnalyzeDone, 4_600),
            event(EventType::PlanStart, 5_000),
            event(EventType::PlanReady, 12_400),
            event(EventType::WoCreated, 300_000),
        ];
        let metrics = compute_metrics("ses-1", &events);
        assert_eq!(metrics.analyze_latency_secs, Some(4));
        assert_eq!(metrics.plan_latency_secs, Some(7));
        assert_eq!(metrics.end_to_end_secs, Some(300));
        assert_eq!(metrics.total_events, 6);
        assert_eq!(metrics.time_saved_minutes, Some(30.0));
        assert_eq!(metrics.efficiency_gain_pct, Some(85.7));
    }

    #[test]
    fn fallback_plan_closes_plan_window() {
        let events = vec![
            event(EventType::PlanStart, 0),
            event(EventType::PlanFallbackUsed, 2_000),
        ];
        assert_eq!(compute_metrics("ses-1", &events).plan_latency_secs, Some(2));
    }

    #[test]
    fn unfinished_session_has_no_savings() {
        let events = vec![event(EventType::SessionCreated, 0), event(EventType::AnalyzeStart, 10)];
        let metrics = compute_metrics("ses-1", &events);
        assert_eq!(metrics.analyze_latency_secs, None);
        assert_eq!(metrics.end_to_end_secs, None);
        assert_eq!(metrics.time_saved_minutes, None);
        assert_eq!(metrics.efficiency_gain_pct, None);
        assert!((metrics.baseline_minutes - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_timeline() {
        let metrics = compute_metrics("ses-1", &[]);
        assert_eq!(metrics.total_events, 0);
        assert_eq!(metrics.end_to_end_secs, None);
    }
}
