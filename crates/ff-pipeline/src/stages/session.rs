use ff_core::entities::{Event, Session};
use ff_core::enums::{EventType, SessionStatus};
use ff_core::responses::SessionCreateResponse;

use crate::context::PipelineContext;
use crate::error::StageError;
use crate::requests::{CreateSessionRequest, RecordEventRequest, required};

impl PipelineContext {
    /// Open a session in `created` status.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when `scenario` or `userDescription` is blank.
    pub async fn create_session(
        &self,
        req: &CreateSessionRequest,
    ) -> Result<SessionCreateResponse, StageError> {
        let scenario = required(&req.scenario, "scenario")?;
        let description = required(&req.user_description, "userDescription")?;

        let session = self.service.create_session(scenario, description).await?;
        self.service
            .append_event(&session.id, EventType::SessionCreated, None)
            .await?;
        tracing::info!(session = %session.id, scenario, "session created");
        Ok(SessionCreateResponse { session })
    }

    /// Append an arbitrary event to an existing session.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank session id or event type, `NotFound` for an
    /// unknown session.
    pub async fn record_event(&self, req: &RecordEventRequest) -> Result<Event, StageError> {
        let session_id = required(&req.session_id, "sessionId")?;
        let event_type: EventType = required(&req.event_type, "eventType")?.parse()?;
        self.require_session(session_id).await?;
        Ok(self
            .service
            .append_event(session_id, event_type, req.metadata.clone())
            .await?)
    }

    /// Move `session` to `next` if it is not already there.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` when the state machine forbids the move.
    pub(crate) async fn advance(
        &self,
        session: &Session,
        next: SessionStatus,
    ) -> Result<(), StageError> {
        if session.status.check_transition(&session.id, next)? {
            self.service.set_session_status(&session.id, next).await?;
            tracing::debug!(session = %session.id, from = %session.status, to = %next, "session status changed");
        }
        Ok(())
    }

    /// Put a session into the absorbing `error` state.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown session, `InvalidTransition` for a session
    /// that already completed.
    pub async fn mark_session_error(&self, session_id: &str) -> Result<Session, StageError> {
        let session = self.require_session(session_id).await?;
        self.advance(&session, SessionStatus::Error).await?;
        self.require_session(session_id).await
    }
}
