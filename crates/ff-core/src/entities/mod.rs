//! Entity structs owned by a repair session.
//!
//! Every entity other than `Session` carries a `session_id` and lives and dies
//! with its session.

mod event;
mod kb_snapshot;
mod observation;
mod plan;
mod qa;
mod safety;
mod session;
mod work_order;

pub use event::Event;
pub use kb_snapshot::KbSnapshot;
pub use observation::Observation;
pub use plan::Plan;
pub use qa::{QaIssue, QaResult};
pub use safety::SafetyCheck;
pub use session::Session;
pub use work_order::WorkOrder;
