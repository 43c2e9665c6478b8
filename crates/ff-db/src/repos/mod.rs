//! Repository modules implementing persistence for all FieldFix entities.
//!
//! Each module adds methods to `FieldService` via `impl FieldService` blocks.

pub mod event;
pub mod kb_snapshot;
pub mod observation;
pub mod plan;
pub mod qa;
pub mod safety;
pub mod session;
pub mod work_order;
