//! # ff-rules
//!
//! Deterministic checks that run around the generative stages. Nothing here
//! does I/O or calls a model, so every function is a pure mapping from its
//! inputs.
//!
//! - [`safety`]: risk flags + plan text → PPE, hazards, pre-steps
//! - [`qa`]: citation integrity gate over any plan-like JSON
//! - [`work_order`]: parts, time, number, summary heuristics

pub mod qa;
pub mod safety;
pub mod work_order;

pub use qa::{CanonicalStep, HardRuleReport, PlanShape, validate_citations};
pub use safety::{SafetyInput, evaluate_safety};
pub use work_order::{estimated_time, parts_for, work_order_number, work_order_summary};
