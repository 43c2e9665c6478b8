//! # ff-schema
//!
//! JSON Schema generation and validation for FieldFix stage outputs.
//!
//! Contract types live in `ff-core::contracts` with `#[derive(JsonSchema)]`.
//! This crate builds their schemas once, validates parsed generator output
//! against them, and reports failures as field-level violations.

pub mod error;
pub mod registry;
pub mod steps;

pub use error::{SchemaError, Violation};
pub use registry::{OBSERVATION, PLAN, QA, SAFETY_CHECK, SchemaRegistry};
pub use steps::check_plan_steps;
