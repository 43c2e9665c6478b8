//! # ff-core
//!
//! Core types, ID prefixes, and error types for FieldFix.
//!
//! This crate provides the foundational types shared across all FieldFix crates:
//! - Entity structs for every record a repair session owns (observations, plans, ...)
//! - Status and kind enums, including the session state machine
//! - Stage-output contracts that generated JSON must satisfy
//! - ID prefix constants
//! - Cross-cutting error types
//! - Stage response types and the session export envelope

pub mod contracts;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod ids;
pub mod responses;
