//! # ff-kb
//!
//! Knowledge base retrieval for FieldFix.
//!
//! Three static corpora (manuals, runbooks, incident records) are read from a
//! directory of JSON files, held once per process by [`KbStore`], and ranked
//! against free-text queries with a simple additive substring score.

pub mod corpus;
pub mod error;
pub mod format;
pub mod ranker;
pub mod store;

pub use corpus::{Incident, KbCorpus, Manual, Runbook};
pub use error::KbError;
pub use format::format_for_prompt;
pub use ranker::{KbHit, search};
pub use store::KbStore;
