//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, generated by the store via
//! `randomblob(4)`.

pub const PREFIX_SESSION: &str = "ses";
pub const PREFIX_OBSERVATION: &str = "obs";
pub const PREFIX_KB_SNAPSHOT: &str = "kbs";
pub const PREFIX_PLAN: &str = "pln";
pub const PREFIX_SAFETY_CHECK: &str = "sfc";
pub const PREFIX_QA_RESULT: &str = "qar";
pub const PREFIX_WORK_ORDER: &str = "wo";
pub const PREFIX_EVENT: &str = "evt";

/// All prefixes, in entity declaration order.
pub const ALL_PREFIXES: [&str; 8] = [
    PREFIX_SESSION,
    PREFIX_OBSERVATION,
    PREFIX_KB_SNAPSHOT,
    PREFIX_PLAN,
    PREFIX_SAFETY_CHECK,
    PREFIX_QA_RESULT,
    PREFIX_WORK_ORDER,
    PREFIX_EVENT,
];
