//! libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    ".fieldfix/fieldfix.db".to_string()
}

const fn default_auto_migrate() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Local database file, or `:memory:`.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Run embedded migrations on open. When off, a database without the
    /// FieldFix tables reports a storage-not-ready status instead.
    #[serde(default = "default_auto_migrate")]
    pub auto_migrate: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            auto_migrate: default_auto_migrate(),
        }
    }
}
