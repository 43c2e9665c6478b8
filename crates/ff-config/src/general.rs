//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of KB hits returned by a search.
const fn default_max_results() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default = "default_max_results")]
    pub default_max_results: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_max_results: default_max_results(),
        }
    }
}
