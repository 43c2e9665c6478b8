//! Filesystem locations for static data and outputs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_kb_dir() -> PathBuf {
    PathBuf::from("kb")
}

fn default_fallback_dir() -> PathBuf {
    PathBuf::from("demo_fallback")
}

fn default_media_root() -> PathBuf {
    PathBuf::from("public")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory holding `manuals.json`, `runbooks.json`, `incidents.json`.
    #[serde(default = "default_kb_dir")]
    pub kb_dir: PathBuf,

    /// Directory holding `plans/<scenario>.plan.json`.
    #[serde(default = "default_fallback_dir")]
    pub fallback_dir: PathBuf,

    /// Root that Analyze resolves image paths against.
    #[serde(default = "default_media_root")]
    pub media_root: PathBuf,

    /// Where `fieldfix export` writes files by default.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            kb_dir: default_kb_dir(),
            fallback_dir: default_fallback_dir(),
            media_root: default_media_root(),
            export_dir: default_export_dir(),
        }
    }
}
