//! Corpus record types and the directory loader.
//!
//! Every field other than `id` is optional in the files; missing text fields
//! simply never score.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::KbError;

pub const MANUALS_FILE: &str = "manuals.json";
pub const RUNBOOKS_FILE: &str = "runbooks.json";
pub const INCIDENTS_FILE: &str = "incidents.json";

/// Equipment manual excerpt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manual {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Step-by-step operational procedure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runbook {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Past incident and how it was resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The three corpora, in ranking tie-break order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KbCorpus {
    pub manuals: Vec<Manual>,
    pub runbooks: Vec<Runbook>,
    pub incidents: Vec<Incident>,
}

impl KbCorpus {
    /// Load all three corpus files from `dir`.
    ///
    /// Never fails: a missing or malformed file is logged and contributes an
    /// empty corpus, so search keeps working on whatever did load.
    #[must_use]
    pub fn load_dir(dir: &Path) -> Self {
        let corpus = Self {
            manuals: load_or_empty(&dir.join(MANUALS_FILE)),
            runbooks: load_or_empty(&dir.join(RUNBOOKS_FILE)),
            incidents: load_or_empty(&dir.join(INCIDENTS_FILE)),
        };
        tracing::debug!(
            dir = %dir.display(),
            manuals = corpus.manuals.len(),
            runbooks = corpus.runbooks.len(),
            incidents = corpus.incidents.len(),
            total = corpus.len(),
            "kb corpus loaded"
        );
        corpus
    }

    /// Total number of records across corpora.
    #[must_use]
    pub fn len(&self) -> usize {
        self.manuals.len() + self.runbooks.len() + self.incidents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read one corpus file as a JSON array of records.
///
/// # Errors
///
/// Returns `KbError::Io` if the file cannot be read, or `KbError::Parse` if it
/// is not an array of the expected record shape.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, KbError> {
    let text = std::fs::read_to_string(path).map_err(|source| KbError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| KbError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match load_file(path) {
        Ok(records) => records,
        Err(error) => {
            tracing::warn!(%error, "kb corpus file unavailable; using empty corpus");
            Vec::new()
        }
    }
}
