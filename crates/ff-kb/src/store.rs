//! Process-scoped, load-once corpus holder.
//!
//! Built once at startup and handed to every stage through the pipeline
//! context. The first `corpus()` call reads the directory; later calls share
//! the same `Arc`. There is no reload path.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::corpus::KbCorpus;
use crate::ranker::{self, KbHit};

pub struct KbStore {
    dir: PathBuf,
    corpus: OnceLock<Arc<KbCorpus>>,
}

impl KbStore {
    /// Store that lazily loads from `dir` on first use.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            corpus: OnceLock::new(),
        }
    }

    /// Store around an already-built corpus. Used by tests and embedders that
    /// assemble records in memory.
    #[must_use]
    pub fn from_corpus(corpus: KbCorpus) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Arc::new(corpus));
        Self {
            dir: PathBuf::new(),
            corpus: cell,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The shared corpus, loading it on first access.
    #[must_use]
    pub fn corpus(&self) -> Arc<KbCorpus> {
        Arc::clone(self.corpus.get_or_init(|| {
            let corpus = KbCorpus::load_dir(&self.dir);
            if corpus.is_empty() {
                tracing::warn!(dir = %self.dir.display(), "kb corpus is empty; searches return nothing");
            }
            Arc::new(corpus)
        }))
    }

    /// Rank the shared corpus against `query`.
    #[must_use]
    pub fn search(&self, query: &str, max_results: usize) -> Vec<KbHit> {
        ranker::search(&self.corpus(), query, max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{MANUALS_FILE, Manual};
    use pretty_assertions::assert_eq;

    #[test]
    fn corpus_is_loaded_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANUALS_FILE), r#"[{"id":"MAN-1","title":"Fan belt"}]"#).unwrap();
        let store = KbStore::new(dir.path());

        let first = store.corpus();
        // later edits are not observed
        std::fs::write(dir.path().join(MANUALS_FILE), "[]").unwrap();
        let second = store.corpus();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.manuals.len(), 1);
    }

    #[test]
    fn from_corpus_never_touches_disk() {
        let store = KbStore::from_corpus(KbCorpus {
            manuals: vec![Manual {
                id: "MAN-2".into(),
                title: Some("Belt tension".into()),
                ..Manual::default()
            }],
            ..KbCorpus::default()
        });
        let hits = store.search("belt", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].result.id, "MAN-2");
    }

    #[tokio::test]
    async fn concurrent_first_access_converges() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANUALS_FILE), r#"[{"id":"MAN-1"}]"#).unwrap();
        let store = Arc::new(KbStore::new(dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.corpus() })
            })
            .collect();

        let mut loaded = Vec::new();
        for h in handles {
            loaded.push(h.await.unwrap());
        }
        assert!(loaded.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
