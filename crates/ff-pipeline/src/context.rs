//! Everything a stage needs, built once and passed by reference.

use std::path::PathBuf;

use ff_config::PathsConfig;
use ff_db::FieldService;
use ff_gen::ModelRouter;
use ff_kb::KbStore;
use ff_schema::SchemaRegistry;

/// Shared resources for every stage of every session.
///
/// The KB corpus inside [`KbStore`] is loaded on first use and then shared
/// read-only; nothing else here is mutable.
pub struct PipelineContext {
    pub service: FieldService,
    pub schemas: SchemaRegistry,
    pub kb: KbStore,
    pub router: ModelRouter,
    /// Analyze resolves image paths under this directory.
    pub media_root: PathBuf,
    /// Holds `plans/<scenario>.plan.json`.
    pub fallback_dir: PathBuf,
    /// KbSearch limit when the request does not give one.
    pub default_max_results: usize,
}

impl PipelineContext {
    #[must_use]
    pub fn new(service: FieldService, router: ModelRouter, paths: &PathsConfig) -> Self {
        Self {
            service,
            schemas: SchemaRegistry::new(),
            kb: KbStore::new(paths.kb_dir.clone()),
            router,
            media_root: paths.media_root.clone(),
            fallback_dir: paths.fallback_dir.clone(),
            default_max_results: 10,
        }
    }

    /// Replace the KB store, e.g. with an in-memory corpus.
    #[must_use]
    pub fn with_kb(mut self, kb: KbStore) -> Self {
        self.kb = kb;
        self
    }

    #[must_use]
    pub fn with_default_max_results(mut self, max_results: usize) -> Self {
        self.default_max_results = max_results;
        self
    }
}
