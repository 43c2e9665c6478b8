use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use ff_config::{FieldFixConfig, PathsConfig};
use ff_db::FieldService;
use ff_gen::{GeminiClient, Generator, ModelRouter, UnconfiguredGenerator};
use ff_pipeline::PipelineContext;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub pipeline: PipelineContext,
    pub config: FieldFixConfig,
}

impl AppContext {
    /// Open the store and wire the generator, resolving relative paths
    /// against `project_root`.
    pub async fn init(project_root: PathBuf, config: FieldFixConfig) -> anyhow::Result<Self> {
        let db_path = if config.store.db_path == ":memory:" {
            config.store.db_path.clone()
        } else {
            let path = resolve(&project_root, Path::new(&config.store.db_path));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
            path.to_string_lossy().into_owned()
        };

        let service = FieldService::new_local(&db_path, config.store.auto_migrate)
            .await
            .context("failed to initialize ff-db service")?;

        let generator: Arc<dyn Generator> = if config.gemini.is_configured() {
            Arc::new(GeminiClient::new(&config.gemini).context("failed to build Gemini client")?)
        } else {
            Arc::new(UnconfiguredGenerator)
        };
        let router = ModelRouter::from_config(generator, &config.gemini, &config.retry);

        let paths = PathsConfig {
            kb_dir: resolve(&project_root, &config.paths.kb_dir),
            fallback_dir: resolve(&project_root, &config.paths.fallback_dir),
            media_root: resolve(&project_root, &config.paths.media_root),
            export_dir: resolve(&project_root, &config.paths.export_dir),
        };
        let pipeline = PipelineContext::new(service, router, &paths)
            .with_default_max_results(config.general.default_max_results);

        tracing::debug!(db = %db_path, root = %project_root.display(), "application context ready");
        Ok(Self {
            pipeline,
            config: FieldFixConfig { paths, ..config },
        })
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
