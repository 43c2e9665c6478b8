use std::path::Path;

use anyhow::Context;
use ff_config::FieldFixConfig;

/// Load `.env` from the project root (then the working directory), then the
/// layered config rooted at `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<FieldFixConfig> {
    load_project_dotenv(project_root)?;
    FieldFixConfig::load_for_project(project_root).map_err(anyhow::Error::from)
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }
    dotenvy::dotenv().ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".fieldfix")).unwrap();
        std::fs::write(
            dir.path().join(".fieldfix/config.toml"),
            "[general]\ndefault_max_results = 4\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.general.default_max_results, 4);
    }

    #[test]
    fn broken_dotenv_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "NOT A VALID LINE 'unterminated").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to load dotenv file"), "{err}");
    }
}
