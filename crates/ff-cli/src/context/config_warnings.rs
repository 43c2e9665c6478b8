use ff_config::FieldFixConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &FieldFixConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &FieldFixConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.gemini.is_configured() {
        if has_env_prefix(&env_keys, "FIELDFIX_GEMINI") {
            warnings.push(
                "Gemini config appears default while FIELDFIX_GEMINI* env vars exist. Use double underscores (example: FIELDFIX_GEMINI__API_KEY)."
                    .to_string(),
            );
        } else {
            warnings.push(
                "No Gemini API key configured; analysis uses canned observations and planning fails unless quota fallback applies."
                    .to_string(),
            );
        }
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
