use tempo_config::{StoreConfig, TempoConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TempoConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TempoConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.identity.is_configured() && has_env_prefix(&env_keys, "TEMPO_IDENTITY") {
        warnings.push(
            "Identity config appears default while TEMPO_IDENTITY* env vars exist. Use double underscores (example: TEMPO_IDENTITY__USER_ID)."
                .to_string(),
        );
    } else if !config.identity.is_configured() {
        warnings.push(
            "No identity configured; set identity.user_id (or TEMPO_IDENTITY__USER_ID) to sign in."
                .to_string(),
        );
    }

    if config.store.path == StoreConfig::default().path && has_env_prefix(&env_keys, "TEMPO_STORE")
    {
        warnings.push(
            "Store config appears default while TEMPO_STORE* env vars exist. Use double underscores (example: TEMPO_STORE__PATH)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
