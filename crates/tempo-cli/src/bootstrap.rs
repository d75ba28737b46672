use anyhow::Context;
use tempo_config::TempoConfig;

/// Load `.env` (if present) and then the layered configuration.
pub fn load_config() -> anyhow::Result<TempoConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    TempoConfig::load().context("failed to load tempo configuration")
}
