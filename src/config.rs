use anyhow::{Context, Result};

/// Connection settings for the hosted backend, loaded from environment
/// variables once at startup. Missing values are a fatal startup condition.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_anon_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend_url = require_env("BACKEND_URL")?;

        Ok(Config {
            // Trailing slashes would otherwise double up when joining paths.
            backend_url: backend_url.trim_end_matches('/').to_string(),
            backend_anon_key: require_env("BACKEND_ANON_KEY")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
