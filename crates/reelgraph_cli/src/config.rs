//! Environment-driven settings for the smoke binary.

use reelgraph_core::{default_log_level, DEFAULT_POPULAR_COUNT};

/// Smoke binary configuration.
///
/// | Env Var                   | Default                  |
/// |---------------------------|--------------------------|
/// | `REELGRAPH_LOG_LEVEL`     | `default_log_level()`    |
/// | `REELGRAPH_LOG_DIR`       | unset (file logging off) |
/// | `REELGRAPH_POPULAR_COUNT` | `DEFAULT_POPULAR_COUNT`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub log_level: String,
    pub log_dir: Option<String>,
    pub popular_count: i64,
}

impl CliConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let log_level = lookup("REELGRAPH_LOG_LEVEL")
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = lookup("REELGRAPH_LOG_DIR").filter(|value| !value.trim().is_empty());
        let popular_count = match lookup("REELGRAPH_POPULAR_COUNT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|err| format!("REELGRAPH_POPULAR_COUNT must be an integer: {err}"))?,
            None => DEFAULT_POPULAR_COUNT,
        };

        Ok(Self {
            log_level,
            log_dir,
            popular_count,
        })
    }
}
