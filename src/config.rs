use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://www.rottentomatoes.com";
const CONFIG_FILE: &str = "rt_scores";
const ENV_PREFIX: &str = "RT";

/// Runtime settings: defaults, then `rt_scores.toml`, then `RT_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    /// Unset means requests may block indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// JSON object of `word -> polarity` merged over the built-in lexicon.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            user_agent: None,
            lexicon_path: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(env_source(None)),
        )
    }

    /// Trailing slashes are dropped from `base_url` so URL builders can append paths.
    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut settings: Settings = builder
            .set_default("base_url", DEFAULT_BASE_URL)?
            .build()?
            .try_deserialize()?;
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        Ok(settings)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `RT_*` variables from the process environment, or from `vars` when given.
fn env_source(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .source(vars)
}
