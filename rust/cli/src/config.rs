use serde::{Deserialize, Serialize};
use squares_ai::POLICY_NAMES;
use squares_ai::rewards::{RewardError, RewardVector};
use std::fs;

pub const CONFIG_ENV: &str = "SQUARES_CONFIG";
pub const SEED_ENV: &str = "SQUARES_SEED";
pub const MODE_ENV: &str = "SQUARES_MODE";
pub const TIME_BUDGET_ENV: &str = "SQUARES_TIME_BUDGET_MS";
pub const REWARDS_ENV: &str = "SQUARES_REWARDS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub mode: String,
    pub time_budget_ms: u64,
    /// Weights for probability-only play
    pub rewards: RewardVector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub mode: ValueSource,
    pub time_budget_ms: ValueSource,
    pub rewards: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            mode: ValueSource::Default,
            time_budget_ms: ValueSource::Default,
            rewards: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            mode: "search".into(),
            time_budget_ms: 1_000,
            rewards: RewardVector::trained(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Rewards(RewardError),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}
impl From<RewardError> for ConfigError {
    fn from(e: RewardError) -> Self {
        ConfigError::Rewards(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Rewards(e) => write!(f, "{}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.mode {
            cfg.mode = v;
            sources.mode = ValueSource::File;
        }
        if let Some(v) = f.time_budget_ms {
            cfg.time_budget_ms = v;
            sources.time_budget_ms = ValueSource::File;
        }
        if let Some(v) = f.rewards {
            cfg.rewards = v;
            sources.rewards = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(mode) = std::env::var(MODE_ENV)
        && !mode.is_empty()
    {
        cfg.mode = mode.trim().to_ascii_lowercase();
        sources.mode = ValueSource::Env;
    }
    if let Ok(ms) = std::env::var(TIME_BUDGET_ENV)
        && !ms.is_empty()
    {
        cfg.time_budget_ms = ms
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid time budget '{}'", ms)))?;
        sources.time_budget_ms = ValueSource::Env;
    }
    if let Ok(rewards) = std::env::var(REWARDS_ENV)
        && !rewards.is_empty()
    {
        cfg.rewards = rewards.parse()?;
        sources.rewards = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    time_budget_ms: Option<u64>,
    #[serde(default)]
    rewards: Option<RewardVector>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !POLICY_NAMES.contains(&cfg.mode.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: mode must be one of {}, got '{}'",
            POLICY_NAMES.join(", "),
            cfg.mode
        )));
    }
    if cfg.time_budget_ms == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: time_budget_ms must be >0".into(),
        ));
    }
    Ok(())
}
