use crate::config::types::{
    Clock, ConfigFile, FilterConfig, LoggingConfig, ResolvedConfig,
};
use chrono_tz::Tz;
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `config_path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = default_config_path();
                if !p.exists() {
                    tracing::debug!(path = %p.display(), "no config file, using defaults");
                    return Ok(Self::defaults());
                }
                p
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        Self::load_str(&s, &path)
    }

    /// Parse configuration text that was read from `origin`.
    pub fn load_str(s: &str, origin: &Path) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile = toml::from_str(s)
            .map_err(|e| ConfigError::ParseError(origin.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let mut resolved = Self::resolve(&cf)?;
        resolved.source = Some(origin.to_path_buf());
        Ok(resolved)
    }

    pub fn defaults() -> ResolvedConfig {
        ResolvedConfig {
            source: None,
            filters: FilterConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    fn resolve(cf: &ConfigFile) -> Result<ResolvedConfig, ConfigError> {
        let time_zone: Tz = cf
            .locale
            .time_zone
            .parse()
            .map_err(|_| ConfigError::UnknownTimeZone(cf.locale.time_zone.clone()))?;

        let filters = FilterConfig {
            time_zone,
            clock: Clock::System,
            midday_midnight: cf.locale.midday_midnight,
            headings_start_with: cf.markdown.headings_start_with,
            currency_unit: cf.currency.unit.clone(),
            currency_display: cf.currency.display,
        };

        // Resolve log file path if present
        let logging = if let Some(ref file) = cf.logging.file {
            LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            cf.logging.clone()
        };

        Ok(ResolvedConfig { source: None, filters, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("protofilters").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("protofilters").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
