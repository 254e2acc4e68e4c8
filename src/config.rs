use crate::errors::{CliError, ConfigError, Result};
use log::debug;
use crate::cli::parse_format;
use rbxthumb_core::{ThumbnailFormat, ThumbnailSize};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_BASE_DOMAIN: &str = "RBXTHUMB_BASE_DOMAIN";
pub const ENV_TIMEOUT_SECS: &str = "RBXTHUMB_TIMEOUT_SECS";

/// API configuration section
///
/// # Fields
/// * `base_domain` - Optional domain the service subdomains hang off (defaults to `roblox.com`)
/// * `timeout_secs` - Optional per-request timeout in seconds
/// * `user_agent` - Optional User-Agent header value
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiSection {
    pub base_domain: Option<String>,
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Request defaults applied when a command line flag is absent
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DefaultsSection {
    #[serde(default, deserialize_with = "deserialize_format")]
    pub format: Option<ThumbnailFormat>,
    pub size: Option<ThumbnailSize>,
    pub circular: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigData {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

/// Configuration loaded from `~/.rbxthumb/config.toml` with environment overrides
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub data: ConfigData,
}

impl Config {
    /// Load the user's config file, falling back to defaults when it does not exist
    pub fn new() -> Result<Self> {
        let config_path = get_config_dir()?.join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load a specific file without applying environment overrides
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = fs::read_to_string(path).map_err(CliError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            ConfigData::default()
        };

        Ok(Config {
            config_path: path.to_path_buf(),
            data,
        })
    }

    /// Apply overrides from `lookup` (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(domain) = lookup(ENV_BASE_DOMAIN) {
            debug!("{} overrides base domain: {}", ENV_BASE_DOMAIN, domain);
            self.data.api.base_domain = Some(domain);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: ENV_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
            })?;
            debug!("{} overrides timeout: {}s", ENV_TIMEOUT_SECS, secs);
            self.data.api.timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Show all configuration as TOML
    pub fn show_config(&self) -> Result<String> {
        toml::to_string_pretty(&self.data)
            .map_err(|e| ConfigError::TomlError(e.to_string()).into())
    }
}

impl rbxthumb_api::ApiConfig for Config {
    type Error = CliError;

    fn get_base_domain(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(self.data.api.base_domain.clone())
    }

    fn get_timeout(&self) -> std::result::Result<Option<Duration>, Self::Error> {
        match self.data.api.timeout_secs {
            Some(0) => Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                value: "0".to_string(),
            }
            .into()),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }

    fn get_user_agent(&self) -> std::result::Result<Option<String>, Self::Error> {
        Ok(self.data.api.user_agent.clone())
    }
}

/// Same spellings as `--format`, e.g. `jpg`
fn deserialize_format<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<ThumbnailFormat>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse_format(&raw).map_err(serde::de::Error::custom))
        .transpose()
}

/// Get configuration directory path
fn get_config_dir() -> Result<PathBuf> {
    let home_dir = home::home_dir().ok_or_else(|| {
        ConfigError::DirectoryNotFound("Could not find home directory".to_string())
    })?;

    Ok(home_dir.join(".rbxthumb"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rbxthumb_api::ApiConfig;
    use std::collections::HashMap;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.data, ConfigData::default());
        assert_eq!(config.get_base_domain().unwrap(), None);
        assert_eq!(config.get_timeout().unwrap(), None);
    }

    #[test]
    fn test_parse_full_file() {
        let (_dir, path) = write_config(
            r#"
[api]
base_domain = "roproxy.com"
timeout_secs = 10
user_agent = "thumb-bot/1.0"

[defaults]
format = "jpeg"
size = "420x420"
circular = true
"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.get_base_domain().unwrap().as_deref(),
            Some("roproxy.com")
        );
        assert_eq!(
            config.get_timeout().unwrap(),
            Some(Duration::from_secs(10))
        );
        assert_eq!(
            config.get_user_agent().unwrap().as_deref(),
            Some("thumb-bot/1.0")
        );
        assert_eq!(config.data.defaults.format, Some(ThumbnailFormat::Jpeg));
        assert_eq!(config.data.defaults.size, Some(ThumbnailSize::square(420)));
        assert_eq!(config.data.defaults.circular, Some(true));
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let (_dir, path) = write_config("[api\nbase_domain = ");
        assert!(matches!(
            Config::load_from(&path),
            Err(CliError::Config(ConfigError::TomlError(_)))
        ));

        let (_dir, path) = write_config("[defaults]\nsize = \"big\"\n");
        assert!(matches!(
            Config::load_from(&path),
            Err(CliError::Config(ConfigError::TomlError(_)))
        ));

        let (_dir, path) = write_config("[defaults]\nformat = \"bmp\"\n");
        assert!(matches!(
            Config::load_from(&path),
            Err(CliError::Config(ConfigError::TomlError(_)))
        ));

        let (_dir, path) = write_config("[defaults]\nformat = \"JPG\"\n");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data.defaults.format, Some(ThumbnailFormat::Jpeg));
    }

    #[test]
    fn test_env_overrides_file() {
        let (_dir, path) = write_config("[api]\nbase_domain = \"roblox.com\"\ntimeout_secs = 30\n");
        let mut config = Config::load_from(&path).unwrap();

        let env: HashMap<&str, &str> = [
            (ENV_BASE_DOMAIN, "roproxy.com"),
            (ENV_TIMEOUT_SECS, "5"),
        ]
        .into_iter()
        .collect();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data.api.base_domain.as_deref(), Some("roproxy.com"));
        assert_eq!(config.data.api.timeout_secs, Some(5));
    }

    #[test]
    fn test_bad_timeout_values() {
        let mut config = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        let err = config
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::InvalidValue { .. })
        ));

        config.data.api.timeout_secs = Some(0);
        assert!(config.get_timeout().is_err());
    }

    #[test]
    fn test_show_config_round_trips() {
        let mut config = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        config.data.api.base_domain = Some("roproxy.com".to_string());
        config.data.defaults.size = Some(ThumbnailSize::new(768, 432));
        config.data.defaults.format = Some(ThumbnailFormat::Png);

        let shown = config.show_config().unwrap();
        let parsed: ConfigData = toml::from_str(&shown).unwrap();
        assert_eq!(parsed, config.data);
    }
}
