use crate::error::{FieldScoreError, Result};
use crate::logic::ScoringThresholds;
use crate::models::Language;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm_api: FarmApiConfig,
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub scoring: ScoringThresholds,
    #[serde(default)]
    pub language: Language,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct FarmApiConfig {
    pub url: String,
    #[serde(default)]
    pub token: String,
    /// Upper bound for each individual source fetch
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl FarmApiConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

impl std::fmt::Debug for FarmApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FarmApiConfig")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FieldScoreError::Config(format!(
                "Config file not found at {:?}. Run `fieldscore init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FieldScoreError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse YAML after `${VAR}` substitution and validate the thresholds
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FieldScoreError::Config(format!("Failed to parse config: {}", e)))?;

        config.scoring.validate()?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("fieldscore").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/fieldscore/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FieldScoreError::Config("Cannot determine config directory".into()))?
            .join("fieldscore");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up fieldscore.");
        println!();

        println!("Farm backend API (leave URL blank to use demo data)");
        let url: String = Input::new()
            .with_prompt("  Base URL")
            .default("http://localhost:8080/api".into())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?;

        let token: String = if url.is_empty() {
            String::new()
        } else {
            Password::new()
                .with_prompt("  Bearer token")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?
        };

        let timeout_secs: u64 = Input::new()
            .with_prompt("  Per-source timeout (seconds)")
            .default(default_timeout_secs())
            .interact_text()
            .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("OpenWeatherMap (leave API key blank to use the farm API's weather)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            let latitude: f64 = Input::new()
                .with_prompt("  Latitude")
                .default(13.75)
                .interact_text()
                .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?;

            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .default(100.5)
                .interact_text()
                .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?;

            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                latitude,
                longitude,
                enabled: true,
            })
        };

        let language: String = Input::new()
            .with_prompt("Output language (en/th)")
            .default("en".into())
            .interact_text()
            .map_err(|e| FieldScoreError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            farm_api: FarmApiConfig {
                url,
                token,
                timeout_secs,
            },
            openweathermap,
            scoring: ScoringThresholds::default(),
            language: Language::from_str(&language).unwrap_or_default(),
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FieldScoreError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# fieldscore configuration\n\
             # Generated by `fieldscore init`\n\
             # Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| FieldScoreError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm_api: FarmApiConfig {
                url: String::new(),
                token: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            openweathermap: None,
            scoring: ScoringThresholds::default(),
            language: Language::En,
        }
    }
}
