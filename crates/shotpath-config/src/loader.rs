//! Configuration file loading and parsing.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::ShotpathConfig;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from `.shotpath/config.yaml`.
    pub fn load(&self) -> Result<ShotpathConfig, ConfigError> {
        let config_path = self.base_path.join(".shotpath/config.yaml");

        if !config_path.exists() {
            // Return defaults if no config file
            return Ok(ShotpathConfig::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let config: ShotpathConfig =
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&config)?;
        Ok(config)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").unwrap();

        for cap in re.captures_iter(content) {
            let full_match = cap.get(0).unwrap().as_str();
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    fn validate(&self, config: &ShotpathConfig) -> Result<(), ConfigError> {
        if config.template.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "template must not be empty".to_string(),
            });
        }

        // The template must compile under the configured style.
        let schema =
            shotpath_schema::Schema::compile_lenient(&config.template, config.style.to_style());
        if !schema.is_valid() {
            let reasons: Vec<String> = schema.errors().iter().map(ToString::to_string).collect();
            return Err(ConfigError::ValidationError {
                message: format!("template does not compile: {}", reasons.join("; ")),
            });
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, config: &ShotpathConfig) -> Result<(), ConfigError> {
        let config_dir = self.base_path.join(".shotpath");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.yaml");
        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(config_path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
