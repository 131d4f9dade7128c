use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let personachat_dir = home.join(".personachat");

        if !personachat_dir.exists() {
            fs::create_dir_all(&personachat_dir)
                .context("Failed to create .personachat directory")?;
        }

        Self::load_or_init_at(&personachat_dir.join("config.toml"))
    }

    /// Load the config at `config_path`, writing defaults there first if it
    /// does not exist yet. Environment overrides are applied after loading.
    pub fn load_or_init_at(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents =
                fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| ConfigError::Load(e.to_string()))
                .context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            tracing::info!(path = %config_path.display(), "Wrote default config");
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
