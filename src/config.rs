//! Application configuration.

use crate::consts::dashboard_consts::{
    CONFIG_DIR, CONFIG_FILE, DEFAULT_DEMO_SEED, DEFAULT_REFRESH_INTERVAL_SECS,
};
use crate::currency::CurrencyFormat;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

/// Where the dashboard gets its customer data.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// In-process generated data.
    #[default]
    Demo,
    /// The CRM service for the selected environment.
    Remote,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub data_source: DataSource,
    /// Locale used to format currency, e.g. `en-US`.
    pub locale: String,
    /// Seconds between reloads in headless mode.
    pub refresh_interval_secs: u64,
    /// Seed for the demo data generator.
    pub demo_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DataSource::Demo,
            locale: "en-US".to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            demo_seed: DEFAULT_DEMO_SEED,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Like [`Config::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        match Self::load_from_file(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Currency format for the configured locale, en-US when unknown.
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::for_locale(&self.locale).unwrap_or_else(|| {
            warn!("Unknown locale {:?}, formatting as en-US", self.locale);
            CurrencyFormat::default()
        })
    }
}

/// Path of the config file under the user's home directory.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}
