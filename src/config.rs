use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Endpoint the client talks to when nothing else is configured.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://n8n.nandorr.com/webhook-test/d35df237-9fb2-477b-a5c5-8ade3da6b46a";

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Environment variable that overrides the saved webhook URL.
pub const WEBHOOK_URL_ENV: &str = "SONGMATCH_WEBHOOK_URL";

/// Configuration defaults that can be saved to a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_browser: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Create a new empty config
    pub fn new() -> Self {
        Config {
            webhook_url: None,
            timeout_secs: None,
            color: None,
            open_browser: None,
            log_level: None,
        }
    }

    /// Built-in values, used underneath the saved file and the command line
    pub fn builtin() -> Self {
        Config {
            webhook_url: Some(DEFAULT_WEBHOOK_URL.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            color: Some(true),
            open_browser: Some(true),
            log_level: Some("info".to_string()),
        }
    }

    /// Get the config file path (~/.state/songmatch/defaults.toml)
    pub fn get_config_path() -> std::result::Result<PathBuf, io::Error> {
        let home = std::env::var("HOME")
            .map_err(|_| io::Error::new(io::ErrorKind::NotFound, "HOME environment variable not set"))?;

        let config_dir = Path::new(&home).join(".state").join("songmatch");
        Ok(config_dir.join("defaults.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from a file; a missing file is an empty config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;

        Ok(())
    }

    /// Config carrying only what the environment sets
    pub fn from_env() -> Self {
        let mut config = Config::new();
        if let Ok(url) = std::env::var(WEBHOOK_URL_ENV) {
            if !url.trim().is_empty() {
                config.webhook_url = Some(url.trim().to_string());
            }
        }
        config
    }

    /// Merge this config with another, preferring values from other
    pub fn merge(&mut self, other: &Config) {
        if other.webhook_url.is_some() {
            self.webhook_url = other.webhook_url.clone();
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.open_browser.is_some() {
            self.open_browser = other.open_browser;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level.clone();
        }
    }

    /// Webhook URL, validated to look like an http(s) endpoint
    pub fn webhook_url(&self) -> Result<&str> {
        let url = self.webhook_url.as_deref().unwrap_or(DEFAULT_WEBHOOK_URL);
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(url)
        } else {
            Err(Error::Config(format!("webhook URL must be http(s): {}", url)))
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn browser_enabled(&self) -> bool {
        self.open_browser.unwrap_or(true)
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        match self.log_level.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("off") => log::LevelFilter::Off,
            Some("error") => log::LevelFilter::Error,
            Some("warn") | Some("warning") => log::LevelFilter::Warn,
            Some("debug") => log::LevelFilter::Debug,
            Some("trace") => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }

    /// Print the config in a human-readable format
    pub fn print(&self, title: &str) {
        println!("{}:", title);

        if let Some(url) = &self.webhook_url {
            println!("  Webhook URL:        {}", url);
        }
        if let Some(timeout) = self.timeout_secs {
            println!("  Request timeout:    {} seconds", timeout);
        }
        if let Some(color) = self.color {
            println!("  Colour output:      {}", if color { "enabled" } else { "disabled" });
        }
        if let Some(open_browser) = self.open_browser {
            println!("  Open browser:       {}", if open_browser { "enabled" } else { "disabled" });
        }
        if let Some(level) = &self.log_level {
            println!("  Log level:          {}", level);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
