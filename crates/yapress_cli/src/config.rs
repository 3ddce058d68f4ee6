//! TOML configuration with per-field defaults.
//!
//! ```toml
//! [server]
//! site = "notes"
//! bind = "0.0.0.0:8000"
//!
//! [database]
//! path = "/var/lib/yapress/notes.sqlite3"
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/yapress"
//!
//! [news]
//! count_on_home_page = 10
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use yapress_core::NEWS_COUNT_ON_HOME_PAGE;
use yapress_web::{Site, WebSettings};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub news: NewsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub site: Site,
    pub bind: String,
    pub secure_cookies: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            site: Site::News,
            bind: "127.0.0.1:8000".to_string(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("yapress.sqlite3"),
        }
    }
}

/// `level` falls back to the build-mode default; no `dir` means stderr only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewsConfig {
    pub count_on_home_page: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            count_on_home_page: NEWS_COUNT_ON_HOME_PAGE,
        }
    }
}

impl Config {
    /// Reads `path`, or returns defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.news.count_on_home_page == 0 {
            anyhow::bail!("news.count_on_home_page must be at least 1");
        }
        Ok(config)
    }

    pub fn web_settings(&self) -> WebSettings {
        WebSettings {
            site: self.server.site,
            news_count_on_home_page: self.news.count_on_home_page,
            secure_cookies: self.server.secure_cookies,
        }
    }
}
