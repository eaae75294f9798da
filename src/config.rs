use crate::codegen::{CodeGenerator, IndentStrategy};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP bind address
    pub http_bind: SocketAddr,

    /// SQLite file holding the rig and connection tables
    pub database_path: PathBuf,

    /// Log level, overridden by `RUST_LOG` when set
    pub log_level: String,

    pub log_format: LogFormat,

    /// Language used by `/api/generate` when the request names none
    pub default_language: String,

    pub indent_strategy: IndentStrategy,

    /// Name of the session cookie
    pub session_cookie: String,

    /// Seconds a storefront session may sit idle before it is dropped
    pub session_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind: SocketAddr::from(([0, 0, 0, 0], 5000)),
            database_path: PathBuf::from("rigboard.db"),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            default_language: "python".to_string(),
            indent_strategy: IndentStrategy::Structured,
            session_cookie: "rigboard_session".to_string(),
            session_ttl_secs: 3600,
        }
    }
}

impl Config {
    /// Reads a TOML or JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&text).context("Failed to parse JSON config")?
        } else {
            toml::from_str(&text).context("Failed to parse TOML config")?
        };
        Ok(config)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if EnvFilter::try_new(&self.log_level).is_err() {
            bail!("log_level '{}' is not a valid filter directive", self.log_level);
        }
        if !CodeGenerator::default().supports(&self.default_language) {
            bail!("default_language '{}' is not a supported language", self.default_language);
        }
        if self.session_cookie.trim().is_empty() {
            bail!("session_cookie must not be empty");
        }
        if self.session_ttl_secs == 0 {
            bail!("session_ttl_secs must be greater than 0");
        }
        if self.database_path.as_os_str().is_empty() {
            bail!("database_path must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http_bind.port(), 5000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.session_ttl(), Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.default_language = "cobol".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session_cookie = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.session_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            http_bind = "127.0.0.1:8080"
            indent_strategy = "successor"
            session_ttl_secs = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.http_bind.port(), 8080);
        assert_eq!(config.indent_strategy, IndentStrategy::Successor);
        assert_eq!(config.default_language, "python");
        assert_eq!(config.session_ttl(), Duration::from_secs(90));
    }
}
