//! Layered server configuration.
//!
//! Sources, later ones winning: built-in defaults, the YAML file given with
//! `--config`, `APP__SECTION__KEY` environment variables, then CLI flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use user_settings::{SearchConfig, UserSettingsConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file does not exist: {0}")]
    MissingFile(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    #[error("failed to render configuration: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default = "default_dsn")]
    pub dsn: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: default_dsn(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_dsn() -> String {
    "sqlite://health.db?mode=rwc".to_owned()
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `info,user_settings=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    /// Directory for daily-rolling log files. Console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

fn default_level() -> String {
    "info".to_owned()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub user_settings: UserSettingsConfig,
}

/// CLI values that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

pub const MOCK_DSN: &str = "sqlite::memory:";

impl AppConfig {
    /// Load defaults, then the YAML file at `path` (if any), then `APP__*`
    /// environment variables.
    ///
    /// # Errors
    /// Fails when `path` does not exist or a source does not match the schema.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed("APP__").split("__"));

        figment.extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.bind_addr.set_port(port);
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        if cli.mock {
            MOCK_DSN.clone_into(&mut self.database.dsn);
            self.database.max_connections = 1;
        }
    }

    /// # Errors
    /// Fails when the configuration cannot be rendered as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let cfg = AppConfig::load_or_default(None).unwrap();
            assert_eq!(cfg.server.bind_addr.port(), 8080);
            assert_eq!(cfg.user_settings.app_name, "21PointsApp");
            assert_eq!(cfg.logging.format, LogFormat::Text);
            Ok(())
        });
    }

    #[test]
    fn yaml_then_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "health.yaml",
                r"
server:
  bind_addr: 0.0.0.0:9000
user_settings:
  max_page_size: 100
",
            )?;
            jail.set_env("APP__USER_SETTINGS__MIN_WEEKLY_GOAL", "12");

            let cfg = AppConfig::load_or_default(Some(Path::new("health.yaml"))).unwrap();

            assert_eq!(cfg.server.bind_addr.port(), 9000);
            assert_eq!(cfg.user_settings.max_page_size, 100);
            assert_eq!(cfg.user_settings.min_weekly_goal, 12);
            assert_eq!(cfg.user_settings.default_page_size, 20);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_reported() {
        let err = AppConfig::load_or_default(Some(Path::new("/nonexistent/health.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  listen: 1").unwrap();

        let res = AppConfig::load_or_default(Some(file.path()));

        assert!(matches!(res, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn cli_overrides_win() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(&CliOverrides {
            port: Some(3000),
            verbose: 2,
            mock: true,
        });

        assert_eq!(cfg.server.bind_addr.port(), 3000);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.database.dsn, MOCK_DSN);
    }

    #[test]
    fn renders_yaml() {
        let yaml = AppConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("bind_addr"));
        assert!(yaml.contains("21PointsApp"));
    }
}
