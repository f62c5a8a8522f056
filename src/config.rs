//! Runtime configuration.
//!
//! Layered with figment: built-in defaults, then `popdash.toml` in the working
//! directory, then `POPDASH_*` environment variables.

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const CONFIG_FILE: &str = "popdash.toml";
pub const ENV_PREFIX: &str = "POPDASH_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] figment::Error),
    #[error("Unknown shell '{0}' (expected 'web' or 'demo')")]
    UnknownShell(String),
}

/// Which front end serves the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Web,
    Demo,
}

impl FromStr for Shell {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "web" => Ok(Shell::Web),
            "demo" => Ok(Shell::Demo),
            other => Err(ConfigError::UnknownShell(other.to_string())),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Web => write!(f, "web"),
            Shell::Demo => write!(f, "demo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV file loaded at startup.
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub shell: Shell,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("population.csv"),
            host: "0.0.0.0".to_string(),
            port: 5000,
            shell: Shell::Web,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// The provider stack, with `file` as the TOML layer.
    pub fn figment(file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(file.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment(CONFIG_FILE).extract()?)
    }

    /// Apply a shell name given on the command line.
    pub fn with_shell_arg(mut self, arg: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(name) = arg {
            self.shell = name.parse()?;
        }
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config: AppConfig = AppConfig::figment(CONFIG_FILE).extract()?;
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.bind_address(), "0.0.0.0:5000");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    data_path = "data/states.csv"
                    port = 8080
                    shell = "demo"
                "#,
            )?;
            jail.set_env("POPDASH_PORT", "9000");

            let config: AppConfig = AppConfig::figment(CONFIG_FILE).extract()?;
            assert_eq!(config.data_path, PathBuf::from("data/states.csv"));
            assert_eq!(config.port, 9000);
            assert_eq!(config.shell, Shell::Demo);
            assert_eq!(config.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn shell_argument_wins() {
        let config = AppConfig::default().with_shell_arg(Some("DEMO")).unwrap();
        assert_eq!(config.shell, Shell::Demo);

        let unchanged = AppConfig::default().with_shell_arg(None).unwrap();
        assert_eq!(unchanged.shell, Shell::Web);

        assert!(matches!(
            AppConfig::default().with_shell_arg(Some("tui")),
            Err(ConfigError::UnknownShell(name)) if name == "tui"
        ));
    }
}
