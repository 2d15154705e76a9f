use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

const ENV_PREFIX: &str = "CLIENT_ROSTER_";

/// Command line flags. Anything given here wins over the environment.
#[derive(Debug, Parser)]
#[command(name = "client-roster", about = "Manage client records against a REST backend")]
pub struct Cli {
    /// Backend origin, e.g. http://localhost:5210
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path to open on start
    #[arg(long, default_value = "/")]
    pub path: String,

    /// File that receives the application log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Use ASCII instead of Unicode icons
    #[arg(long)]
    pub ascii: bool,
}

/// Configuration for the application
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Origin of the REST backend; `/api/clients` is appended to it
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Lifetime of a toast notification
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,

    #[serde(default)]
    pub ascii_icons: bool,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_api_base_url() -> String {
    "http://localhost:5210".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_toast_secs() -> u64 {
    4
}

fn default_log_file() -> PathBuf {
    PathBuf::from("client-roster.log")
}

impl Config {
    /// Load configuration from `CLIENT_ROSTER_*` environment variables
    ///
    /// Variables from a `.env` file are picked up first if one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .context("invalid CLIENT_ROSTER_* environment")?;

        Ok(config)
    }

    #[cfg(test)]
    fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Config>(pairs)?;
        Ok(config)
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.api_base_url = base_url.clone();
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
        if cli.ascii {
            self.ascii_icons = true;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}

/// Load the environment configuration and layer the command line on top
pub fn init(cli: &Cli) -> Result<Config> {
    let config = Config::load()?;
    Ok(config.apply_cli(cli))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_pairs(Vec::new()).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:5210");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.toast_lifetime(), Duration::from_secs(4));
        assert!(!config.ascii_icons);
    }

    #[test]
    fn prefixed_variables_are_read() {
        let config = Config::from_pairs(pairs(&[
            ("CLIENT_ROSTER_API_BASE_URL", "http://backend:8080"),
            ("CLIENT_ROSTER_TOAST_SECS", "9"),
            ("CLIENT_ROSTER_ASCII_ICONS", "true"),
            ("API_BASE_URL", "http://ignored"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://backend:8080");
        assert_eq!(config.toast_secs, 9);
        assert!(config.ascii_icons);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let result = Config::from_pairs(pairs(&[("CLIENT_ROSTER_REQUEST_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn command_line_overrides_environment() {
        let config = Config::from_pairs(Vec::new()).unwrap();
        let cli = Cli::parse_from(["client-roster", "--base-url", "http://other:1", "--ascii"]);

        let config = config.apply_cli(&cli);
        assert_eq!(config.api_base_url, "http://other:1");
        assert!(config.ascii_icons);
        assert_eq!(cli.path, "/");
    }
}
