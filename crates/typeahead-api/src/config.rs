//! Settings for the autocomplete client
//!
//! Resolved in increasing priority: built-in defaults, the TOML config file,
//! environment variables, then command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://be-v2.convose.com/autocomplete/interests";
pub const DEFAULT_PAGE_SIZE: u32 = 12;

pub const ENDPOINT_ENV: &str = "TYPEAHEAD_API_URL";
pub const TOKEN_ENV: &str = "TYPEAHEAD_TOKEN";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub page_size: Option<u32>,
    pub offset: Option<u32>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: Url,
    /// Sent verbatim as the `Authorization` header
    pub token: Option<String>,
    pub page_size: u32,
    pub offset: u32,
    /// No timeout unless configured
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            offset: 0,
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from the config file (explicit path or the default location),
    /// the process environment and `overrides`.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => load_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => load_file(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::resolve(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Layer `file`, environment lookups and `overrides` on top of the defaults
    pub fn resolve(
        file: FileConfig,
        env_var: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let env = |key: &str| env_var(key).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();

        let endpoint = overrides
            .endpoint
            .clone()
            .or_else(|| env(ENDPOINT_ENV))
            .or(file.endpoint);
        let endpoint = match endpoint {
            Some(raw) => Url::parse(&raw)
                .with_context(|| format!("Invalid autocomplete endpoint URL: {}", raw))?,
            None => defaults.endpoint,
        };

        let token = overrides
            .token
            .clone()
            .or_else(|| env(TOKEN_ENV))
            .or(file.token);

        Ok(Self {
            endpoint,
            token,
            page_size: overrides
                .page_size
                .or(file.page_size)
                .unwrap_or(defaults.page_size),
            offset: file.offset.unwrap_or(defaults.offset),
            timeout_secs: file.timeout_secs,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `<config dir>/typeahead/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("typeahead").join("config.toml"))
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(FileConfig::default(), no_env, &Overrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(settings.page_size, 12);
        assert_eq!(settings.offset, 0);
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_precedence() {
        let file = FileConfig {
            endpoint: Some("http://file.example/ac".into()),
            token: Some("file-token".into()),
            page_size: Some(20),
            offset: Some(5),
            timeout_secs: Some(3),
        };
        let vars: HashMap<&str, &str> = [
            (ENDPOINT_ENV, "http://env.example/ac"),
            (TOKEN_ENV, "env-token"),
        ]
        .into_iter()
        .collect();
        let env = |key: &str| vars.get(key).map(|v| v.to_string());

        let settings = Settings::resolve(file.clone(), env, &Overrides::default()).unwrap();
        assert_eq!(settings.endpoint.as_str(), "http://env.example/ac");
        assert_eq!(settings.token.as_deref(), Some("env-token"));
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.offset, 5);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(3)));

        let overrides = Overrides {
            endpoint: Some("http://cli.example/ac".into()),
            token: Some("cli-token".into()),
            page_size: Some(4),
        };
        let settings = Settings::resolve(file, env, &overrides).unwrap();
        assert_eq!(settings.endpoint.as_str(), "http://cli.example/ac");
        assert_eq!(settings.token.as_deref(), Some("cli-token"));
        assert_eq!(settings.page_size, 4);
    }

    #[test]
    fn test_blank_env_ignored() {
        let file = FileConfig {
            token: Some("file-token".into()),
            ..Default::default()
        };
        let settings =
            Settings::resolve(file, |_| Some("  ".to_string()), &Overrides::default()).unwrap();
        assert_eq!(settings.token.as_deref(), Some("file-token"));
        assert_eq!(settings.endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_endpoint_is_error() {
        let overrides = Overrides {
            endpoint: Some("not a url".into()),
            ..Default::default()
        };
        let err = Settings::resolve(FileConfig::default(), no_env, &overrides).unwrap_err();
        assert!(err.to_string().contains("Invalid autocomplete endpoint URL"));
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.toml");
        file.write_str("endpoint = \"http://localhost:9000/ac\"\npage_size = 30\n")
            .unwrap();

        let config = load_file(file.path()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000/ac"));
        assert_eq!(config.page_size, Some(30));
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_load_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(load_file(&dir.path().join("missing.toml")).is_err());

        let file = dir.child("bad.toml");
        file.write_str("endpont = \"typo\"\n").unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
