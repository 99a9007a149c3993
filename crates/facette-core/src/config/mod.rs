use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FacetteError, Result};

mod env;

const ENV_HOST: &str = "FACETTE_HOST";
const ENV_PORT: &str = "FACETTE_PORT";
const ENV_URL_PREFIX: &str = "FACETTE_URL_PREFIX";
const ENV_DATA: &str = "FACETTE_DATA";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12003;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Either empty or `/segment[/segment..]` without a trailing slash.
    pub url_prefix: String,
    pub data_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            url_prefix: String::new(),
            data_path: None,
        }
    }
}

/// Values given explicitly on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub url_prefix: Option<String>,
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    url_prefix: Option<String>,
    data: Option<PathBuf>,
}

impl ServerConfig {
    /// Resolves defaults, then the optional TOML file, then `FACETTE_*` env vars,
    /// then `overrides`.
    pub fn load(file: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = file {
            config.apply_file(path)?;
        }
        config.apply_env();
        config.apply_overrides(overrides);
        config.url_prefix = normalize_url_prefix(&config.url_prefix)?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = std::fs::read_to_string(path)?;
        let file = toml::from_str::<ConfigFile>(&raw)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        self.apply_overrides(ConfigOverrides {
            host: file.host,
            port: file.port,
            url_prefix: file.url_prefix,
            data_path: file.data.map(|data| base.join(data)),
        });
        Ok(())
    }

    fn apply_env(&mut self) {
        self.apply_overrides(ConfigOverrides {
            host: env::read_non_empty_env(ENV_HOST),
            port: env::read_env_u16(ENV_PORT),
            url_prefix: env::read_non_empty_env(ENV_URL_PREFIX),
            data_path: env::read_non_empty_env(ENV_DATA).map(PathBuf::from),
        });
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(url_prefix) = overrides.url_prefix {
            self.url_prefix = url_prefix;
        }
        if let Some(data_path) = overrides.data_path {
            self.data_path = Some(data_path);
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Absolute path of `path` under the configured prefix.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.url_prefix)
    }
}

pub fn normalize_url_prefix(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(FacetteError::Validation(format!(
            "url prefix must start with '/': {raw}"
        )));
    }
    if trimmed.contains(['?', '#', ' ']) || trimmed.contains("//") {
        return Err(FacetteError::Validation(format!(
            "url prefix must be a plain path: {raw}"
        )));
    }
    Ok(trimmed.to_string())
}
