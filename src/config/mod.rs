use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

/// Public Polkadot RPC node
pub const DEFAULT_ENDPOINT: &str = "wss://rpc.polkadot.io";

/// Account whose balance and nonce are read at startup
pub const DEFAULT_ADDRESS: &str = "5DTestUPts3kjeXSTMyerHihn1uwMfLj8vU8sqF7qYrFabHE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub endpoint: Option<String>,
    pub address: Option<String>,
}

impl Config {
    /// CLI value, then config file, then the built-in default
    pub fn endpoint_or(&self, cli: Option<&str>) -> String {
        pick(cli, self.endpoint.as_deref(), DEFAULT_ENDPOINT)
    }

    pub fn address_or(&self, cli: Option<&str>) -> String {
        pick(cli, self.address.as_deref(), DEFAULT_ADDRESS)
    }
}

fn pick(cli: Option<&str>, file: Option<&str>, default: &str) -> String {
    cli.or(file)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), "ignoring invalid config: {err}");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("CHAINPEEK_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("chainpeek").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("chainpeek").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "chainpeek", "chainpeek")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("chainpeek"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("chainpeek"));
    }
    directories::ProjectDirs::from("io", "chainpeek", "chainpeek")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn logs_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("logs"))
}
