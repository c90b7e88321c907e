use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Application configuration, loaded from `config.toml` when present.
/// Every section falls back to defaults so the service starts without a file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub import: ImportConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/restaurants.db"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Spreadsheet export consumed at startup and by the import endpoint.
    pub csv_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/restaurants.csv"),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        if !Path::new(&path).exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        toml::from_str(&raw).with_context(|| format!("parsing {path}"))
    }
}
