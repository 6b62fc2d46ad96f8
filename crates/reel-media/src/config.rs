use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::listing::ListingMode;
use super::platform;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Open the default browser at the server URL once listening.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

/// Where media comes from and which files count as media.
#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Accepted extensions. Entries are normalised to `.ext` lowercase at
    /// scan time, so `"MP4"` and `".mp4"` are equivalent.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub mode: ListingMode,
    /// Window size used in paged mode when `limit` is missing or invalid.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Fixed seed for the shuffle and random picks. Entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extensions: default_extensions(),
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            mode: ListingMode::default(),
            default_limit: default_limit(),
            seed: None,
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    platform::DEFAULT_PORT
}

fn default_open_browser() -> bool {
    true
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_extensions() -> Vec<String> {
    [".webm", ".mp4", ".gif", ".jpg", ".jpeg", ".png", ".bmp"]
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_limit() -> usize {
    10
}

impl Config {
    /// A missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert!(config.server.open_browser);
        assert_eq!(config.library.dir, PathBuf::from("."));
        assert_eq!(config.library.extensions.len(), 7);
        assert_eq!(config.listing.mode, ListingMode::Random);
        assert_eq!(config.listing.default_limit, 10);
        assert!(config.listing.seed.is_none());
        assert!(Config::config_path().ends_with("reel/config.toml"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [listing]
            mode = "paged"
            seed = 7

            [library]
            dir = "/srv/clips"
            "#,
        )
        .unwrap();
        assert_eq!(config.listing.mode, ListingMode::Paged);
        assert_eq!(config.listing.seed, Some(7));
        assert_eq!(config.listing.default_limit, 10);
        assert_eq!(config.library.dir, PathBuf::from("/srv/clips"));
        assert_eq!(config.library.extensions, default_extensions());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
