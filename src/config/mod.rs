use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::checksum::{ByteOrder, OutputFormat};

/// Application configuration stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// How checksums are printed.
    #[serde(default)]
    pub format: OutputFormat,
    /// Byte order for the `bytes` output format.
    #[serde(default)]
    pub byte_order: ByteOrder,
    /// Print hex digits in uppercase.
    #[serde(default)]
    pub uppercase: bool,
}

impl AppConfig {
    /// Config file path: ~/.config/crc16sum/config.toml
    pub fn path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crc16sum");
        config_dir.join("config.toml")
    }

    /// Load config from the default location, or return defaults.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to load config: {:#}", e),
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        tracing::info!("Config saved to {}", path.display());
        Ok(())
    }

    /// Render a checksum according to this config.
    pub fn render(&self, value: u16) -> String {
        self.format.render(value, self.byte_order, self.uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("crc16sum-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.format, OutputFormat::Decimal);
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.render(13558), "13558");
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str("format = \"bytes\"\nbyte_order = \"little\"").unwrap();
        assert_eq!(config.format, OutputFormat::Bytes);
        assert!(!config.uppercase);
        assert_eq!(config.render(0x34F6), "f634");
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip/config.toml");
        let config = AppConfig {
            format: OutputFormat::Hex,
            byte_order: ByteOrder::Little,
            uppercase: true,
        };
        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.render(61249), "0xEF41");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_from_rejects_garbage() {
        let path = temp_path("garbage.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "format = \"octal\"").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
