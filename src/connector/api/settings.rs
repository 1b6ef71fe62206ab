use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Contents of the `newteam` TOML settings file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: String,
    pub backup_dir: String,
    pub images_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            backup_dir: "backup".to_string(),
            images_dir: "images".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Relative to `storage.data_dir`.
    pub file: String,
    pub init_tables: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            file: "newteam.duckdb".to_string(),
            init_tables: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub size: u64,
    pub expiration_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            size: 10,
            expiration_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub bcrypt_cost: u32,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).context("TOML parsing error")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.cache.size == 0 {
            anyhow::bail!("cache.size must be at least 1");
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            anyhow::bail!("auth.bcrypt_cost must be between 4 and 31");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.storage.data_dir, "data");
        assert_eq!(settings.database.file, "newteam.duckdb");
        assert!(settings.database.init_tables);
        assert_eq!(settings.cache.size, 10);
        assert_eq!(settings.cache.expiration_ms, 60_000);
        assert_eq!(settings.auth.bcrypt_cost, 12);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [storage]
            backup_dir = "/var/backups/newteam"

            [cache]
            expiration_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(settings.storage.data_dir, "data");
        assert_eq!(settings.storage.backup_dir, "/var/backups/newteam");
        assert_eq!(settings.cache.size, 10);
        assert_eq!(settings.cache.expiration_ms, 500);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Settings::from_toml_str("[cache]\nsize = 0").is_err());
        assert!(Settings::from_toml_str("[auth]\nbcrypt_cost = 2").is_err());
        assert!(Settings::from_toml_str("[cache]\nsize = \"ten\"").is_err());
    }
}
