use crate::error::ErrorCode;
use crate::storage::{FileStore, MemoryStore, Store};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up in the project root.
pub const CONFIG_FILE: &str = "tasklist.toml";

/// Environment variable that overrides `app_name`.
pub const APP_NAME_ENV: &str = "TASKLIST_APP_NAME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Storage namespace: `todos-<app-name>`.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!("todos-{}", self.app_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StorageConfig {
    /// Where the file backend keeps `namespace`.
    ///
    /// An explicit `path` wins; otherwise the platform data directory is used,
    /// falling back to the working directory when there is none.
    #[must_use]
    pub fn resolved_path(&self, namespace: &str) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let file = format!("{namespace}.json");
        dirs::data_dir().map_or_else(|| PathBuf::from(&file), |dir| dir.join("tasklist").join(&file))
    }

    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// Load `tasklist.toml` from `root`, applying the environment override.
///
/// A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let mut config = load_config_file(root)?;
    if let Some(name) = env::var(APP_NAME_ENV).ok().filter(|v| !v.trim().is_empty()) {
        config.app_name = name.trim().to_string();
    }
    Ok(config)
}

fn load_config_file(root: &Path) -> Result<AppConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AppConfig>(&content).with_context(|| {
        format!(
            "{}: Failed to parse {}",
            ErrorCode::ConfigParseError,
            path.display()
        )
    })
}

/// Build the store `config` asks for.
///
/// # Errors
///
/// Returns an error if the file backend cannot open its file. A corrupt file
/// is reported here rather than treated as an empty list.
pub fn open_store(config: &AppConfig) -> Result<Store> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Store::Memory(MemoryStore::new())),
        StorageBackend::File => {
            let path = config.storage.resolved_path(&config.namespace());
            let store = FileStore::open(&path, config.storage.lock_timeout())
                .with_context(|| format!("Failed to open task storage at {}", path.display()))?;
            Ok(Store::File(store))
        }
    }
}

fn default_app_name() -> String {
    "tasklist".to_string()
}

const fn default_lock_timeout_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_file(root.path()).expect("load should succeed");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.namespace(), "todos-tasklist");
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.lock_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            root.path().join(CONFIG_FILE),
            "app_name = \"typescript-backbone\"\n\n[storage]\nbackend = \"memory\"\n",
        )
        .expect("write config");

        let cfg = load_config_file(root.path()).expect("load");
        assert_eq!(cfg.namespace(), "todos-typescript-backbone");
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.storage.path, None);
        assert_eq!(cfg.storage.lock_timeout_ms, 500);
    }

    #[test]
    fn malformed_config_names_the_file() {
        let root = tempfile::tempdir().expect("tempdir");
        std::fs::write(root.path().join(CONFIG_FILE), "app_name = [").expect("write config");

        let err = load_config_file(root.path()).expect_err("must fail");
        let message = err.to_string();
        assert!(message.starts_with(ErrorCode::ConfigParseError.code()));
        assert!(message.contains(CONFIG_FILE));
        assert!(err.chain().count() > 1);
    }

    #[test]
    fn explicit_path_wins_over_data_dir() {
        let storage = StorageConfig {
            path: Some(PathBuf::from("/tmp/custom.json")),
            ..StorageConfig::default()
        };
        assert_eq!(
            storage.resolved_path("todos-x"),
            PathBuf::from("/tmp/custom.json")
        );
        assert!(
            StorageConfig::default()
                .resolved_path("todos-x")
                .ends_with("todos-x.json")
        );
    }

    #[test]
    fn open_store_uses_configured_file() {
        let root = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            app_name: "demo".to_string(),
            storage: StorageConfig {
                backend: StorageBackend::File,
                path: Some(root.path().join("demo.json")),
                lock_timeout_ms: 50,
            },
        };
        let store = open_store(&config).expect("open");
        assert!(matches!(store, Store::File(ref file) if file.path() == root.path().join("demo.json")));
    }
}
