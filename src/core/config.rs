//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::entities::catalog_item::Finish;
use crate::entities::params::ModuleParams;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "ebom.yaml";

/// Configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file to use instead of the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Module width used when `--width` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_width: Option<f64>,

    /// Module height used when `--height` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_height: Option<f64>,

    /// Finish used when `--finish` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_finish: Option<Finish>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/ebom/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./ebom.yaml)
        if let Some(local) = Self::read_file(Path::new(LOCAL_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Read one config file; missing or malformed files are skipped
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "ebom")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply `EBOM_*` overrides through the given lookup
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(catalog) = lookup("EBOM_CATALOG") {
            self.catalog = Some(PathBuf::from(catalog));
        }
        if let Some(finish) = lookup("EBOM_FINISH") {
            match finish.parse::<Finish>() {
                Ok(finish) => self.default_finish = Some(finish),
                Err(e) => warn!(error = %e, "ignoring EBOM_FINISH"),
            }
        }
        if let Some(format) = lookup("EBOM_FORMAT") {
            self.default_format = Some(format);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.catalog.is_some() {
            self.catalog = other.catalog;
        }
        if other.default_width.is_some() {
            self.default_width = other.default_width;
        }
        if other.default_height.is_some() {
            self.default_height = other.default_height;
        }
        if other.default_finish.is_some() {
            self.default_finish = other.default_finish;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Starting module parameters: built-in defaults overlaid with config
    pub fn default_params(&self) -> ModuleParams {
        let base = ModuleParams::default();
        ModuleParams {
            width: self.default_width.unwrap_or(base.width),
            height: self.default_height.unwrap_or(base.height),
            finish: self.default_finish.unwrap_or(base.finish),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_merge_other_wins() {
        let mut base = Config {
            default_width: Some(300.0),
            default_finish: Some(Finish::Metal),
            ..Config::default()
        };
        base.merge(Config {
            default_finish: Some(Finish::Wood),
            ..Config::default()
        });

        assert_eq!(base.default_width, Some(300.0));
        assert_eq!(base.default_finish, Some(Finish::Wood));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("EBOM_CATALOG", "/tmp/parts.yaml"),
            ("EBOM_FINISH", "wood"),
            ("EBOM_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/parts.yaml")));
        assert_eq!(config.default_finish, Some(Finish::Wood));
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_bad_env_finish_ignored() {
        let mut config = Config::default();
        config.apply_env(|k| (k == "EBOM_FINISH").then(|| "chrome".to_string()));
        assert!(config.default_finish.is_none());
    }

    #[test]
    fn test_default_params() {
        let config = Config {
            default_height: Some(750.0),
            ..Config::default()
        };
        let params = config.default_params();
        assert_eq!(params.width, 500.0);
        assert_eq!(params.height, 750.0);
        assert_eq!(params.finish, Finish::Metal);
    }

    #[test]
    fn test_read_file() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.yaml");
        fs::write(&good, "default_finish: wood\ndefault_width: 420\n").unwrap();
        let config = Config::read_file(&good).unwrap();
        assert_eq!(config.default_finish, Some(Finish::Wood));
        assert_eq!(config.default_width, Some(420.0));

        let bad = dir.path().join("bad.yaml");
        fs::write(&bad, "default_width: [not, a, number]\n").unwrap();
        assert!(Config::read_file(&bad).is_none());

        assert!(Config::read_file(&dir.path().join("missing.yaml")).is_none());
    }
}
