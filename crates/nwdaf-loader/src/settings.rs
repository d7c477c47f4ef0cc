use std::path::Path;
use std::{env, fs};

use serde::Deserialize;

use crate::error::LoaderError;

pub const DEFAULT_MONGODB_URL: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_DATABASE: &str = "nwdaf";

pub const MONGODB_URL_ENV: &str = "MONGODB_URL";
pub const DATABASE_ENV: &str = "NWDAF_DB";
pub const CONFIG_PATH_ENV: &str = "NWDAF_CONFIG";

/// Where to find the telemetry database.
///
/// Resolved as defaults, then the NWDAF YAML config file named by
/// `NWDAF_CONFIG` (if set), then `MONGODB_URL` / `NWDAF_DB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mongodb_url: String,
    pub database: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mongodb_url: DEFAULT_MONGODB_URL.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    configuration: Configuration,
}

#[derive(Debug, Default, Deserialize)]
struct Configuration {
    #[serde(default)]
    mongodb: Option<MongodbSection>,
}

#[derive(Debug, Deserialize)]
struct MongodbSection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl Settings {
    /// Read the `configuration.mongodb` section of an NWDAF config document.
    /// Keys it leaves out keep their defaults; other sections are ignored.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LoaderError> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        let mut settings = Settings::default();
        if let Some(mongodb) = file.configuration.mongodb {
            if let Some(url) = mongodb.url.filter(|s| !s.is_empty()) {
                settings.mongodb_url = url;
            }
            if let Some(name) = mongodb.name.filter(|s| !s.is_empty()) {
                settings.database = name;
            }
        }
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| LoaderError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&data)
    }

    /// Apply `MONGODB_URL` and `NWDAF_DB` from the process environment.
    pub fn with_env(self) -> Self {
        self.with_vars(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unset or empty values are ignored.
    pub fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(MONGODB_URL_ENV).filter(|s| !s.is_empty()) {
            self.mongodb_url = url;
        }
        if let Some(db) = lookup(DATABASE_ENV).filter(|s| !s.is_empty()) {
            self.database = db;
        }
        self
    }

    pub fn load() -> Result<Self, LoaderError> {
        let base = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.with_env())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const NWDAF_CFG: &str = r#"
configuration:
  sbi:
    bindingIPv4: 127.0.0.31
    port: 8000
  mongodb:
    name: nwdaf-lab
    url: mongodb://10.0.0.5:27017
"#;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mongodb_url, "mongodb://127.0.0.1:27017");
        assert_eq!(settings.database, "nwdaf");
    }

    #[test]
    fn yaml_mongodb_section() {
        let settings = Settings::from_yaml_str(NWDAF_CFG).unwrap();
        assert_eq!(settings.mongodb_url, "mongodb://10.0.0.5:27017");
        assert_eq!(settings.database, "nwdaf-lab");
    }

    #[test]
    fn yaml_without_mongodb_keeps_defaults() {
        let settings =
            Settings::from_yaml_str("configuration:\n  sbi:\n    port: 8000\n").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn yaml_partial_section() {
        let settings =
            Settings::from_yaml_str("configuration:\n  mongodb:\n    name: other\n").unwrap();
        assert_eq!(settings.mongodb_url, DEFAULT_MONGODB_URL);
        assert_eq!(settings.database, "other");
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let err = Settings::from_yaml_str("configuration: [unclosed").unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::from_file(dir.path().join("nwdafcfg.yaml")).unwrap_err();
        assert!(matches!(err, LoaderError::Config(_)));
    }

    #[test]
    fn from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nwdafcfg.yaml");
        fs::write(&path, NWDAF_CFG).unwrap();
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.database, "nwdaf-lab");
    }

    #[test]
    fn vars_override_file_values() {
        let vars: HashMap<&str, &str> = [
            (MONGODB_URL_ENV, "mongodb://db.internal:27018"),
            (DATABASE_ENV, ""),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_yaml_str(NWDAF_CFG)
            .unwrap()
            .with_vars(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(settings.mongodb_url, "mongodb://db.internal:27018");
        // Empty NWDAF_DB leaves the file value in place.
        assert_eq!(settings.database, "nwdaf-lab");
    }
}
