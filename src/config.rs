//! Generation settings and their YAML form.

use crate::error::{Error, Result};
use crate::mapper::MapperOptions;
use crate::renderer::{RenderConfig, DEFAULT_CHARSET, DEFAULT_ENGINE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Target dialect family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Driver {
    #[default]
    MySql,
}

impl std::str::FromStr for Driver {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(Driver::MySql),
            _ => Err(Error::UnsupportedDriver(s.to_string())),
        }
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Driver::MySql => write!(f, "mysql"),
        }
    }
}

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DbConfig {
    /// Target dialect; only `mysql` is supported
    pub driver: String,
    /// Storage engine, e.g. `InnoDB`
    pub engine: String,
    /// Default character set, e.g. `utf8mb4`
    pub charset: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            driver: Driver::MySql.to_string(),
            engine: DEFAULT_ENGINE.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

/// Complete generation config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub db: DbConfig,
    /// Destination of `generate_file`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_file_path: Option<PathBuf>,
    /// Assume an `id` primary key when none is declared, without checking it exists
    pub implicit_id_primary_key: bool,
}

impl Config {
    pub fn with_out_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_file_path = Some(path.into());
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.db.engine = engine.into();
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.db.charset = charset.into();
        self
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.db.driver = driver.into();
        self
    }

    pub fn with_implicit_id_primary_key(mut self, enabled: bool) -> Self {
        self.implicit_id_primary_key = enabled;
        self
    }

    pub fn driver(&self) -> Result<Driver> {
        self.db.driver.parse()
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            engine: self.db.engine.clone(),
            charset: self.db.charset.clone(),
        }
    }

    pub fn mapper_options(&self) -> MapperOptions {
        MapperOptions {
            implicit_id_primary_key: self.implicit_id_primary_key,
        }
    }

    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(s)
    }

    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.driver().unwrap(), Driver::MySql);
        assert_eq!(config.db.engine, "InnoDB");
        assert_eq!(config.db.charset, "utf8mb4");
        assert_eq!(config.out_file_path, None);
        assert!(!config.implicit_id_primary_key);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = Config::from_yaml("db:\n  charset: utf8\nout_file_path: out/schema.sql\n")
            .unwrap();
        assert_eq!(config.db.engine, "InnoDB");
        assert_eq!(config.db.charset, "utf8");
        assert_eq!(config.out_file_path, Some(PathBuf::from("out/schema.sql")));
    }

    #[test]
    fn test_driver_parse() {
        assert_eq!("MySQL".parse::<Driver>().unwrap(), Driver::MySql);
        assert!(matches!(
            "postgres".parse::<Driver>(),
            Err(Error::UnsupportedDriver(ref d)) if d == "postgres"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/ddl-maker.yaml")).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
