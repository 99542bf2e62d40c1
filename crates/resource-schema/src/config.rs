//! Configuration for resource-schema.
//!
//! Loads config from, in increasing precedence:
//! 1. Global: ~/.config/resource-schema/config.toml
//! 2. Per-project: .resource-schema/config.toml
//! 3. An explicit file passed with `--config`
//!
//! Command-line flags are merged on top by the caller.
//!
//! Example config.toml:
//! ```toml
//! [input]
//! path = "api/openapi-spec/definitions.json"
//! format = "definitions"   # "auto", "definitions", "swagger", or "openapi"
//!
//! [output]
//! dir = "doc/schema"
//! pretty = false
//!
//! [convert]
//! memoize = false
//! parallel = true
//! ```

use crate::generate::GenerateOptions;
use resource_schema_catalog::InputFormat;
use resource_schema_convert::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_INPUT: &str = "openapi/definitions.json";
const DEFAULT_OUTPUT_DIR: &str = "doc/schema";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the definition catalog comes from.
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct InputConfig {
    /// Catalog file. Default: openapi/definitions.json
    pub path: Option<PathBuf>,
    /// Catalog format. Default: auto
    pub format: Option<InputFormat>,
}

/// Where and how documents are written.
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory. Default: doc/schema
    pub dir: Option<PathBuf>,
    /// Indent written JSON. Default: false
    pub pretty: Option<bool>,
}

/// Conversion tuning.
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct ConvertConfig {
    /// Reuse expanded sub-schemas within a worker. Default: false
    pub memoize: Option<bool>,
    /// Convert resources on a thread pool. Default: true
    pub parallel: Option<bool>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(default)]
pub struct ResourceSchemaConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub convert: ConvertConfig,
}

impl ResourceSchemaConfig {
    /// Load configuration for a project rooted at `root`.
    ///
    /// Missing files are skipped; unreadable or invalid ones are errors.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path)? {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".resource-schema").join("config.toml");
        if let Some(project) = Self::load_file(&project_path)? {
            config = config.merge(project);
        }

        if let Some(path) = explicit {
            let file = Self::load_file(path)?.ok_or_else(|| ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })?;
            config = config.merge(file);
        }

        Ok(config)
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("resource-schema").join("config.toml"))
    }

    /// Load config from a file path. `Ok(None)` if it does not exist.
    fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        tracing::debug!(path = %path.display(), "loading config");
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Merge another config into this one. Fields set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            input: InputConfig {
                path: other.input.path.or(self.input.path),
                format: other.input.format.or(self.input.format),
            },
            output: OutputConfig {
                dir: other.output.dir.or(self.output.dir),
                pretty: other.output.pretty.or(self.output.pretty),
            },
            convert: ConvertConfig {
                memoize: other.convert.memoize.or(self.convert.memoize),
                parallel: other.convert.parallel.or(self.convert.parallel),
            },
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.input
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    pub fn input_format(&self) -> InputFormat {
        self.input.format.unwrap_or_default()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(false)
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            convert: ConvertOptions {
                memoize: self.convert.memoize.unwrap_or(false),
            },
            parallel: self.convert.parallel.unwrap_or(true),
        }
    }
}
