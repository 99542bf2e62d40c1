//! Input format parsers.
//!
//! Each parser reads a JSON document and produces a [`Catalog`].

mod openapi;
mod schema;

pub use openapi::{parse_openapi, parse_swagger};

use crate::model::{Catalog, Definition};
use schema::RawSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported document: {0}")]
    Unsupported(String),
}

/// Shape of the input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Detect from top-level keys.
    #[default]
    Auto,
    /// A bare object mapping reference to definition.
    Definitions,
    /// Swagger 2.0.
    Swagger,
    /// OpenAPI 3.x.
    OpenApi,
}

impl InputFormat {
    /// Resolve `Auto` against a parsed document.
    pub fn detect(self, input: &Value) -> Self {
        match self {
            InputFormat::Auto => {
                if input.get("openapi").is_some() {
                    InputFormat::OpenApi
                } else if input.get("swagger").is_some() {
                    InputFormat::Swagger
                } else {
                    InputFormat::Definitions
                }
            }
            f => f,
        }
    }
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path, format: InputFormat) -> Result<Catalog, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json: Value = serde_json::from_str(&content)?;
    parse_catalog(&json, format)
}

/// Parse an already-decoded document.
pub fn parse_catalog(input: &Value, format: InputFormat) -> Result<Catalog, LoadError> {
    let format = format.detect(input);
    tracing::debug!(?format, "parsing catalog");
    match format {
        InputFormat::OpenApi => parse_openapi(input),
        InputFormat::Swagger => parse_swagger(input),
        InputFormat::Definitions | InputFormat::Auto => parse_definition_map(input, ""),
    }
}

/// Parse an object of `reference -> schema`.
///
/// A value of the form `{"schema": {...}, "dependencies": [...]}` is
/// unwrapped to its `schema` member. A definition that does not decode is
/// kept as an empty definition so the rest of the catalog still loads.
pub(crate) fn parse_definition_map(input: &Value, ref_prefix: &str) -> Result<Catalog, LoadError> {
    let entries = input.as_object().ok_or_else(|| {
        LoadError::Unsupported("definitions must be an object keyed by reference".into())
    })?;

    let mut catalog = Catalog::new();
    for (reference, value) in entries {
        let schema = match value.get("schema") {
            Some(inner) if inner.is_object() => inner,
            _ => value,
        };
        let definition = match RawSchema::deserialize(schema) {
            Ok(raw) => raw.into_definition(ref_prefix),
            Err(err) => {
                tracing::warn!(reference = %reference, %err, "undecodable definition, treating as empty");
                Definition::default()
            }
        };
        catalog.insert(reference.clone(), definition);
    }
    Ok(catalog)
}
