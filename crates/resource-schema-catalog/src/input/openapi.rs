//! Swagger 2.0 and OpenAPI 3.x documents.
//!
//! Both carry their definitions under a fixed pointer and reference them
//! with a local `$ref` prefix that is stripped on load.

use super::{LoadError, parse_definition_map};
use crate::model::Catalog;
use serde_json::Value;

const SWAGGER_REF_PREFIX: &str = "#/definitions/";
const OPENAPI_REF_PREFIX: &str = "#/components/schemas/";

/// Build a catalog from a Swagger 2.0 document's `definitions`.
pub fn parse_swagger(input: &Value) -> Result<Catalog, LoadError> {
    let version = input.get("swagger").and_then(|v| v.as_str()).unwrap_or("");
    if !version.starts_with("2.") {
        return Err(LoadError::Unsupported(format!(
            "Swagger version {} not supported (expected 2.x)",
            version
        )));
    }

    match input.get("definitions") {
        Some(definitions) => parse_definition_map(definitions, SWAGGER_REF_PREFIX),
        None => Ok(Catalog::new()),
    }
}

/// Build a catalog from an OpenAPI 3.x document's `components/schemas`.
pub fn parse_openapi(input: &Value) -> Result<Catalog, LoadError> {
    let version = input.get("openapi").and_then(|v| v.as_str()).unwrap_or("");
    if !version.starts_with("3.") {
        return Err(LoadError::Unsupported(format!(
            "OpenAPI version {} not supported (expected 3.x)",
            version
        )));
    }

    match input.pointer("/components/schemas") {
        Some(schemas) => parse_definition_map(schemas, OPENAPI_REF_PREFIX),
        None => Ok(Catalog::new()),
    }
}
