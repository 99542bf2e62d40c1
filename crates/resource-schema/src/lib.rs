//! Generate per-resource JSON Schema files from generated OpenAPI definitions.
//!
//! Loads a definition catalog, converts every definition into a
//! self-contained document with [`resource_schema_convert`], and writes one
//! `<group>_<version>_<kind>.json` file per definition.
//!
//! ```no_run
//! use resource_schema::{FsWriter, GenerateOptions, generate};
//! use resource_schema_catalog::{InputFormat, load_catalog};
//!
//! let catalog = load_catalog("openapi/definitions.json".as_ref(), InputFormat::Auto)?;
//! let report = generate(&catalog, &FsWriter::new("doc/schema"), GenerateOptions::default());
//! for failure in &report.failures {
//!     println!("{}", failure);
//! }
//! # Ok::<(), resource_schema_catalog::LoadError>(())
//! ```

#[cfg(feature = "cli")]
pub mod commands;
pub mod config;
pub mod generate;
pub mod writer;

pub use config::{ConfigError, ResourceSchemaConfig};
pub use generate::{Failure, GenerateError, GenerateOptions, Report, generate};
pub use writer::{FsWriter, SchemaWriter, WriteError};
