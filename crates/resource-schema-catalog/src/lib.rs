//! Definition catalogs for generated OpenAPI definitions.
//!
//! A [`Catalog`] maps a globally unique type reference (usually an
//! import-path-qualified type name such as `k8s.io/api/apps/v1.Deployment`)
//! to its [`Definition`]. Catalogs are loaded once and treated as read-only.
//!
//! # Example
//!
//! ```
//! use resource_schema_catalog::{FieldSchema, InputFormat, parse_catalog};
//!
//! let input = serde_json::json!({
//!     "pkg/api/v1.Widget": {
//!         "type": "object",
//!         "properties": {
//!             "spec": { "$ref": "pkg/api/v1.WidgetSpec" }
//!         }
//!     }
//! });
//!
//! let catalog = parse_catalog(&input, InputFormat::Auto).unwrap();
//! let widget = catalog.resolve("pkg/api/v1.Widget");
//! assert_eq!(widget.properties["spec"], FieldSchema::reference("pkg/api/v1.WidgetSpec"));
//!
//! // Unknown references resolve to an empty definition.
//! assert!(catalog.resolve("pkg/api/v1.Gadget").properties.is_empty());
//! ```

pub mod input;
pub mod model;

pub use input::{InputFormat, LoadError, load_catalog, parse_catalog, parse_openapi, parse_swagger};
pub use model::{Catalog, Definition, FieldMap, FieldSchema, TypeReference};
