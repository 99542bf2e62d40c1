//! Flatten generated OpenAPI definitions into self-contained JSON Schema.
//!
//! Each definition in a [`Catalog`](resource_schema_catalog::Catalog)
//! becomes one [`OutputDocument`]: references and array item types are
//! inlined by value, and `kind`/`apiVersion` fields are pinned to the
//! identity derived from the owning definition's reference.
//!
//! ```text
//! Catalog ──> ResourceId::parse ──> Converter ──> OutputDocument
//!   (refs)     (group/version,        (inline,       (title, type,
//!               kind)                  pin identity)  properties)
//! ```
//!
//! # Example
//!
//! ```
//! use resource_schema_catalog::{Catalog, Definition, FieldSchema};
//! use resource_schema_convert::assemble;
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(
//!     "pkg/api/v1.Widget",
//!     Definition::new("A widget.")
//!         .with_field("kind", FieldSchema::primitive("string"))
//!         .with_field("spec", FieldSchema::reference("pkg/api/v1.WidgetSpec")),
//! );
//! catalog.insert(
//!     "pkg/api/v1.WidgetSpec",
//!     Definition::default().with_field("name", FieldSchema::primitive("string")),
//! );
//!
//! let document = assemble(&catalog, "pkg/api/v1.Widget").unwrap();
//! assert_eq!(document.title, "api_v1_Widget");
//! assert_eq!(document.properties["kind"].constant.as_deref(), Some("Widget"));
//! assert_eq!(document.properties["spec"].properties["name"].ty, "string");
//! ```

pub mod convert;
pub mod identity;
pub mod output;

pub use convert::{ConvertError, ConvertOptions, Converter, assemble, convert};
pub use identity::{IdentityError, ResourceId};
pub use output::{ItemSchema, OutputDocument, OutputProperty, PropertyMap};
