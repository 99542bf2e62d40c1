//! In-memory model of a definition catalog.
//!
//! Every input format normalizes to this model before conversion. The
//! catalog is built once and only read afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// An opaque string naming a [`Definition`] (e.g. `k8s.io/api/core/v1.Pod`).
pub type TypeReference = String;

/// Field name to field schema, in sorted order.
pub type FieldMap = BTreeMap<String, FieldSchema>;

static EMPTY_DEFINITION: Definition = Definition {
    description: String::new(),
    properties: BTreeMap::new(),
    required: Vec::new(),
};

/// A named schema describing one type's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Free-text documentation.
    pub description: String,
    /// The type's fields.
    pub properties: FieldMap,
    /// Names of fields the source marks as required.
    pub required: Vec<String>,
}

/// The schema of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldSchema {
    /// A scalar (or otherwise opaque) type tag such as `string` or `integer`.
    Primitive {
        ty: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enumeration: Option<Vec<Value>>,
    },
    /// An object-typed field pointing at another definition.
    Reference(TypeReference),
    /// An array whose items are described by another definition.
    ///
    /// `items` is `None` when the item schema is not a reference.
    Array { items: Option<TypeReference> },
    /// Neither a type tag nor a reference (bare `oneOf`, `anyOf`, or `{}`).
    Untyped,
}

/// All definitions known to a conversion run, keyed by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    definitions: BTreeMap<TypeReference, Definition>,
}

impl Definition {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.properties.insert(name.into(), field);
        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }
}

impl FieldSchema {
    pub fn primitive(ty: impl Into<String>) -> Self {
        Self::Primitive {
            ty: ty.into(),
            enumeration: None,
        }
    }

    pub fn enumeration(ty: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Primitive {
            ty: ty.into(),
            enumeration: Some(values),
        }
    }

    pub fn reference(target: impl Into<TypeReference>) -> Self {
        Self::Reference(target.into())
    }

    pub fn array_of(target: impl Into<TypeReference>) -> Self {
        Self::Array {
            items: Some(target.into()),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition.
    pub fn insert(&mut self, reference: impl Into<TypeReference>, definition: Definition) {
        self.definitions.insert(reference.into(), definition);
    }

    /// Look up a definition, if present.
    pub fn get(&self, reference: &str) -> Option<&Definition> {
        self.definitions.get(reference)
    }

    /// Look up a definition, falling back to an empty one.
    ///
    /// Unknown references are not an error: the caller sees a definition
    /// with no description and no properties.
    pub fn resolve(&self, reference: &str) -> &Definition {
        match self.definitions.get(reference) {
            Some(definition) => definition,
            None => {
                tracing::debug!(reference, "unresolved reference, using empty definition");
                &EMPTY_DEFINITION
            }
        }
    }

    /// Iterate definitions in reference order.
    pub fn iter(&self) -> impl Iterator<Item = (&TypeReference, &Definition)> {
        self.definitions.iter()
    }

    pub fn references(&self) -> impl Iterator<Item = &TypeReference> {
        self.definitions.keys()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<(TypeReference, Definition)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (TypeReference, Definition)>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}
