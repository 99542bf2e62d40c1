//! Recursive flattening of definitions into inline property trees.
//!
//! Every reference reachable from a definition is expanded by value, so a
//! finished [`OutputDocument`] never points at another definition. A type
//! referenced from several places is expanded once per occurrence unless
//! [`ConvertOptions::memoize`] is set; the output is identical either way.

use crate::identity::{IdentityError, ResourceId};
use crate::output::{OutputDocument, OutputProperty, PropertyMap};
use resource_schema_catalog::{Catalog, FieldMap, FieldSchema, TypeReference};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("cyclic reference: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<TypeReference> },

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    /// Cache each expanded reference and reuse it for later occurrences.
    pub memoize: bool,
}

/// Converts definitions of one catalog.
///
/// A converter may be reused for many documents. It holds no state that
/// changes the output of a later conversion.
pub struct Converter<'a> {
    catalog: &'a Catalog,
    options: ConvertOptions,
    /// References currently being expanded, outermost first.
    in_progress: Vec<TypeReference>,
    memo: HashMap<TypeReference, PropertyMap>,
}

impl<'a> Converter<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_options(catalog, ConvertOptions::default())
    }

    pub fn with_options(catalog: &'a Catalog, options: ConvertOptions) -> Self {
        Self {
            catalog,
            options,
            in_progress: Vec::new(),
            memo: HashMap::new(),
        }
    }

    /// Assemble the document for the definition named by `reference`.
    pub fn document(&mut self, reference: &str) -> Result<OutputDocument, ConvertError> {
        let id = ResourceId::parse(reference)?;
        let catalog = self.catalog;
        let definition = catalog.resolve(reference);

        let mut document = OutputDocument::new(id.identifier(), definition.description.as_str());
        document.properties = self.convert(&definition.properties, reference)?;
        document.required = definition.required.clone();
        Ok(document)
    }

    /// Convert a field map whose owning definition is `context`.
    ///
    /// `context` decides the constants injected into `kind` and
    /// `apiVersion` fields at this level.
    pub fn convert(
        &mut self,
        properties: &FieldMap,
        context: &str,
    ) -> Result<PropertyMap, ConvertError> {
        self.in_progress.clear();
        self.in_progress.push(context.to_string());
        let result = self.convert_fields(properties, context);
        self.in_progress.clear();
        result
    }

    fn convert_fields(
        &mut self,
        properties: &FieldMap,
        context: &str,
    ) -> Result<PropertyMap, ConvertError> {
        let mut converted = PropertyMap::new();
        for (name, field) in properties {
            let mut property = match field {
                FieldSchema::Reference(target) => {
                    OutputProperty::object(name.as_str(), self.expand(target)?)
                }
                FieldSchema::Array { items } => {
                    let item_properties = match items {
                        Some(target) => self.expand(target)?,
                        None => PropertyMap::new(),
                    };
                    OutputProperty::array(name.as_str(), item_properties)
                }
                FieldSchema::Primitive { ty, enumeration } => {
                    OutputProperty::primitive(name.as_str(), ty.as_str(), enumeration.clone())
                }
                FieldSchema::Untyped => {
                    tracing::debug!(context, field = %name, "field has no type or reference");
                    OutputProperty::object(name.as_str(), PropertyMap::new())
                }
            };
            inject_identity(&mut property, name, context);
            converted.insert(name.clone(), property);
        }
        Ok(converted)
    }

    /// Inline the properties of `reference`, which becomes the new context.
    fn expand(&mut self, reference: &str) -> Result<PropertyMap, ConvertError> {
        if let Some(start) = self.in_progress.iter().position(|r| r == reference) {
            let mut chain = self.in_progress[start..].to_vec();
            chain.push(reference.to_string());
            return Err(ConvertError::CyclicReference { chain });
        }

        if self.options.memoize {
            if let Some(properties) = self.memo.get(reference) {
                return Ok(properties.clone());
            }
        }

        let catalog = self.catalog;
        let definition = catalog.resolve(reference);

        self.in_progress.push(reference.to_string());
        let result = self.convert_fields(&definition.properties, reference);
        self.in_progress.pop();
        let properties = result?;

        if self.options.memoize {
            self.memo.insert(reference.to_string(), properties.clone());
        }
        Ok(properties)
    }
}

/// Pin `kind` and `apiVersion` to the identity of the enclosing definition.
fn inject_identity(property: &mut OutputProperty, field: &str, context: &str) {
    let select: fn(&ResourceId) -> &str = match field {
        "kind" => ResourceId::kind,
        "apiVersion" => ResourceId::group_version,
        _ => return,
    };

    match ResourceId::parse(context) {
        Ok(id) => property.pin(select(&id)),
        Err(err) => tracing::debug!(context, field, %err, "identity constant skipped"),
    }
}

/// Convert `properties` with a throwaway [`Converter`].
pub fn convert(
    catalog: &Catalog,
    properties: &FieldMap,
    context: &str,
) -> Result<PropertyMap, ConvertError> {
    Converter::new(catalog).convert(properties, context)
}

/// Assemble the document for `reference` with a throwaway [`Converter`].
pub fn assemble(catalog: &Catalog, reference: &str) -> Result<OutputDocument, ConvertError> {
    Converter::new(catalog).document(reference)
}
