//! Raw JSON schema objects and their lowering into the catalog model.

use crate::model::{Definition, FieldSchema, TypeReference};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The subset of a JSON/OpenAPI schema object the catalog cares about.
/// Unknown keywords are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSchema {
    description: Option<String>,
    #[serde(rename = "type")]
    ty: Option<TypeTag>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "enum")]
    enumeration: Option<Vec<Value>>,
    items: Option<RawItems>,
    #[serde(rename = "allOf")]
    all_of: Vec<RawSchema>,
    properties: BTreeMap<String, RawSchema>,
    required: Vec<String>,
}

/// `type` is either a single name or a list of names.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeTag {
    Many(Vec<String>),
    One(String),
}

/// `items` is either one schema or a tuple of schemas.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItems {
    Tuple(Vec<RawSchema>),
    Single(Box<RawSchema>),
}

impl RawSchema {
    /// Lower a top-level schema into a [`Definition`].
    ///
    /// `ref_prefix` is stripped from every `$ref` so references match
    /// catalog keys (e.g. `#/definitions/`).
    pub(crate) fn into_definition(self, ref_prefix: &str) -> Definition {
        Definition {
            description: self.description.unwrap_or_default(),
            properties: self
                .properties
                .into_iter()
                .map(|(name, schema)| (name, schema.into_field(ref_prefix)))
                .collect(),
            required: self.required,
        }
    }

    fn into_field(self, ref_prefix: &str) -> FieldSchema {
        let Some(ty) = self.type_tag() else {
            return match self.target(ref_prefix) {
                Some(target) => FieldSchema::Reference(target),
                None => FieldSchema::Untyped,
            };
        };

        if ty == "array" {
            let items = match self.items {
                Some(RawItems::Single(item)) => item.target(ref_prefix),
                Some(RawItems::Tuple(items)) => {
                    items.into_iter().next().and_then(|i| i.target(ref_prefix))
                }
                None => None,
            };
            return FieldSchema::Array { items };
        }

        FieldSchema::Primitive {
            ty,
            enumeration: self.enumeration.filter(|values| !values.is_empty()),
        }
    }

    fn type_tag(&self) -> Option<String> {
        let tag = match self.ty.as_ref()? {
            TypeTag::One(name) => name.as_str(),
            TypeTag::Many(names) => names.first()?.as_str(),
        };
        (!tag.is_empty()).then(|| tag.to_string())
    }

    /// The referenced definition, either direct or wrapped in `allOf`.
    fn target(&self, ref_prefix: &str) -> Option<TypeReference> {
        if let Some(reference) = &self.reference {
            return Some(strip_prefix(reference, ref_prefix));
        }
        self.all_of
            .first()
            .and_then(|inner| inner.reference.as_deref())
            .map(|reference| strip_prefix(reference, ref_prefix))
    }
}

fn strip_prefix(reference: &str, prefix: &str) -> TypeReference {
    reference
        .strip_prefix(prefix)
        .unwrap_or(reference)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(schema: Value) -> FieldSchema {
        RawSchema::deserialize(&schema).unwrap().into_field("#/definitions/")
    }

    #[test]
    fn primitive_with_enum() {
        assert_eq!(
            field(json!({ "type": "string", "enum": ["Always", "Never"] })),
            FieldSchema::enumeration("string", vec![json!("Always"), json!("Never")])
        );
    }

    #[test]
    fn type_list_uses_first_entry() {
        assert_eq!(
            field(json!({ "type": ["integer", "null"], "format": "int32" })),
            FieldSchema::primitive("integer")
        );
    }

    #[test]
    fn empty_enum_is_dropped() {
        assert_eq!(
            field(json!({ "type": "boolean", "enum": [] })),
            FieldSchema::primitive("boolean")
        );
    }

    #[test]
    fn ref_without_type_is_reference() {
        assert_eq!(
            field(json!({ "$ref": "#/definitions/k8s.io/api/core/v1.PodSpec" })),
            FieldSchema::reference("k8s.io/api/core/v1.PodSpec")
        );
    }

    #[test]
    fn all_of_wrapper_is_reference() {
        assert_eq!(
            field(json!({
                "description": "Standard object metadata.",
                "allOf": [{ "$ref": "#/definitions/meta/v1.ObjectMeta" }]
            })),
            FieldSchema::reference("meta/v1.ObjectMeta")
        );
    }

    #[test]
    fn array_item_reference() {
        assert_eq!(
            field(json!({ "type": "array", "items": { "$ref": "core/v1.Container" } })),
            FieldSchema::array_of("core/v1.Container")
        );
        assert_eq!(
            field(json!({ "type": "array", "items": [{ "$ref": "core/v1.Volume" }] })),
            FieldSchema::array_of("core/v1.Volume")
        );
    }

    #[test]
    fn array_of_primitives_has_no_item_reference() {
        assert_eq!(
            field(json!({ "type": "array", "items": { "type": "string" } })),
            FieldSchema::Array { items: None }
        );
    }

    #[test]
    fn bare_schema_is_untyped() {
        assert_eq!(field(json!({})), FieldSchema::Untyped);
        assert_eq!(
            field(json!({ "oneOf": [{ "type": "string" }, { "type": "integer" }] })),
            FieldSchema::Untyped
        );
    }

    #[test]
    fn definition_keeps_description_and_required() {
        let raw = RawSchema::deserialize(&json!({
            "description": "Widget is a thing.",
            "type": "object",
            "required": ["spec"],
            "properties": {
                "spec": { "$ref": "#/definitions/pkg/api/v1.WidgetSpec" }
            }
        }))
        .unwrap();
        let definition = raw.into_definition("#/definitions/");

        assert_eq!(definition.description, "Widget is a thing.");
        assert_eq!(definition.required, vec!["spec".to_string()]);
        assert_eq!(
            definition.properties["spec"],
            FieldSchema::reference("pkg/api/v1.WidgetSpec")
        );
    }
}
