//! Output JSON Schema shapes.
//!
//! Field order matches the serialized layout: documents emit
//! `properties, title, type, description, required` and properties emit
//! `title, type, const, enum, properties, items`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name to converted property, in sorted order.
pub type PropertyMap = BTreeMap<String, OutputProperty>;

pub const OBJECT: &str = "object";
pub const ARRAY: &str = "array";

/// One converted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputProperty {
    /// Display name, always the field name.
    pub title: String,
    /// `object`, `array`, or a primitive type name.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemSchema>,
}

/// The `items` member of an array property.
///
/// Always serialized as `{"properties": {...}}`, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSchema {
    pub properties: PropertyMap,
}

/// The top-level schema written for one resource kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub properties: PropertyMap,
    /// The resource identifier, also the output file stem.
    pub title: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl OutputProperty {
    pub fn object(title: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            title: title.into(),
            ty: OBJECT.to_string(),
            constant: None,
            enumeration: None,
            properties,
            items: None,
        }
    }

    pub fn array(title: impl Into<String>, item_properties: PropertyMap) -> Self {
        Self {
            title: title.into(),
            ty: ARRAY.to_string(),
            constant: None,
            enumeration: None,
            properties: PropertyMap::new(),
            items: Some(ItemSchema {
                properties: item_properties,
            }),
        }
    }

    pub fn primitive(
        title: impl Into<String>,
        ty: impl Into<String>,
        enumeration: Option<Vec<Value>>,
    ) -> Self {
        Self {
            title: title.into(),
            ty: ty.into(),
            constant: None,
            enumeration,
            properties: PropertyMap::new(),
            items: None,
        }
    }

    /// Pin the property to a literal value, dropping any enumeration.
    pub fn pin(&mut self, value: impl Into<String>) {
        self.constant = Some(value.into());
        self.enumeration = None;
    }
}

impl OutputDocument {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            properties: PropertyMap::new(),
            title: title.into(),
            ty: OBJECT.to_string(),
            description: description.into(),
            required: Vec::new(),
        }
    }
}
