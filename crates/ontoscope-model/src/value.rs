//! Dynamically-typed property values and the identity-bearing [`Instance`].
//!
//! The schema carries no static per-property types into this core, so a
//! fetched row is a bag of raw JSON values. Instead of probing runtime shape
//! at every render site, each value is classified once, at the
//! materialization boundary, into a tagged variant the renderer can match
//! exhaustively: absent, primitive scalar, or nested structure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A primitive property value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// The three shapes a property value can take at render time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PropertyValue {
    /// Null in the row, or the row carried no such key at all.
    Absent,
    /// String, number, or boolean.
    Scalar(Scalar),
    /// Any nested structure (JSON object or array).
    Structured(Value),
}

impl PropertyValue {
    /// Classify a raw JSON value by its runtime shape.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(text) => Self::Scalar(Scalar::Text(text)),
            Value::Number(number) => Self::Scalar(Scalar::Number(number)),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            structured @ (Value::Object(_) | Value::Array(_)) => Self::Structured(structured),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::classify(value)
    }
}

/// One concrete record of an object type.
///
/// Fields are aligned with the schema's properties by *name*, not by order;
/// lookups tolerate missing keys. The `id` is guaranteed non-empty once an
/// instance exists; the whole rendering layer leans on that invariant.
///
/// Instances are replaced wholesale on every reload, never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    pub id: String,
    pub fields: BTreeMap<String, PropertyValue>,
}

impl Instance {
    /// Normalize the first row of a point-query result into an instance.
    ///
    /// The row may or may not carry an `id` key. When it does (and the value
    /// is a non-empty scalar) that becomes the instance id; otherwise the
    /// originally requested identifier is backfilled, so the result is never
    /// left without identity.
    pub fn materialize(row: &Map<String, Value>, requested_id: &str) -> Self {
        let id = row
            .get("id")
            .and_then(scalar_text)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| requested_id.to_string());

        let fields = row
            .iter()
            .map(|(name, value)| (name.clone(), PropertyValue::classify(value.clone())))
            .collect();

        Self { id, fields }
    }

    /// Look up a property by name; a missing key reads as [`PropertyValue::Absent`].
    pub fn value(&self, name: &str) -> PropertyValue {
        self.fields
            .get(name)
            .cloned()
            .unwrap_or(PropertyValue::Absent)
    }

    /// Render one property through the three-way dispatch in [`crate::render`].
    pub fn render(&self, name: &str) -> String {
        crate::render::render_value(&self.value(name))
    }
}

/// Textual form of a scalar row value, used only for id extraction.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
