//! Object-type schemas as served by the schema service.
//!
//! An object type is a named, user-defined record shape: an ordered list of
//! properties plus an optional data-source mapping that (among other things)
//! names the column uniquely identifying a record. Property values carry no
//! static type into this core; they stay dynamically typed until render time
//! (see [`crate::value`]).

use serde::{Deserialize, Serialize};

/// One declared property of an object type.
///
/// The schema service may attach more metadata per property (display hints,
/// mapped column names); only the name matters to record resolution, so the
/// rest is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
}

/// How an object type maps onto its backing data source.
///
/// Mirrors the schema service payload. Record resolution only consults
/// `id_column`; the connection/table/field-mapping fields ride along so a
/// round-tripped schema is not lossy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataSourceMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Primary-key column for point lookups. May be absent or empty for
    /// types that never declared one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<String>,
    /// Property name -> backing column name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_mapping: Option<std::collections::BTreeMap<String, String>>,
}

/// A named object type: ordered properties + optional data-source mapping.
///
/// Invariants (guaranteed by the schema service, tolerated if violated):
/// property names are unique within a type; `properties` is non-empty for
/// any renderable type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectType {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSourceMapping>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            data_source: None,
        }
    }

    pub fn with_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = names
            .into_iter()
            .map(|name| PropertyDef { name: name.into() })
            .collect();
        self
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.data_source
            .get_or_insert_with(DataSourceMapping::default)
            .id_column = Some(column.into());
        self
    }
}

/// Which schema property uniquely identifies records of this type.
///
/// Precedence:
/// 1. `data_source.id_column`, when present and non-empty (external data
///    sources often key on a column that is not called `id`);
/// 2. the first declared property, for schemas without an explicit id column;
/// 3. the literal `"id"`, for a type with no properties at all.
///
/// Total over every schema; never fails, only degrades to the `"id"` default.
pub fn identifier_field(object_type: &ObjectType) -> &str {
    object_type
        .data_source
        .as_ref()
        .and_then(|ds| ds.id_column.as_deref())
        .filter(|column| !column.is_empty())
        .or_else(|| {
            object_type
                .properties
                .first()
                .map(|property| property.name.as_str())
        })
        .unwrap_or("id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identifier_prefers_explicit_id_column() {
        let vehicle = ObjectType::new("Vehicle")
            .with_properties(["plate_number", "vehicle_type"])
            .with_id_column("plate_number");
        assert_eq!(identifier_field(&vehicle), "plate_number");
    }

    #[test]
    fn test_identifier_ignores_empty_id_column() {
        let vehicle = ObjectType::new("Vehicle")
            .with_properties(["plate_number"])
            .with_id_column("");
        assert_eq!(
            identifier_field(&vehicle),
            "plate_number",
            "empty id_column should fall through to the first property"
        );
    }

    #[test]
    fn test_identifier_falls_back_to_first_property() {
        let person = ObjectType::new("Person").with_properties(["name", "email"]);
        assert_eq!(identifier_field(&person), "name");
    }

    #[test]
    fn test_identifier_defaults_to_id_for_empty_schema() {
        let empty = ObjectType::new("Empty");
        assert_eq!(identifier_field(&empty), "id");
    }

    #[test]
    fn test_object_type_deserializes_service_payload() {
        let payload = r#"{
            "name": "Vehicle",
            "properties": [{"name": "plate_number"}, {"name": "vehicle_type"}],
            "data_source": {
                "connection_id": "fleet_db",
                "table": "vehicles",
                "id_column": "plate_number",
                "field_mapping": {"plate_number": "plate_no"}
            }
        }"#;
        let object_type: ObjectType = serde_json::from_str(payload).unwrap();
        assert_eq!(object_type.properties.len(), 2);
        assert_eq!(identifier_field(&object_type), "plate_number");
    }

    proptest! {
        /// The strategy is total: any combination of id column and property
        /// list yields a non-empty field name matching the precedence.
        #[test]
        fn prop_identifier_is_total(
            id_column in proptest::option::of("[a-z_]{0,8}"),
            properties in proptest::collection::vec("[a-z_]{1,8}", 0..4),
        ) {
            let mut object_type = ObjectType::new("T").with_properties(properties.clone());
            if let Some(column) = id_column.clone() {
                object_type = object_type.with_id_column(column);
            }

            let field = identifier_field(&object_type);
            prop_assert!(!field.is_empty());

            match id_column.as_deref() {
                Some(column) if !column.is_empty() => prop_assert_eq!(field, column),
                _ => match properties.first() {
                    Some(first) => prop_assert_eq!(field, first.as_str()),
                    None => prop_assert_eq!(field, "id"),
                },
            }
        }
    }
}
