//! Declarative queries against the generic query service.
//!
//! The wire shape is the service's JSON query language: a target object type,
//! selected field names, filter predicates as `[op, field, value]` triples,
//! and a row limit. This core only ever *builds* point lookups; execution is
//! the query service's job.

use crate::schema::{identifier_field, ObjectType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Comparison operators understood by the query service.
///
/// Point lookups only use [`FilterOp::Eq`]; the rest are part of the query
/// language and kept for completeness of the wire type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FilterOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "like")]
    Like,
}

/// One filter predicate, serialized as a 3-element array: `["=", field, value]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Predicate(pub FilterOp, pub String, pub Value);

impl Predicate {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self(FilterOp::Eq, field.into(), value.into())
    }

    pub fn op(&self) -> FilterOp {
        self.0
    }

    pub fn field(&self) -> &str {
        &self.1
    }
}

/// A declarative query: built transiently per load, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Query {
    pub object: String,
    pub select: Vec<String>,
    pub filter: Vec<Predicate>,
    pub limit: u32,
}

/// Rows returned by the query service. An empty `rows` means "no match",
/// which is a result, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

/// Build the point query fetching exactly one record of `object_type`.
///
/// The selection is the literal `"id"` (the query surface exposes a synthetic
/// id on every result row) plus every declared property name, each exactly
/// once. The filter is a single equality predicate on the identifier field
/// resolved by [`identifier_field`], and the limit is always 1.
pub fn point_query(object_type: &ObjectType, id: &str) -> Query {
    let mut select = vec!["id".to_string()];
    for property in &object_type.properties {
        // A property literally named "id" is already selected.
        if !select.iter().any(|field| field == &property.name) {
            select.push(property.name.clone());
        }
    }

    Query {
        object: object_type.name.clone(),
        select,
        filter: vec![Predicate::eq(identifier_field(object_type), id)],
        limit: 1,
    }
}
