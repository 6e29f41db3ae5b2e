//! Integration tests for the complete record-resolution pipeline
//!
//! These tests verify end-to-end functionality across crates:
//! - Schema → identifier strategy → point query (ontoscope-model)
//! - Query result → materialized instance → rendered properties
//! - RecordViewer lifecycle over mocked services (ontoscope-client)
//!
//! Run with: cargo test --test integration_tests

use async_trait::async_trait;
use ontoscope_client::{
    QueryService, RecordViewer, SchemaService, ServiceError, ViewRequest, ViewState,
};
use ontoscope_model::{identifier_field, point_query, Instance, ObjectType, Query, QueryResult};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Pure pipeline: schema → query → instance → rendering
// ============================================================================

#[test]
fn test_person_scenario_pure_pipeline() {
    // Person declares no id_column, so its first property is the key.
    let person = ObjectType::new("Person").with_properties(["name", "email"]);
    assert_eq!(identifier_field(&person), "name");

    let query = point_query(&person, "alice");
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "object": "Person",
            "select": ["id", "name", "email"],
            "filter": [["=", "name", "alice"]],
            "limit": 1,
        })
    );

    // The query surface answered without an `id` key; identity is backfilled.
    let row = json!({"name": "alice", "email": "a@x.com"});
    let instance = Instance::materialize(row.as_object().unwrap(), "alice");
    assert_eq!(instance.id, "alice");
    assert_eq!(instance.render("email"), "a@x.com");
    assert_eq!(instance.render("phone"), "-", "absent property renders the placeholder");
}

#[test]
fn test_structured_property_renders_indented() {
    let row = json!({"id": "cfg-1", "settings": {"theme": "dark", "limits": [1, 2]}});
    let instance = Instance::materialize(row.as_object().unwrap(), "cfg-1");

    let rendered = instance.render("settings");
    assert!(rendered.contains('\n'));
    assert!(rendered.contains("\"theme\""));
    assert!(rendered.contains("\"dark\""));
}

// ============================================================================
// Viewer lifecycle over mocked services
// ============================================================================

struct FixedSchema(ObjectType);

#[async_trait]
impl SchemaService for FixedSchema {
    async fn object_type(&self, name: &str) -> Result<ObjectType, ServiceError> {
        if name == self.0.name {
            Ok(self.0.clone())
        } else {
            Err(ServiceError::NotFound(format!("object type '{name}'")))
        }
    }
}

struct FixedRows(serde_json::Value);

#[async_trait]
impl QueryService for FixedRows {
    async fn execute(&self, _query: &Query) -> Result<QueryResult, ServiceError> {
        let rows = self
            .0
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row.as_object().unwrap().clone())
            .collect();
        Ok(QueryResult { rows })
    }
}

#[tokio::test]
async fn test_viewer_end_to_end_found() {
    let vehicle = ObjectType::new("Vehicle")
        .with_properties(["plate_number", "vehicle_type", "inspection"])
        .with_id_column("plate_number");
    let rows = json!([{
        "id": "veh-7",
        "plate_number": "AB-123",
        "vehicle_type": "truck",
        "inspection": {"passed": true, "year": 2026},
    }]);

    let viewer = RecordViewer::new(
        Arc::new(FixedSchema(vehicle)),
        Arc::new(FixedRows(rows)),
    );
    viewer.navigate(ViewRequest::new("Vehicle", "AB-123")).await;

    match viewer.state() {
        ViewState::Found {
            object_type,
            instance,
            ..
        } => {
            assert_eq!(object_type.name, "Vehicle");
            assert_eq!(instance.id, "veh-7", "row id wins over the requested id");
            assert_eq!(instance.render("vehicle_type"), "truck");
            assert!(instance.render("inspection").contains("\"passed\""));
        }
        other => panic!("expected Found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_viewer_unknown_type_is_not_found() {
    let viewer = RecordViewer::new(
        Arc::new(FixedSchema(ObjectType::new("Person"))),
        Arc::new(FixedRows(json!([]))),
    );
    viewer.navigate(ViewRequest::new("Spaceship", "x")).await;
    assert_eq!(viewer.state(), ViewState::NotFound);
}
