//! Ontoscope core model
//!
//! Schema-driven record resolution for a generically-typed object catalog:
//! given an object type's schema and a requested identifier, this crate
//! decides which field identifies a record, builds the point query that
//! fetches it, normalizes the returned row into an identity-bearing
//! [`Instance`], and projects its dynamically-typed property values into
//! displayable text.
//!
//! Everything here is pure and synchronous. Talking to the schema and query
//! services (and driving the view lifecycle) lives in `ontoscope-client`.

pub mod query;
pub mod render;
pub mod schema;
pub mod value;

pub use query::{point_query, FilterOp, Predicate, Query, QueryResult};
pub use render::{render_value, PLACEHOLDER};
pub use schema::{identifier_field, DataSourceMapping, ObjectType, PropertyDef};
pub use value::{Instance, PropertyValue, Scalar};
