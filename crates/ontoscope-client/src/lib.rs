//! Ontoscope service collaborators and the record view lifecycle
//!
//! The viewer core never talks to the outside world directly; everything it
//! needs is behind an async trait here:
//! 1. [`SchemaService`] resolves an object-type name into its schema
//! 2. [`QueryService`] executes the declarative point query
//! 3. [`DeleteService`] is the (optional) deletion persistence interface
//! 4. [`Navigator`], [`EditForm`] and [`ConfirmPrompt`] are the presentation
//!    collaborators: collection navigation, the edit form widget, and the
//!    blocking delete confirmation
//!
//! [`viewer::RecordViewer`] orchestrates the load/edit/delete lifecycle over
//! these seams; [`http`] provides reqwest-backed service implementations.

pub mod http;
pub mod viewer;

use async_trait::async_trait;
use ontoscope_model::{Instance, ObjectType, Query, QueryResult};
use thiserror::Error;

// ============================================================================
// Error taxonomy
// ============================================================================

/// Failures surfaced by the external services.
///
/// The viewer collapses all three variants into a single user-visible
/// "not found / failed to load" display during a load; only the delete path
/// propagates errors distinctly, since silently losing a delete would
/// misrepresent data state.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Unknown object type, or (for deletion) a vanished record.
    #[error("not found: {0}")]
    NotFound(String),

    /// Service unreachable or answered with a non-success status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service rejected the query as malformed. The query builder's
    /// invariants should make this unreachable; treated like a transport
    /// failure when it happens anyway.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

// ============================================================================
// Service interfaces
// ============================================================================

/// Read access to the schema service.
#[async_trait]
pub trait SchemaService: Send + Sync {
    /// Resolve an object-type name into its full definition.
    async fn object_type(&self, name: &str) -> Result<ObjectType, ServiceError>;
}

/// Execution of declarative queries by the generic query service.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Run a query; a record with no match comes back as zero rows, not as
    /// an error.
    async fn execute(&self, query: &Query) -> Result<QueryResult, ServiceError>;
}

/// Deletion persistence. Not yet provided by every deployment, so the viewer
/// treats this collaborator as optional.
#[async_trait]
pub trait DeleteService: Send + Sync {
    async fn delete(&self, object_type: &str, id: &str) -> Result<(), ServiceError>;
}

// ============================================================================
// Presentation collaborators
// ============================================================================

/// Navigation back out of the single-record view.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Go to the collection view listing records of `object_type`.
    async fn go_to_collection(&self, object_type: &str);
}

/// The external create/edit form widget.
///
/// `open` resolves when the form closes; the viewer deliberately does not
/// learn whether the user saved or cancelled; it refetches either way.
#[async_trait]
pub trait EditForm: Send + Sync {
    async fn open(&self, object_type: &ObjectType, instance: &Instance);
}

/// Blocking yes/no confirmation shown before destructive actions.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

pub use viewer::{RecordViewer, ViewMode, ViewRequest, ViewState};
