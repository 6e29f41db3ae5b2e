//! Record view lifecycle.
//!
//! One [`RecordViewer`] backs one single-record view session. Its state
//! machine:
//!
//! ```text
//! Idle ──navigate──► Loading ──► Found { Viewing ⇄ Editing }
//!                        │
//!                        └─────► NotFound
//! ```
//!
//! Any state re-enters `Loading` on a new [`ViewRequest`]; closing the edit
//! form re-enters it unconditionally (the viewer refetches rather than
//! trusting the form's local result). Load failures of every kind collapse
//! into `NotFound`; none of them is fatal to the surrounding application.
//!
//! Two hardenings over the naive fetch-and-replace loop:
//! - a generation counter discards responses that finish after a newer
//!   request has been issued, so a slow load can never clobber fresh state;
//! - both external calls run under a timeout, converting a hung service into
//!   an ordinary failed load instead of a view stuck in `Loading`.

use crate::{ConfirmPrompt, DeleteService, EditForm, Navigator, QueryService, SchemaService, ServiceError};
use ontoscope_model::{point_query, Instance, ObjectType};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Default bound on each external call during a load.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// The immutable request token driving one load: which record to show.
///
/// Navigation parameters are deliberately made explicit here instead of being
/// read ambiently, so stale responses can be told apart from current ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewRequest {
    pub object_type: String,
    pub id: String,
}

impl ViewRequest {
    pub fn new(object_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            id: id.into(),
        }
    }
}

/// Sub-state of a found record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Viewing,
    Editing,
}

/// Where the view session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No navigation has happened yet.
    Idle,
    Loading,
    /// The record (or its schema) does not exist, or the load failed.
    NotFound,
    Found {
        object_type: ObjectType,
        instance: Instance,
        mode: ViewMode,
    },
}

/// Request token and state of the session, kept in one cell so they can
/// never be observed out of step with each other.
#[derive(Debug)]
struct Session {
    request: Option<ViewRequest>,
    state: ViewState,
}

/// Drives the load/edit/delete lifecycle of one single-record view.
///
/// Locking protocol: `session` is the single source of truth for the request
/// token and the view state. A navigation bumps `generation` and installs the
/// new token while holding the `session` write lock, and a finished load
/// re-checks `generation` under that same lock before settling. A stale load
/// therefore either settles before the newer navigation starts (and is then
/// overwritten by it) or observes the bumped generation and is discarded;
/// there is no window in which it can land on top of a newer result.
pub struct RecordViewer {
    schema: Arc<dyn SchemaService>,
    query: Arc<dyn QueryService>,
    deletion: Option<Arc<dyn DeleteService>>,
    session_id: Uuid,
    /// Bumped on every navigate; loads settling under an older generation
    /// are discarded.
    generation: AtomicU64,
    session: RwLock<Session>,
    load_timeout: Duration,
}

impl RecordViewer {
    pub fn new(schema: Arc<dyn SchemaService>, query: Arc<dyn QueryService>) -> Self {
        Self {
            schema,
            query,
            deletion: None,
            session_id: Uuid::new_v4(),
            generation: AtomicU64::new(0),
            session: RwLock::new(Session {
                request: None,
                state: ViewState::Idle,
            }),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Attach the deletion persistence service once a deployment provides it.
    pub fn with_delete_service(mut self, deletion: Arc<dyn DeleteService>) -> Self {
        self.deletion = Some(deletion);
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.session.read().state.clone()
    }

    pub fn request(&self) -> Option<ViewRequest> {
        self.session.read().request.clone()
    }

    /// Point the view at a (possibly new) record and run one load cycle.
    ///
    /// Schema fetch and point query are awaited in order, since the query's
    /// filter field depends on the schema. Every failure path settles in
    /// `NotFound`.
    pub async fn navigate(&self, request: ViewRequest) {
        let generation = {
            let mut session = self.session.write();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            session.request = Some(request.clone());
            session.state = ViewState::Loading;
            generation
        };

        let settled = match self.fetch(&request).await {
            Ok(Some((object_type, instance))) => ViewState::Found {
                object_type,
                instance,
                mode: ViewMode::Viewing,
            },
            Ok(None) => {
                debug!(
                    object_type = %request.object_type,
                    id = %request.id,
                    "no matching record"
                );
                ViewState::NotFound
            }
            Err(e) => {
                warn!(
                    object_type = %request.object_type,
                    id = %request.id,
                    error = %e,
                    "failed to load record"
                );
                ViewState::NotFound
            }
        };

        // The generation re-check and the settle happen under one lock, so a
        // newer navigation cannot slip in between them.
        let mut session = self.session.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                object_type = %request.object_type,
                id = %request.id,
                "discarding stale load result"
            );
            return;
        }
        session.state = settled;
    }

    /// Re-run the load for the current request, if any.
    pub async fn reload(&self) {
        let request = self.session.read().request.clone();
        if let Some(request) = request {
            self.navigate(request).await;
        }
    }

    async fn fetch(
        &self,
        request: &ViewRequest,
    ) -> Result<Option<(ObjectType, Instance)>, ServiceError> {
        let object_type = self
            .bounded(self.schema.object_type(&request.object_type))
            .await?;
        let query = point_query(&object_type, &request.id);
        let result = self.bounded(self.query.execute(&query)).await?;

        match result.rows.first() {
            None => Ok(None),
            Some(row) => {
                let instance = Instance::materialize(row, &request.id);
                Ok(Some((object_type, instance)))
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        tokio::time::timeout(self.load_timeout, call)
            .await
            .map_err(|_| {
                ServiceError::Transport(format!(
                    "service call exceeded {:?}",
                    self.load_timeout
                ))
            })?
    }

    /// Hand the current record to the edit form and refetch once it closes.
    ///
    /// Only meaningful from `Found`; returns whether an edit session ran.
    /// The refetch happens whether the user saved or cancelled, so the
    /// displayed instance always reflects server state.
    pub async fn edit(&self, form: &dyn EditForm) -> bool {
        let (object_type, instance) = {
            let mut session = self.session.write();
            match &mut session.state {
                ViewState::Found {
                    object_type,
                    instance,
                    mode,
                } => {
                    *mode = ViewMode::Editing;
                    (object_type.clone(), instance.clone())
                }
                _ => return false,
            }
        };

        form.open(&object_type, &instance).await;
        self.reload().await;
        true
    }

    /// Confirm, navigate to the collection view, then invoke deletion
    /// persistence when available.
    ///
    /// Declining the prompt aborts with no side effects. A failure from the
    /// delete service is returned to the caller instead of being collapsed
    /// into the view state; a silent failure here would misrepresent what
    /// happened to the data.
    ///
    /// Returns `Ok(true)` when the user confirmed and navigation happened.
    /// Only a `Found` record can be deleted; any other state answers
    /// `Ok(false)` without consulting the prompt.
    pub async fn delete(
        &self,
        prompt: &dyn ConfirmPrompt,
        navigator: &dyn Navigator,
    ) -> Result<bool, ServiceError> {
        let request = {
            let session = self.session.read();
            match (&session.state, session.request.clone()) {
                (ViewState::Found { .. }, Some(request)) => request,
                _ => return Ok(false),
            }
        };

        let message = format!(
            "Are you sure you want to delete this {} record?",
            request.object_type
        );
        if !prompt.confirm(&message).await {
            return Ok(false);
        }

        navigator.go_to_collection(&request.object_type).await;

        match &self.deletion {
            Some(service) => {
                service
                    .delete(&request.object_type, &request.id)
                    .await
                    .map_err(|e| {
                        error!(
                            object_type = %request.object_type,
                            id = %request.id,
                            error = %e,
                            "failed to delete record"
                        );
                        e
                    })?;
            }
            None => {
                warn!(
                    object_type = %request.object_type,
                    id = %request.id,
                    "deletion persistence not available; record left in place"
                );
            }
        }
        Ok(true)
    }
}
