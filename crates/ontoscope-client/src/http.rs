//! HTTP implementations of the schema and query services.
//!
//! Wire surface:
//! - `GET  {base}/api/object-types/{name}` -> [`ObjectType`] JSON
//! - `POST {base}/api/query` with a [`Query`] body -> [`QueryResult`] JSON
//!
//! Status mapping: 404 is `NotFound`, 400 is `InvalidQuery`, everything else
//! non-success (and any connection-level failure) is `Transport`.

use crate::{QueryService, SchemaService, ServiceError};
use async_trait::async_trait;
use ontoscope_model::{ObjectType, Query, QueryResult};
use reqwest::StatusCode;
use tracing::debug;

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Turn a non-success response into the matching [`ServiceError`].
async fn status_error(response: reqwest::Response, context: &str) -> ServiceError {
    let status = response.status();
    let detail = response.text().await.unwrap_or_default();
    match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(context.to_string()),
        StatusCode::BAD_REQUEST => ServiceError::InvalidQuery(format!("{context}: {detail}")),
        _ => ServiceError::Transport(format!("{context}: HTTP {status}: {detail}")),
    }
}

fn normalize_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Schema service client.
#[derive(Debug, Clone)]
pub struct HttpSchemaService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchemaService {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base(base_url),
        }
    }
}

#[async_trait]
impl SchemaService for HttpSchemaService {
    async fn object_type(&self, name: &str) -> Result<ObjectType, ServiceError> {
        let url = format!("{}/api/object-types/{name}", self.base_url);
        debug!(%url, "fetching object type");
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, &format!("object type '{name}'")).await);
        }
        Ok(response.json::<ObjectType>().await?)
    }
}

/// Query service client.
#[derive(Debug, Clone)]
pub struct HttpQueryService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQueryService {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base(base_url),
        }
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn execute(&self, query: &Query) -> Result<QueryResult, ServiceError> {
        let url = format!("{}/api/query", self.base_url);
        debug!(%url, object = %query.object, "executing query");
        let response = self.client.post(&url).json(query).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, &format!("query on '{}'", query.object)).await);
        }
        Ok(response.json::<QueryResult>().await?)
    }
}
