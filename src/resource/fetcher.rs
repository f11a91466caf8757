//! Resource Fetcher
//!
//! A [`Resource`] is one fetched API path together with its decoded body and
//! tabular projection. Statuses other than 200 are not errors: they degrade
//! into a one-row table carrying `status_code`.

use super::projection::{failure_body, project};
use super::registry::{Endpoint, ResourceKind, API_PREFIX};
use super::resolver::{absolute_path, resolve};
use super::table::{Cell, Table, OBJ_COLUMN, STATUS_COLUMN, URL_COLUMN};
use crate::api::ApiClient;
use crate::records::Record;
use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde_json::{json, Value};

/// Separates a parent path from the column a nested resource was taken from
pub const NESTED_SEPARATOR: char = '#';

/// What the server answered for the last fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMeta {
    pub status: u16,
    /// Final URL, after any redirects
    pub url: String,
    pub fetched_at: DateTime<Utc>,
}

/// One fetched-and-projected API path
#[derive(Debug, Clone)]
pub struct Resource {
    client: ApiClient,
    path: String,
    kind: ResourceKind,
    response: Option<ResponseMeta>,
    body: Value,
    table: Table,
}

impl Resource {
    /// Fetch a path and project the response
    pub async fn fetch(client: &ApiClient, path: &str) -> Result<Self> {
        let path = absolute_path(path);
        let mut resource = Self {
            client: client.clone(),
            kind: resolve(&path),
            path: path.into_owned(),
            response: None,
            body: Value::Null,
            table: Table::new(),
        };
        resource.refresh().await?;
        Ok(resource)
    }

    /// Project pre-supplied data without a network call
    pub fn from_data(client: &ApiClient, path: &str, data: Value) -> Self {
        let path = absolute_path(path);
        let kind = resolve(&path);
        let transpose = kind == ResourceKind::Index && data.get(STATUS_COLUMN).is_none();
        let table = project(&data, transpose);
        Self {
            client: client.clone(),
            path: path.into_owned(),
            kind,
            response: None,
            body: data,
            table,
        }
    }

    /// Fetch the API index
    pub async fn index(client: &ApiClient) -> Result<Self> {
        Self::fetch(client, API_PREFIX).await
    }

    /// Fetch a whole collection
    pub async fn collection(client: &ApiClient, endpoint: Endpoint) -> Result<Self> {
        Self::fetch(client, &endpoint.path()).await
    }

    /// Fetch one item of a collection
    pub async fn item(client: &ApiClient, endpoint: Endpoint, index: &str) -> Result<Self> {
        Self::fetch(client, &endpoint.item_path(index)).await
    }

    /// Re-issue the request and replace response, body and table together.
    /// On a transport error the resource is left unchanged.
    ///
    /// A nested resource re-fetches its parent and takes the column again.
    pub async fn refresh(&mut self) -> Result<()> {
        let (fetch_path, column) = match self.path.split_once(NESTED_SEPARATOR) {
            Some((parent, column)) => (parent, Some(column)),
            None => (self.path.as_str(), None),
        };
        let response = self.client.get(fetch_path).await?;

        let transpose =
            self.kind == ResourceKind::Index && response.is_ok() && !response.redirected;
        let body = match (response.body, column) {
            (Some(body), Some(column)) => nested_collection(&body, column)
                .unwrap_or_else(|| json!({"count": 0, "results": []})),
            (Some(body), None) => body,
            (None, _) => {
                tracing::warn!("{} answered with status {}", self.path, response.status);
                failure_body(&self.path, response.status)
            }
        };
        let table = project(&body, transpose);

        self.response = Some(ResponseMeta {
            status: response.status,
            url: response.url,
            fetched_at: Utc::now(),
        });
        self.body = body;
        self.table = table;
        Ok(())
    }

    /// Construct the resource behind every row's `url` and store it in an
    /// `obj` column. Returns how many links were materialized.
    ///
    /// A failed resource, or one without a `url` column, is left alone with
    /// a warning.
    pub async fn materialize_links(&mut self) -> usize {
        if self.is_failed() || !self.table.has_column(URL_COLUMN) {
            tracing::warn!(
                "Invalid response status code: {} has no '{}' column to follow (columns: {:?})",
                self.path,
                URL_COLUMN,
                self.table.columns()
            );
            return 0;
        }

        let paths: Vec<Option<String>> = self
            .table
            .column(URL_COLUMN)
            .map(|cells| cells.map(|c| c.as_text().map(str::to_string)).collect())
            .unwrap_or_default();

        let client = &self.client;
        let cells: Vec<Cell> = stream::iter(paths)
            .map(|path| async move {
                let Some(path) = path else {
                    return Cell::Null;
                };
                match Resource::fetch(client, &path).await {
                    Ok(resource) => Cell::Link(Box::new(resource)),
                    Err(e) => {
                        tracing::warn!("Failed to follow {}: {:#}", path, e);
                        Cell::Null
                    }
                }
            })
            .buffered(client.link_concurrency())
            .collect()
            .await;

        let linked = cells.iter().filter(|c| c.as_link().is_some()).count();
        tracing::debug!("Materialized {} of {} links for {}", linked, cells.len(), self.path);
        self.table.set_column(OBJ_COLUMN, cells);
        linked
    }

    /// Fetch a linked path with this resource's client settings
    pub async fn follow(&self, path: &str) -> Result<Resource> {
        Resource::fetch(&self.client, path).await
    }

    /// Build a collection resource from a nested list column without a
    /// network call, e.g. the `skills` of an ability score.
    ///
    /// Its path is `<parent path>#<column>` so it never stands in for the
    /// full collection. Its kind is the collection of the first nested url.
    pub fn nested(&self, column: &str) -> Option<Resource> {
        let data = nested_collection(&self.body, column)?;
        let kind = data["results"]
            .as_array()
            .and_then(|items| items.iter().find_map(|item| item.get(URL_COLUMN)?.as_str()))
            .map(|url| resolve(url).collection())
            .unwrap_or(ResourceKind::Generic);

        let table = project(&data, false);
        Some(Resource {
            client: self.client.clone(),
            path: format!("{}{}{}", self.path, NESTED_SEPARATOR, column),
            kind,
            response: None,
            body: data,
            table,
        })
    }

    /// True for resources built by [`Resource::nested`]
    pub fn is_nested(&self) -> bool {
        self.path.contains(NESTED_SEPARATOR)
    }

    /// Decode the body into the typed record for this resource's kind
    pub fn record(&self) -> Result<Record> {
        if let Some(status) = self.failed_status() {
            bail!("{} was not fetched (status {})", self.path, status);
        }
        Record::decode(self.kind, &self.body)
    }

    /// True when the fetch degraded into a status-code row
    pub fn is_failed(&self) -> bool {
        self.failed_status().is_some()
    }

    fn failed_status(&self) -> Option<i64> {
        if let Some(meta) = &self.response {
            if meta.status != 200 {
                return Some(i64::from(meta.status));
            }
        }
        self.body.get(STATUS_COLUMN)?.as_i64()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Full URL this resource is fetched from
    pub fn url(&self) -> Result<String> {
        self.client.url_for(&self.path)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// HTTP status of the last fetch; `None` for pre-supplied data
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|meta| meta.status)
    }

    pub fn response(&self) -> Option<&ResponseMeta> {
        self.response.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.response.as_ref().map(|meta| meta.fetched_at)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Resources compare by their tables
impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

/// Collection body built from a non-empty nested list
fn nested_collection(body: &Value, column: &str) -> Option<Value> {
    let items = lookup_dotted(body, column)?.as_array()?;
    if items.is_empty() {
        return None;
    }
    Some(json!({"count": items.len(), "results": items}))
}

/// Find a value by column name, trying the literal key before walking
/// dotted segments
fn lookup_dotted<'a>(body: &'a Value, column: &str) -> Option<&'a Value> {
    if let Some(value) = body.get(column) {
        return Some(value);
    }
    column
        .split('.')
        .try_fold(body, |current, segment| current.get(segment))
}
