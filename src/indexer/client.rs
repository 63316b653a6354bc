/// HTTP client for the GraphQL indexer
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GalleryError, Result};
use crate::indexer::query::ArtQuery;
use crate::state::data::{ArtRecord, Holding};

/// Envelope of every GraphQL response
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Issues record queries against one endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    endpoint: String,
}

impl IndexerClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `query` once and return its records. No retries.
    pub async fn fetch(&self, query: &ArtQuery) -> Result<Vec<ArtRecord>> {
        let (limit, offset) = query.window();
        tracing::debug!(
            operation = query.operation_name(),
            address = query.address(),
            limit,
            offset,
            "querying indexer"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&query.request())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: self.endpoint.clone(),
                status,
            });
        }

        let body = response.text().await?;
        let records = decode_records(query, &body)?;
        tracing::info!(
            operation = query.operation_name(),
            count = records.len(),
            "📦 Fetched records"
        );
        Ok(records)
    }
}

/// Decode a response body for `query` into records.
///
/// `token_holder` rows are unwrapped to their token.
pub fn decode_records(query: &ArtQuery, body: &str) -> Result<Vec<ArtRecord>> {
    let response: GraphQlResponse = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        return Err(GalleryError::GraphQl {
            messages: response.errors.into_iter().map(|e| e.message).collect(),
        });
    }

    let rows = match response.data {
        Some(Value::Object(mut data)) => data.remove(query.root_field()).unwrap_or(Value::Null),
        _ => Value::Null,
    };
    if rows.is_null() {
        return Ok(Vec::new());
    }

    match query {
        ArtQuery::Held { .. } => Ok(serde_json::from_value(rows)?),
        ArtQuery::RecentlyAcquired { .. } => {
            let holdings: Vec<Holding> = serde_json::from_value(rows)?;
            Ok(holdings.into_iter().map(|h| h.token).collect())
        }
    }
}
