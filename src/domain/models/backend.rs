use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use super::DatabaseRegistration;
use super::IngestionStatus;
use super::QueryResponse;
use super::UploadFile;
use super::UploadSummary;

pub type BackendArc = Arc<dyn Backend + Send + Sync>;

/// The query engine service this client orchestrates. Errors returned by any
/// method are user facing: their display text is the backend's `detail`
/// when one was provided, otherwise the transport failure.
#[async_trait]
pub trait Backend {
    /// Used at startup to verify the backend is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Raw schema document of the connected data source, displayed without
    /// interpretation.
    async fn schema(&self) -> Result<Value>;

    async fn ingestion_status(&self) -> Result<IngestionStatus>;

    /// Registers a database by connection string. The backend discovers and
    /// optionally returns its schema.
    async fn register_database(&self, connection_string: &str) -> Result<DatabaseRegistration>;

    /// Uploads one or more documents to be indexed in a single request.
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<UploadSummary>;

    /// Runs a free text query. Semantic failures such as untranslatable SQL
    /// come back as a successful response carrying `result.sql.error`.
    async fn query(&self, text: &str) -> Result<QueryResponse>;
}
