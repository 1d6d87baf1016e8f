#[cfg(test)]
#[path = "query_engine_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::DatabaseRegistration;
use crate::domain::models::IngestionStatus;
use crate::domain::models::QueryResponse;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadSummary;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Value,
}

/// Turns a non-2xx response into an error whose text is the backend's
/// `detail` string, falling back to the status code.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    tracing::error!(status = status, body = %body, "Query engine request failed");

    if let Ok(err) = serde_json::from_str::<ErrorResponse>(&body) {
        if let Some(detail) = err.detail.as_str() {
            if !detail.is_empty() {
                bail!(detail.to_string());
            }
        }
    }

    bail!(format!("Request failed with status code {status}"));
}

pub struct QueryEngine {
    url: String,
    timeout: String,
}

impl Default for QueryEngine {
    fn default() -> QueryEngine {
        return QueryEngine {
            url: Config::get(ConfigKey::BackendURL),
            timeout: Config::get(ConfigKey::BackendHealthCheckTimeout),
        };
    }
}

impl QueryEngine {
    fn endpoint(&self, path: &str) -> String {
        return format!("{url}{path}", url = self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl Backend for QueryEngine {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Query engine URL is not defined");
        }

        let res = match reqwest::Client::new()
            .get(self.endpoint("/api/ingest/status"))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Query engine is not running");
                bail!("Query engine is not running");
            }
        };

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Query engine health check failed");
            bail!("Query engine health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn schema(&self) -> Result<Value> {
        let res = reqwest::Client::new()
            .get(self.endpoint("/api/schema"))
            .send()
            .await?;

        let schema = check_status(res).await?.json::<Value>().await?;
        return Ok(schema);
    }

    #[allow(clippy::implicit_return)]
    async fn ingestion_status(&self) -> Result<IngestionStatus> {
        let res = reqwest::Client::new()
            .get(self.endpoint("/api/ingest/status"))
            .send()
            .await?;

        let status = check_status(res).await?.json::<IngestionStatus>().await?;
        return Ok(status);
    }

    #[allow(clippy::implicit_return)]
    async fn register_database(&self, connection_string: &str) -> Result<DatabaseRegistration> {
        let res = reqwest::Client::new()
            .post(self.endpoint("/api/ingest/database"))
            .form(&[("connection_string", connection_string)])
            .send()
            .await?;

        let registration = check_status(res)
            .await?
            .json::<DatabaseRegistration>()
            .await?;
        return Ok(registration);
    }

    #[allow(clippy::implicit_return)]
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<UploadSummary> {
        let mut form = multipart::Form::new();
        for file in files {
            form = form.part(
                "files",
                multipart::Part::bytes(file.bytes).file_name(file.filename),
            );
        }

        let res = reqwest::Client::new()
            .post(self.endpoint("/api/ingest/documents"))
            .multipart(form)
            .send()
            .await?;

        let summary = check_status(res).await?.json::<UploadSummary>().await?;
        return Ok(summary);
    }

    #[allow(clippy::implicit_return)]
    async fn query(&self, text: &str) -> Result<QueryResponse> {
        let res = reqwest::Client::new()
            .post(self.endpoint("/api/query"))
            .form(&[("query", text)])
            .send()
            .await?;

        let response = check_status(res).await?.json::<QueryResponse>().await?;
        return Ok(response);
    }
}
