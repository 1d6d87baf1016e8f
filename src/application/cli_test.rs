use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use serde_json::Value;
use test_utils::sql_rows_fixture;

use super::build;
use super::run_query;
use crate::domain::models::Backend;
use crate::domain::models::DatabaseRegistration;
use crate::domain::models::IngestionStatus;
use crate::domain::models::QueryResponse;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadSummary;

#[derive(Default)]
struct RecordingBackend {
    queries: Mutex<Vec<String>>,
}

impl RecordingBackend {
    fn queries(&self) -> Vec<String> {
        return self.queries.lock().unwrap().clone();
    }
}

#[async_trait]
impl Backend for RecordingBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn schema(&self) -> Result<Value> {
        return Ok(json!({}));
    }

    #[allow(clippy::implicit_return)]
    async fn ingestion_status(&self) -> Result<IngestionStatus> {
        return Ok(IngestionStatus::default());
    }

    #[allow(clippy::implicit_return)]
    async fn register_database(&self, _connection_string: &str) -> Result<DatabaseRegistration> {
        return Ok(DatabaseRegistration::default());
    }

    #[allow(clippy::implicit_return)]
    async fn upload_documents(&self, _files: Vec<UploadFile>) -> Result<UploadSummary> {
        return Ok(UploadSummary::default());
    }

    #[allow(clippy::implicit_return)]
    async fn query(&self, text: &str) -> Result<QueryResponse> {
        self.queries.lock().unwrap().push(text.to_string());
        return Ok(serde_json::from_str(sql_rows_fixture())?);
    }
}

#[tokio::test]
async fn it_skips_blank_queries() -> Result<()> {
    let backend = Arc::new(RecordingBackend::default());

    run_query(backend.clone(), "").await?;
    run_query(backend.clone(), "   ").await?;

    assert!(backend.queries().is_empty());

    return Ok(());
}

#[tokio::test]
async fn it_sends_query_text_as_given() -> Result<()> {
    let backend = Arc::new(RecordingBackend::default());

    run_query(backend.clone(), "list python developers").await?;

    assert_eq!(backend.queries(), vec!["list python developers"]);

    return Ok(());
}

#[test]
fn it_parses_query_words() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["querydeck", "query", "how", "many"])?;
    let words = matches
        .subcommand_matches("query")
        .and_then(|m| return m.get_many::<String>("text"))
        .map(|words| return words.cloned().collect::<Vec<String>>())
        .unwrap_or_default();

    assert_eq!(words, vec!["how", "many"]);

    return Ok(());
}
