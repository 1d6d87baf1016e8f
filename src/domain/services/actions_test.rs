use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use serde_json::Value;
use test_utils::sql_rows_fixture;
use tokio::sync::mpsc;

use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::Backend;
use crate::domain::models::DatabaseRegistration;
use crate::domain::models::Event;
use crate::domain::models::IngestionStatus;
use crate::domain::models::QueryRequest;
use crate::domain::models::QueryResponse;
use crate::domain::models::QueryTicket;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadSummary;

#[derive(Default)]
struct FakeBackend {
    fail_with: Option<String>,
    schema: Option<Value>,
}

#[async_trait]
impl Backend for FakeBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn schema(&self) -> Result<Value> {
        if let Some(err) = &self.fail_with {
            bail!(err.to_string());
        }
        return Ok(self.schema.clone().unwrap_or(json!({})));
    }

    #[allow(clippy::implicit_return)]
    async fn ingestion_status(&self) -> Result<IngestionStatus> {
        if let Some(err) = &self.fail_with {
            bail!(err.to_string());
        }
        return Ok(IngestionStatus { indexed: 7 });
    }

    #[allow(clippy::implicit_return)]
    async fn register_database(&self, _connection_string: &str) -> Result<DatabaseRegistration> {
        if let Some(err) = &self.fail_with {
            bail!(err.to_string());
        }
        return Ok(DatabaseRegistration {
            schema: self.schema.clone(),
        });
    }

    #[allow(clippy::implicit_return)]
    async fn upload_documents(&self, files: Vec<UploadFile>) -> Result<UploadSummary> {
        if let Some(err) = &self.fail_with {
            bail!(err.to_string());
        }
        return Ok(UploadSummary {
            total_indexed: files.len() as u64,
        });
    }

    #[allow(clippy::implicit_return)]
    async fn query(&self, _text: &str) -> Result<QueryResponse> {
        if let Some(err) = &self.fail_with {
            bail!(err.to_string());
        }
        return Ok(serde_json::from_str(sql_rows_fixture())?);
    }
}

/// Runs a single action through the service and collects every event it
/// produced.
async fn run_action(backend: FakeBackend, action: Action) -> Result<Vec<Event>> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    action_tx.send(action)?;
    drop(action_tx);

    ActionsService::start(Arc::new(backend), event_tx, &mut action_rx).await?;

    let mut events = vec![];
    while let Some(event) = event_rx.recv().await {
        events.push(event);
    }

    return Ok(events);
}

#[tokio::test]
async fn it_completes_queries() -> Result<()> {
    let request = QueryRequest::new(QueryTicket(3), "list python developers");
    let events = run_action(FakeBackend::default(), Action::Query(request)).await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::QueryCompleted(request, response) => {
            assert_eq!(request.ticket, QueryTicket(3));
            assert_eq!(response.query_type, json!("sql"));
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_failed_queries() -> Result<()> {
    let backend = FakeBackend {
        fail_with: Some("No database connected.".to_string()),
        ..FakeBackend::default()
    };
    let request = QueryRequest::new(QueryTicket(1), "how many employees");
    let events = run_action(backend, Action::Query(request)).await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::QueryFailed(request, err) => {
            assert_eq!(request.text, "how many employees");
            assert_eq!(err, "No database connected.");
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_connects_and_discovers_schema() -> Result<()> {
    let backend = FakeBackend {
        schema: Some(json!({"tables": {"employees": {}}})),
        ..FakeBackend::default()
    };
    let events = run_action(
        backend,
        Action::ConnectDatabase("sqlite:///company_demo.db".to_string()),
    )
    .await?;

    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::ConnectorStatus(status) => {
            assert_eq!(status, "Connected & schema discovered.");
        }
        _ => bail!("Wrong type from recv"),
    }
    match &events[1] {
        Event::SchemaDiscovered(schema) => {
            assert_eq!(schema, &json!({"tables": {"employees": {}}}));
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_connects_without_schema() -> Result<()> {
    let events = run_action(
        FakeBackend::default(),
        Action::ConnectDatabase("sqlite:///company_demo.db".to_string()),
    )
    .await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::ConnectorStatus(status) => {
            assert_eq!(status, "Connected (no schema returned).");
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_connection_errors() -> Result<()> {
    let backend = FakeBackend {
        fail_with: Some("Unable to connect to database".to_string()),
        ..FakeBackend::default()
    };
    let events = run_action(backend, Action::ConnectDatabase("bad://".to_string())).await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::ConnectorStatus(status) => {
            assert_eq!(status, "Error: Unable to connect to database");
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_uploads_documents() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("querydeck-upload-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await?;
    let first = dir.join("resume.txt");
    let second = dir.join("notes.csv");
    tokio::fs::write(&first, "Python and SQL").await?;
    tokio::fs::write(&second, "a,b\n1,2").await?;

    let events = run_action(
        FakeBackend::default(),
        Action::UploadDocuments(vec![first, second]),
    )
    .await?;
    tokio::fs::remove_dir_all(&dir).await?;

    assert_eq!(events.len(), 2);
    match &events[0] {
        Event::UploaderStatus(status) => {
            assert_eq!(status, "Uploaded: 2");
        }
        _ => bail!("Wrong type from recv"),
    }
    match &events[1] {
        Event::IngestionStatusChanged(status) => {
            assert_eq!(status.indexed, 2);
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_unreadable_uploads() -> Result<()> {
    let path = PathBuf::from("/definitely/not/here.pdf");
    let events = run_action(FakeBackend::default(), Action::UploadDocuments(vec![path])).await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::UploaderStatus(status) => {
            assert!(status.starts_with("Error: Unable to read /definitely/not/here.pdf"));
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_reports_upload_errors() -> Result<()> {
    let path = std::env::temp_dir().join(format!("querydeck-fail-{}.txt", std::process::id()));
    tokio::fs::write(&path, "hello").await?;

    let backend = FakeBackend {
        fail_with: Some("Unsupported file type".to_string()),
        ..FakeBackend::default()
    };
    let events = run_action(backend, Action::UploadDocuments(vec![path.clone()])).await?;
    tokio::fs::remove_file(&path).await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::UploaderStatus(status) => {
            assert_eq!(status, "Error: Unsupported file type");
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_refreshes_ingestion_status() -> Result<()> {
    let events = run_action(FakeBackend::default(), Action::RefreshIngestionStatus()).await?;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::IngestionStatusChanged(status) => {
            assert_eq!(status.indexed, 7);
        }
        _ => bail!("Wrong type from recv"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_ignores_refresh_failures() -> Result<()> {
    let backend = FakeBackend {
        fail_with: Some("offline".to_string()),
        ..FakeBackend::default()
    };
    let events = run_action(backend, Action::RefreshSchema()).await?;

    assert!(events.is_empty());

    return Ok(());
}
