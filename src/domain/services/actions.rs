#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::future::Future;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::BackendArc;
use crate::domain::models::Event;
use crate::domain::models::QueryRequest;
use crate::domain::models::UploadFile;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /connect (/cn) [CONNECTION_STRING?] - Registers a database with the backend and discovers its schema. Defaults to the configured connection string.
- /upload (/u) [PATH...] - Uploads one or more documents (.txt .csv .pdf .docx) to be indexed.
- /schema (/sc) - Fetches the latest discovered schema.
- /status (/st) - Fetches the latest ingestion status.
- /history (/hi) [NUMBER] - Copies a previous query from the history list into the input without running it.
- /quit /exit (/q) - Exit Querydeck.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter - Run the query in the input.
- Up arrow - Scroll results up
- Down arrow - Scroll results down
- CTRL+U / Page up - Page results up
- CTRL+D / Page down - Page results down
- CTRL+R - Cycle previous queries into the input.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

fn spawn_worker<F>(name: &'static str, worker: F)
where
    F: Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = worker.await {
            tracing::error!(worker = name, error = ?err, "Worker failed");
        }
    });
}

async fn run_query(
    backend: BackendArc,
    request: QueryRequest,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match backend.query(&request.text).await {
        Ok(response) => {
            tracing::debug!(ticket = request.ticket.0, body = ?response, "Query response");
            tx.send(Event::QueryCompleted(request, response))?;
        }
        Err(err) => {
            tracing::error!(ticket = request.ticket.0, error = ?err, "Query failed");
            tx.send(Event::QueryFailed(request, err.to_string()))?;
        }
    }

    return Ok(());
}

async fn connect_database(
    backend: BackendArc,
    connection_string: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match backend.register_database(&connection_string).await {
        Ok(registration) => {
            if let Some(schema) = registration.schema {
                tx.send(Event::ConnectorStatus(
                    "Connected & schema discovered.".to_string(),
                ))?;
                tx.send(Event::SchemaDiscovered(schema))?;
            } else {
                tx.send(Event::ConnectorStatus(
                    "Connected (no schema returned).".to_string(),
                ))?;
            }
        }
        Err(err) => {
            tracing::error!(error = ?err, "Database registration failed");
            tx.send(Event::ConnectorStatus(format!("Error: {err}")))?;
        }
    }

    return Ok(());
}

pub async fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|name| return name.to_string_lossy().to_string())
        .unwrap_or_else(|| return path.to_string_lossy().to_string());

    return Ok(UploadFile { filename, bytes });
}

async fn upload_documents(
    backend: BackendArc,
    paths: Vec<PathBuf>,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let mut files = vec![];
    for path in paths.iter() {
        match read_upload(path).await {
            Ok(file) => files.push(file),
            Err(err) => {
                tx.send(Event::UploaderStatus(format!(
                    "Error: Unable to read {}: {err}",
                    path.to_string_lossy()
                )))?;
                return Ok(());
            }
        }
    }

    match backend.upload_documents(files).await {
        Ok(summary) => {
            tx.send(Event::UploaderStatus(format!(
                "Uploaded: {}",
                summary.total_indexed
            )))?;
            tx.send(Event::IngestionStatusChanged(summary.ingestion_status()))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "Document upload failed");
            tx.send(Event::UploaderStatus(format!("Error: {err}")))?;
        }
    }

    return Ok(());
}

async fn refresh_schema(backend: BackendArc, tx: mpsc::UnboundedSender<Event>) -> Result<()> {
    match backend.schema().await {
        Ok(schema) => tx.send(Event::SchemaDiscovered(schema))?,
        Err(err) => tracing::warn!(error = ?err, "Unable to fetch schema"),
    }

    return Ok(());
}

async fn refresh_ingestion_status(
    backend: BackendArc,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match backend.ingestion_status().await {
        Ok(status) => tx.send(Event::IngestionStatusChanged(status))?,
        Err(err) => tracing::warn!(error = ?err, "Unable to fetch ingestion status"),
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every action on its own task so slow backend calls never block
    /// each other. Nothing is cancelled; results are reported back as events
    /// in whatever order they resolve.
    pub async fn start(
        backend: BackendArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = match rx.recv().await {
                Some(action) => action,
                None => return Ok(()),
            };

            let worker_backend = backend.clone();
            let worker_tx = tx.clone();
            match action {
                Action::ConnectDatabase(connection_string) => {
                    spawn_worker(
                        "connect",
                        connect_database(worker_backend, connection_string, worker_tx),
                    );
                }
                Action::Query(request) => {
                    spawn_worker("query", run_query(worker_backend, request, worker_tx));
                }
                Action::RefreshIngestionStatus() => {
                    spawn_worker(
                        "ingestion-status",
                        refresh_ingestion_status(worker_backend, worker_tx),
                    );
                }
                Action::RefreshSchema() => {
                    spawn_worker("schema", refresh_schema(worker_backend, worker_tx));
                }
                Action::UploadDocuments(paths) => {
                    spawn_worker(
                        "upload",
                        upload_documents(worker_backend, paths, worker_tx),
                    );
                }
            }
        }
    }
}
