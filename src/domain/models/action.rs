use std::path::PathBuf;

use super::QueryRequest;

#[derive(Debug)]
pub enum Action {
    ConnectDatabase(String),
    Query(QueryRequest),
    RefreshIngestionStatus(),
    RefreshSchema(),
    UploadDocuments(Vec<PathBuf>),
}
