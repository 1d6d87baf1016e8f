use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionStatus {
    #[serde(default)]
    pub indexed: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRegistration {
    #[serde(default)]
    pub schema: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub total_indexed: u64,
}

impl UploadSummary {
    pub fn ingestion_status(&self) -> IngestionStatus {
        return IngestionStatus {
            indexed: self.total_indexed,
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
