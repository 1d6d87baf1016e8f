#[cfg(test)]
#[path = "ingestion_bridge_test.rs"]
mod tests;

use crate::domain::models::IngestionStatus;

/// Holds the latest ingestion status reported by the connector, uploader or a
/// status refresh. Every report replaces the previous one outright.
#[derive(Default)]
pub struct IngestionStatusBridge {
    status: IngestionStatus,
}

impl IngestionStatusBridge {
    pub fn set(&mut self, status: IngestionStatus) {
        tracing::debug!(indexed = status.indexed, "Ingestion status updated");
        self.status = status;
    }

    pub fn get(&self) -> IngestionStatus {
        return self.status;
    }

    pub fn summary(&self) -> String {
        return format!(
            "Ingestion Status: {} docs indexed.",
            self.status.indexed
        );
    }
}
