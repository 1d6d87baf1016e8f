#[cfg(test)]
#[path = "query_controller_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::QueryHistory;
use super::ResultAdapter;
use crate::domain::models::Action;
use crate::domain::models::QueryRequest;
use crate::domain::models::QueryResponse;
use crate::domain::models::QueryTicket;
use crate::domain::models::RenderableResult;

pub struct QueryOutcome {
    pub response: QueryResponse,
    pub rendered: RenderableResult,
}

/// Owns the lifecycle of query submissions. Several queries may be in flight
/// at once; only the most recently issued one is allowed to change the
/// status message and the displayed result.
#[derive(Default)]
pub struct QueryController {
    latest_ticket: QueryTicket,
    pub history: QueryHistory,
    pub outcome: Option<QueryOutcome>,
    pub status: String,
}

impl QueryController {
    /// Issues a query to the actions worker. Empty input is ignored and
    /// returns `None`.
    pub fn submit(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<Option<QueryTicket>> {
        if text.is_empty() {
            return Ok(None);
        }

        self.latest_ticket = self.latest_ticket.next();
        self.status = "Querying...".to_string();

        let request = QueryRequest::new(self.latest_ticket, text);
        tracing::debug!(ticket = request.ticket.0, text = %request.text, "Submitting query");
        tx.send(Action::Query(request))?;

        return Ok(Some(self.latest_ticket));
    }

    pub fn is_latest(&self, ticket: QueryTicket) -> bool {
        return ticket == self.latest_ticket;
    }

    /// Applies a successful response. History is recorded for any successful
    /// call, including responses that carry a database error. Returns whether
    /// the displayed result changed.
    pub fn complete(&mut self, request: &QueryRequest, response: QueryResponse) -> bool {
        self.history.push(&request.text);

        if !self.is_latest(request.ticket) {
            tracing::debug!(
                ticket = request.ticket.0,
                latest = self.latest_ticket.0,
                "Discarding stale query response"
            );
            return false;
        }

        self.status = format!("Done in {}s", response.elapsed_seconds());
        self.outcome = Some(QueryOutcome {
            rendered: ResultAdapter::normalize(&response),
            response,
        });

        return true;
    }

    /// Applies a transport or backend failure. The previous result stays on
    /// screen and history is untouched.
    pub fn fail(&mut self, request: &QueryRequest, err: &str) -> bool {
        if !self.is_latest(request.ticket) {
            tracing::debug!(
                ticket = request.ticket.0,
                latest = self.latest_ticket.0,
                "Discarding stale query failure"
            );
            return false;
        }

        self.status = format!("Error: {err}");
        return true;
    }

    pub fn rendered(&self) -> Option<&RenderableResult> {
        return self.outcome.as_ref().map(|outcome| return &outcome.rendered);
    }
}
