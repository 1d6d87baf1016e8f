#[cfg(test)]
#[path = "query_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

/// Identifies one submission. Tickets are issued in increasing order, so the
/// highest ticket handed out is always the most recent query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(pub u64);

impl QueryTicket {
    pub fn next(&self) -> QueryTicket {
        return QueryTicket(self.0 + 1);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
    pub ticket: QueryTicket,
    pub text: String,
}

impl QueryRequest {
    pub fn new(ticket: QueryTicket, text: &str) -> QueryRequest {
        return QueryRequest {
            ticket,
            text: text.to_string(),
        };
    }
}

/// Response envelope from `POST /api/query`. Every field is kept as raw JSON
/// as the backend gives no guarantees on shape; `ResultAdapter` is the only
/// place that interprets it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query_type: Value,
    #[serde(default)]
    pub from_cache: Value,
    #[serde(default)]
    pub time: Value,
    #[serde(default)]
    pub result: Value,
}

impl QueryResponse {
    pub fn elapsed_seconds(&self) -> f64 {
        return self.time.as_f64().unwrap_or(0.0);
    }

    pub fn is_from_cache(&self) -> bool {
        return self.from_cache.as_bool().unwrap_or(false);
    }

    fn result_field(&self, name: &str) -> Option<&Value> {
        return match self.result.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        };
    }

    pub fn sql(&self) -> Option<&Value> {
        return self.result_field("sql");
    }

    pub fn docs(&self) -> Option<&Value> {
        return self.result_field("docs");
    }
}
