#[cfg(test)]
#[path = "query_history_test.rs"]
mod tests;

use std::collections::VecDeque;

pub const QUERY_HISTORY_LIMIT: usize = 10;

/// Last submitted queries, most recent first. Duplicates are kept.
#[derive(Clone, Debug, Default)]
pub struct QueryHistory {
    entries: VecDeque<String>,
}

impl QueryHistory {
    pub fn push(&mut self, text: &str) {
        self.entries.push_front(text.to_string());
        self.entries.truncate(QUERY_HISTORY_LIMIT);
    }

    pub fn list(&self) -> Vec<String> {
        return self.entries.iter().cloned().collect();
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        return self.entries.get(idx).map(|entry| return entry.as_str());
    }

    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }
}
