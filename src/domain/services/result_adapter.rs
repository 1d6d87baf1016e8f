#[cfg(test)]
#[path = "result_adapter_test.rs"]
mod tests;

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

use crate::domain::models::DatabaseResult;
use crate::domain::models::DocumentMatch;
use crate::domain::models::DocumentResult;
use crate::domain::models::QueryResponse;
use crate::domain::models::RenderableResult;
use crate::domain::models::ResultBanner;
use crate::domain::models::ResultBody;
use crate::domain::models::ResultTable;

const SCALAR_COLUMN: &str = "value";

// Magnitudes outside [1e-6, 1e21) are written in exponent form, e.g. `1e+21`
// and `1.5e-7`.
fn display_exponent(float: f64) -> String {
    let formatted = format!("{float:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            return format!("{mantissa}e+{exponent}");
        }
        _ => return formatted,
    }
}

fn display_number(number: &Number) -> String {
    // f64 Display drops the trailing `.0` serde_json keeps on whole floats.
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            let magnitude = float.abs();
            if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
                return display_exponent(float);
            }
            return format!("{float}");
        }
    }

    return number.to_string();
}

/// Stringifies any JSON value for display in a single cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => return "null".to_string(),
        Value::Bool(flag) => return flag.to_string(),
        Value::Number(number) => return display_number(number),
        Value::String(text) => return text.to_string(),
        Value::Array(_) | Value::Object(_) => return value.to_string(),
    }
}

fn display_label(value: &Value) -> String {
    if value.is_null() {
        return "".to_string();
    }

    return display_value(value);
}

fn row_fields(row: &Value) -> Map<String, Value> {
    if let Value::Object(fields) = row {
        return fields.clone();
    }

    let mut fields = Map::new();
    fields.insert(SCALAR_COLUMN.to_string(), row.clone());
    return fields;
}

fn normalize_rows(rows: &[Value]) -> DatabaseResult {
    if rows.is_empty() {
        return DatabaseResult::Empty;
    }

    let rows = rows.iter().map(row_fields).collect::<Vec<Map<String, Value>>>();

    let mut columns: Vec<String> = vec![];
    for row in rows.iter() {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.to_string());
            }
        }
    }

    if columns.len() != rows[0].len() {
        tracing::warn!(
            columns = columns.len(),
            first_row_columns = rows[0].len(),
            "Database rows are not homogeneous"
        );
    }

    let cells = rows
        .iter()
        .map(|row| {
            return columns
                .iter()
                .map(|column| {
                    return row
                        .get(column)
                        .map(display_value)
                        .unwrap_or_else(|| return "".to_string());
                })
                .collect::<Vec<String>>();
        })
        .collect::<Vec<Vec<String>>>();

    return DatabaseResult::Rows(ResultTable {
        columns,
        rows: cells,
    });
}

fn normalize_sql(sql: &Value) -> DatabaseResult {
    match sql {
        Value::Array(rows) => return normalize_rows(rows),
        Value::Object(fields) => {
            if let Some(error) = fields.get("error").filter(|e| return !e.is_null()) {
                return DatabaseResult::Error(display_value(error));
            }
        }
        _ => (),
    }

    tracing::warn!(sql = ?sql, "Unrecognized database result");
    return DatabaseResult::Error("Unrecognized database result".to_string());
}

fn normalize_docs(docs: &Value) -> DocumentResult {
    let entries = match docs.as_array() {
        Some(entries) => entries,
        None => {
            tracing::warn!(docs = ?docs, "Document results are not a list");
            return DocumentResult::Empty;
        }
    };

    let matches = entries
        .iter()
        .filter_map(|entry| {
            if !entry.is_object() {
                tracing::warn!(entry = ?entry, "Skipping malformed document match");
                return None;
            }

            return Some(DocumentMatch {
                filename: display_label(&entry["filename"]),
                score: entry["score"].as_f64(),
                snippet: display_label(&entry["snippet"]),
            });
        })
        .collect::<Vec<DocumentMatch>>();

    if matches.is_empty() {
        return DocumentResult::Empty;
    }

    return DocumentResult::Matches(matches);
}

pub struct ResultAdapter {}

impl ResultAdapter {
    /// Converts whatever the backend returned into one of the renderable
    /// shapes. Database results take priority over document matches.
    pub fn normalize(response: &QueryResponse) -> RenderableResult {
        let banner = ResultBanner {
            query_type: display_label(&response.query_type),
            time: display_label(&response.time),
            from_cache: response.is_from_cache(),
        };

        let body = if let Some(sql) = response.sql() {
            if response.docs().is_some() {
                tracing::debug!(
                    query_type = ?response.query_type,
                    "Response carries both database and document results, discarding documents"
                );
            }
            ResultBody::Database(normalize_sql(sql))
        } else if let Some(docs) = response.docs() {
            ResultBody::Documents(normalize_docs(docs))
        } else {
            ResultBody::Nothing
        };

        return RenderableResult { banner, body };
    }
}
